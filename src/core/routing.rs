// Route group construction and mounting

use std::collections::HashSet;

use axum::{
    handler::Handler,
    http::Method,
    routing::{on, MethodFilter},
    Router,
};
use thiserror::Error;

/// Configuration errors raised while building or mounting a route group.
/// All of these are fatal: they surface during startup, before the server
/// binds a listener.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("group `{group}`: a handler for {method} {path} is already registered")]
    DuplicateRoute {
        group: String,
        method: Method,
        path: String,
    },

    #[error("group `{group}` reached the dispatcher without any routes")]
    EmptyGroup { group: String },

    #[error("group `{group}`: {method} requests cannot be dispatched")]
    UnsupportedMethod { group: String, method: Method },

    #[error("group `{group}`: route path `{path}` must start with `/`")]
    InvalidPath { group: String, path: String },

    #[error("mount prefix `{prefix}` must be a non-root path starting with `/`")]
    InvalidPrefix { prefix: String },
}

/// A named collection of (method, path, handler) bindings mounted under a
/// fixed path prefix.
///
/// Handler paths are relative to the prefix, so handler modules stay
/// prefix-agnostic. The group is populated from a single composition point
/// during startup and is consumed by [`RouteGroup::mount`]; there is no way
/// to mutate it afterwards.
#[derive(Debug)]
pub struct RouteGroup<S = ()> {
    name: String,
    prefix: String,
    registered: HashSet<(Method, String)>,
    router: Router<S>,
}

impl<S> RouteGroup<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty group mounted-to-be at `prefix`.
    pub fn new(name: &str, prefix: &str) -> Result<Self, RoutingError> {
        // nest() requires a non-root path; a trailing slash would silently
        // double up in the full route path
        if prefix.len() < 2 || !prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(RoutingError::InvalidPrefix {
                prefix: prefix.to_owned(),
            });
        }

        Ok(Self {
            name: name.to_owned(),
            prefix: prefix.to_owned(),
            registered: HashSet::new(),
            router: Router::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of (method, path) bindings registered so far.
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Registers `handler` for `method` at `path` (relative to the prefix).
    ///
    /// Registering a second handler for the same (method, path) pair is
    /// rejected here, deterministically, instead of letting the underlying
    /// router panic mid-build.
    pub fn add<H, T>(mut self, method: Method, path: &str, handler: H) -> Result<Self, RoutingError>
    where
        H: Handler<T, S>,
        T: 'static,
    {
        if !path.starts_with('/') {
            return Err(RoutingError::InvalidPath {
                group: self.name.clone(),
                path: path.to_owned(),
            });
        }

        let filter: MethodFilter =
            MethodFilter::try_from(method.clone()).map_err(|_| RoutingError::UnsupportedMethod {
                group: self.name.clone(),
                method: method.clone(),
            })?;

        if !self.registered.insert((method.clone(), path.to_owned())) {
            return Err(RoutingError::DuplicateRoute {
                group: self.name.clone(),
                method,
                path: path.to_owned(),
            });
        }

        // Same-path registrations with distinct methods merge into one
        // method router; colliding methods were already caught above.
        self.router = self.router.route(path, on(filter, handler));
        Ok(self)
    }

    /// Merges the group's bindings into `app` under the group's prefix.
    ///
    /// An empty group is a startup misconfiguration (some registration call
    /// never ran) and is reported immediately rather than discovered on the
    /// first request.
    pub fn mount(self, app: Router<S>) -> Result<Router<S>, RoutingError> {
        if self.registered.is_empty() {
            return Err(RoutingError::EmptyGroup { group: self.name });
        }

        tracing::debug!(
            group = %self.name,
            prefix = %self.prefix,
            routes = self.registered.len(),
            "Mounting route group"
        );

        Ok(app.nest(&self.prefix, self.router))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn ok() -> &'static str {
        "ok"
    }

    #[test]
    fn rejects_duplicate_method_path_pairs() {
        let group: RouteGroup = RouteGroup::new("api", "/api")
            .unwrap()
            .add(Method::GET, "/todos", ok)
            .unwrap();

        let err: RoutingError = group.add(Method::GET, "/todos", ok).unwrap_err();
        assert!(matches!(err, RoutingError::DuplicateRoute { .. }));
    }

    #[test]
    fn same_path_with_different_methods_coexists() {
        let group: RouteGroup = RouteGroup::new("api", "/api")
            .unwrap()
            .add(Method::GET, "/todos", ok)
            .unwrap()
            .add(Method::POST, "/todos", ok)
            .unwrap();

        assert_eq!(group.len(), 2);
    }

    #[test]
    fn refuses_to_mount_an_empty_group() {
        let group: RouteGroup = RouteGroup::new("api", "/api").unwrap();

        let err: RoutingError = group.mount(Router::new()).unwrap_err();
        assert!(matches!(err, RoutingError::EmptyGroup { .. }));
    }

    #[test]
    fn rejects_paths_without_a_leading_slash() {
        let err: RoutingError = RouteGroup::<()>::new("api", "/api")
            .unwrap()
            .add(Method::GET, "todos", ok)
            .unwrap_err();

        assert!(matches!(err, RoutingError::InvalidPath { .. }));
    }

    #[test]
    fn rejects_malformed_prefixes() {
        assert!(RouteGroup::<()>::new("api", "api").is_err());
        assert!(RouteGroup::<()>::new("api", "/").is_err());
        assert!(RouteGroup::<()>::new("api", "/api/").is_err());
        assert!(RouteGroup::<()>::new("api", "").is_err());
    }

    #[test]
    fn rejects_methods_without_a_filter() {
        let err: RoutingError = RouteGroup::<()>::new("api", "/api")
            .unwrap()
            .add(Method::CONNECT, "/todos", ok)
            .unwrap_err();

        assert!(matches!(err, RoutingError::UnsupportedMethod { .. }));
    }

    #[tokio::test]
    async fn mounted_routes_dispatch_under_the_prefix() {
        let app: Router = RouteGroup::new("api", "/api")
            .unwrap()
            .add(Method::GET, "/todos", ok)
            .unwrap()
            .mount(Router::new())
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/todos")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The bare path, without the prefix, must not reach the handler.
        let response = app
            .oneshot(Request::builder().uri("/todos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dispatches_by_method_within_one_path() {
        async fn listing() -> &'static str {
            "listing"
        }
        async fn creating() -> &'static str {
            "creating"
        }

        let app: Router = RouteGroup::new("api", "/api")
            .unwrap()
            .add(Method::GET, "/todos", listing)
            .unwrap()
            .add(Method::POST, "/todos", creating)
            .unwrap()
            .mount(Router::new())
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/todos")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"creating");
    }
}
