// Todo route registration

use axum::http::Method;

use crate::config::state::AppState;
use crate::core::routing::{RouteGroup, RoutingError};

use super::handler;

/// Registers every todo endpoint on `group`.
///
/// Paths are relative to the group's mount prefix, so with the group at
/// `/api` the listing lives at `/api/todos`.
pub fn register(group: RouteGroup<AppState>) -> Result<RouteGroup<AppState>, RoutingError> {
    group
        .add(Method::GET, "/todos", handler::list_todos)?
        .add(Method::POST, "/todos", handler::create_todo)?
        .add(Method::PUT, "/todos/{id}", handler::toggle_todo)?
        .add(Method::DELETE, "/todos/{id}", handler::delete_todo)
}
