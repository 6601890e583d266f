// Library root for the todo API backend

pub mod api;
pub mod config;
pub mod core;
pub mod store;
pub mod utils;

pub use crate::config::environment::EnvironmentVariables;
pub use crate::config::state::AppState;
pub use crate::core::routing::{RouteGroup, RoutingError};
pub use crate::store::{Todo, TodoStore};
