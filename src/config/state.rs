// Application state, built once in main and handed to the router

use std::sync::Arc;

use anyhow::Result;

use crate::config::environment::EnvironmentVariables;
use crate::store::TodoStore;

/// Shared application state. Cheap to clone; every field is a handle.
#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub todos: TodoStore,
}

impl AppState {
    /// Builds the state from process environment (and `.env` outside
    /// production) with an empty todo store.
    pub fn from_env() -> Result<Self> {
        let environment: EnvironmentVariables = EnvironmentVariables::load()?;

        Ok(Self {
            environment: Arc::new(environment),
            todos: TodoStore::new(),
        })
    }
}
