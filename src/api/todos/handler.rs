// Todo handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::state::AppState;
use crate::store::Todo;
use crate::utils::error_handler::ApiError;

const MAX_CONTENT_LENGTH: usize = 500;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub content: String,
}

/// Returns every todo in creation order.
#[instrument(name = "list_todos", skip(state))]
pub async fn list_todos(State(state): State<AppState>) -> Json<Vec<Todo>> {
    let todos: Vec<Todo> = state.todos.list().await;
    info!("Listing {} todos", todos.len());

    Json(todos)
}

/// Creates a todo from the posted content.
#[instrument(name = "create_todo", skip(state, request))]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let content: &str = request.content.trim();

    if content.is_empty() {
        return Err(ApiError::Validation("content cannot be empty".to_string()));
    }

    if content.len() > MAX_CONTENT_LENGTH {
        return Err(ApiError::Validation(format!(
            "content cannot exceed {MAX_CONTENT_LENGTH} characters"
        )));
    }

    let todo: Todo = state.todos.create(content.to_string()).await;
    info!("Created todo {}", todo.id);

    Ok((StatusCode::CREATED, Json(todo)))
}

/// Flips the completion flag of one todo and returns the updated item.
#[instrument(name = "toggle_todo", skip(state))]
pub async fn toggle_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, ApiError> {
    match state.todos.toggle(id).await {
        Some(todo) => {
            info!("Toggled todo {} to completed={}", todo.id, todo.completed);
            Ok(Json(todo))
        }
        None => Err(ApiError::TodoNotFound(id)),
    }
}

/// Deletes one todo.
#[instrument(name = "delete_todo", skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.todos.remove(id).await {
        info!("Deleted todo {id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::TodoNotFound(id))
    }
}
