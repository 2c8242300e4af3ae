use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ApiError, DATABASE_ERROR};
use crate::handlers::{open, parse, store_failure};
use crate::models::todo::{TodoPayload, TODO_SCHEMA};
use crate::repository::gateway::{Arg, Procedure, Row, Store, Table, TableFunction};

pub const TODO_NOT_FOUND: &str = "Todo not found";
pub const TOGGLE_NOT_FOUND: &str = "Todo not found.";
pub const INVALID_TODO_ID: &str = "Invalid todo ID.";
pub const TOGGLED: &str = "Todo status updated successfully.";

#[tracing::instrument(name = "create_todo", skip_all)]
pub fn create_todo(store: &dyn Store, body: &Value) -> Result<TodoPayload, ApiError> {
    let todo: TodoPayload = parse(&TODO_SCHEMA, body)?;
    let mut gateway = open(store, DATABASE_ERROR)?;
    gateway
        .call_procedure(
            Procedure::AddTodo,
            vec![
                Arg::from(todo.project_id),
                Arg::from(todo.title.as_str()),
                Arg::from(todo.description.as_str()),
                Arg::from(todo.priority.as_str()),
                Arg::from(todo.due_date),
            ],
        )
        .map_err(store_failure(DATABASE_ERROR))?;
    info!(project_id = todo.project_id, title = %todo.title, "todo created");
    Ok(todo)
}

#[tracing::instrument(name = "list_todos", skip_all)]
pub fn list_todos(store: &dyn Store) -> Result<Vec<Row>, ApiError> {
    const DETAIL: &str = "Error retrieving todos.";
    let mut gateway = open(store, DETAIL)?;
    gateway
        .query_rows(TableFunction::GetAllTodos)
        .map_err(store_failure(DETAIL))
}

#[tracing::instrument(name = "edit_todo", skip(store, body))]
pub fn edit_todo(store: &dyn Store, id: i32, body: &Value) -> Result<TodoPayload, ApiError> {
    let todo: TodoPayload = parse(&TODO_SCHEMA, body)?;
    let mut gateway = open(store, DATABASE_ERROR)?;
    if !gateway.exists(Table::Todos, id).map_err(store_failure(DATABASE_ERROR))? {
        return Err(ApiError::NotFound(TODO_NOT_FOUND));
    }
    gateway
        .call_procedure(
            Procedure::EditTodo,
            vec![
                Arg::from(id),
                Arg::from(todo.title.as_str()),
                Arg::from(todo.description.as_str()),
                Arg::from(todo.priority.as_str()),
                Arg::from(todo.due_date),
            ],
        )
        .map_err(store_failure(DATABASE_ERROR))?;
    info!("todo updated");
    Ok(todo)
}

#[tracing::instrument(name = "delete_todo", skip(store))]
pub fn delete_todo(store: &dyn Store, id: i32) -> Result<(), ApiError> {
    let detail = format!("Error deleting todo {id}");
    let mut gateway = open(store, detail.as_str())?;
    gateway
        .call_procedure(Procedure::DeleteTodo, vec![Arg::from(id)])
        .map_err(store_failure(detail))?;
    info!("todo deleted");
    Ok(())
}

/// `raw_id` is the unparsed path segment; anything but a positive integer is rejected
/// before the store is touched.
#[tracing::instrument(name = "toggle_todo_completion", skip(store))]
pub fn toggle_todo_completion(store: &dyn Store, raw_id: &str) -> Result<&'static str, ApiError> {
    let id = match raw_id.parse::<i32>() {
        Ok(id) if id > 0 => id,
        _ => {
            warn!("rejected todo id");
            return Err(ApiError::BadRequest(INVALID_TODO_ID.to_string()));
        }
    };
    let mut gateway = open(store, DATABASE_ERROR)?;
    if !gateway.exists(Table::Todos, id).map_err(store_failure(DATABASE_ERROR))? {
        return Err(ApiError::NotFound(TOGGLE_NOT_FOUND));
    }
    gateway
        .call_procedure(Procedure::ToggleTodoCompletion, vec![Arg::from(id)])
        .map_err(store_failure(DATABASE_ERROR))?;
    info!(id, "todo completion toggled");
    Ok(TOGGLED)
}
