use chrono::NaiveDate;
use serde_json::{Map, Value};
use thiserror::Error;

/// A row returned by a table function, keyed by column name.
pub type Row = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not check out a database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database call failed: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("could not project row: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Stored procedures the service is allowed to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    AddProject,
    EditProject,
    DeleteProject,
    AddTodo,
    EditTodo,
    DeleteTodo,
    ToggleTodoCompletion,
}

impl Procedure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Procedure::AddProject => "add_project",
            Procedure::EditProject => "edit_project",
            Procedure::DeleteProject => "delete_project",
            Procedure::AddTodo => "add_todo",
            Procedure::EditTodo => "edit_todo",
            Procedure::DeleteTodo => "delete_todo",
            Procedure::ToggleTodoCompletion => "toggle_todo_completion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFunction {
    ListProjects,
    GetAllTodos,
}

impl TableFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableFunction::ListProjects => "list_projects",
            TableFunction::GetAllTodos => "get_all_todos",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Projects,
    Todos,
}

/// Positional argument of a procedure call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i32),
    Text(String),
    Date(NaiveDate),
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Arg::Int(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<NaiveDate> for Arg {
    fn from(value: NaiveDate) -> Self {
        Arg::Date(value)
    }
}

/// Hands out one gateway session per request.
pub trait Store: Send + Sync {
    fn session(&self) -> Result<Box<dyn Gateway>, StoreError>;
}

/// Calls into the database. The session is released when the gateway is dropped.
pub trait Gateway {
    fn call_procedure(&mut self, procedure: Procedure, args: Vec<Arg>) -> Result<(), StoreError>;

    fn query_rows(&mut self, function: TableFunction) -> Result<Vec<Row>, StoreError>;

    fn exists(&mut self, table: Table, id: i32) -> Result<bool, StoreError>;
}
