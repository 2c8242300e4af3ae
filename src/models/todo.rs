use chrono::{DateTime, NaiveDate, Utc};
use diesel::QueryableByName;
use serde::{Deserialize, Serialize};

use crate::validation::{Field, Kind, Preset, Schema};

pub const TITLE_MAX_LENGTH: usize = 100;

pub const PRIORITY_CHOICES: &[&str] = &["low", "medium", "high"];

pub const TODO_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("project_id", Kind::Integer),
        Field::new("title", Kind::Text { max_length: Some(TITLE_MAX_LENGTH), allow_blank: false }),
        Field::new("description", Kind::Text { max_length: None, allow_blank: true })
            .optional()
            .nullable()
            .with_default(Preset::Text("")),
        Field::new("priority", Kind::Choice(PRIORITY_CHOICES)).with_default(Preset::Text("medium")),
        Field::new("due_date", Kind::Date),
        Field::new("is_completed", Kind::Boolean)
            .optional()
            .with_default(Preset::Bool(false)),
    ],
};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Body of create and edit requests, echoed back on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TodoPayload {
    pub project_id: i32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub is_completed: bool,
}

/// Row produced by `get_all_todos()`.
#[derive(Serialize, Debug, Clone, QueryableByName)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct TodoRow {
    pub id: i32,
    pub project_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub due_date: NaiveDate,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
