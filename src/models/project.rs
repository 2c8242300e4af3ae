use chrono::{DateTime, Utc};
use diesel::QueryableByName;
use serde::{Deserialize, Serialize};

use crate::validation::{Field, Kind, Preset, Schema};

pub const NAME_MAX_LENGTH: usize = 100;

pub const PROJECT_SCHEMA: Schema = Schema {
    fields: &[
        Field::new("name", Kind::Text { max_length: Some(NAME_MAX_LENGTH), allow_blank: false }),
        Field::new("description", Kind::Text { max_length: None, allow_blank: true })
            .optional()
            .nullable()
            .with_default(Preset::Text("")),
    ],
};

/// Body of create and edit requests, echoed back on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectPayload {
    pub name: String,
    pub description: String,
}

/// Row produced by `list_projects()`.
#[derive(Serialize, Debug, Clone, QueryableByName)]
#[diesel(table_name = crate::repository::schema::projects)]
pub struct ProjectRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
