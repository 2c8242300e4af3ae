use serde_json::Value;
use tracing::info;

use crate::error::{ApiError, DATABASE_ERROR};
use crate::handlers::{open, parse, store_failure};
use crate::models::project::{ProjectPayload, PROJECT_SCHEMA};
use crate::repository::gateway::{Arg, Procedure, Row, Store, Table, TableFunction};

pub const PROJECT_NOT_FOUND: &str = "Project not found";

#[tracing::instrument(name = "create_project", skip_all)]
pub fn create_project(store: &dyn Store, body: &Value) -> Result<ProjectPayload, ApiError> {
    let project: ProjectPayload = parse(&PROJECT_SCHEMA, body)?;
    let mut gateway = open(store, DATABASE_ERROR)?;
    gateway
        .call_procedure(
            Procedure::AddProject,
            vec![Arg::from(project.name.as_str()), Arg::from(project.description.as_str())],
        )
        .map_err(store_failure(DATABASE_ERROR))?;
    info!(name = %project.name, "project created");
    Ok(project)
}

#[tracing::instrument(name = "list_projects", skip_all)]
pub fn list_projects(store: &dyn Store) -> Result<Vec<Row>, ApiError> {
    const DETAIL: &str = "Error retrieving projects.";
    let mut gateway = open(store, DETAIL)?;
    gateway
        .query_rows(TableFunction::ListProjects)
        .map_err(store_failure(DETAIL))
}

#[tracing::instrument(name = "edit_project", skip(store, body))]
pub fn edit_project(store: &dyn Store, id: i32, body: &Value) -> Result<ProjectPayload, ApiError> {
    let project: ProjectPayload = parse(&PROJECT_SCHEMA, body)?;
    let mut gateway = open(store, DATABASE_ERROR)?;
    if !gateway.exists(Table::Projects, id).map_err(store_failure(DATABASE_ERROR))? {
        return Err(ApiError::NotFound(PROJECT_NOT_FOUND));
    }
    gateway
        .call_procedure(
            Procedure::EditProject,
            vec![
                Arg::from(id),
                Arg::from(project.name.as_str()),
                Arg::from(project.description.as_str()),
            ],
        )
        .map_err(store_failure(DATABASE_ERROR))?;
    info!("project updated");
    Ok(project)
}

#[tracing::instrument(name = "delete_project", skip(store))]
pub fn delete_project(store: &dyn Store, id: i32) -> Result<(), ApiError> {
    let detail = format!("Error deleting project {id}");
    let mut gateway = open(store, detail.as_str())?;
    gateway
        .call_procedure(Procedure::DeleteProject, vec![Arg::from(id)])
        .map_err(store_failure(detail))?;
    info!("project deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::recording::RecordingStore;
    use serde_json::json;

    #[test]
    fn test_create_calls_add_project_in_order() {
        let store = RecordingStore::new();
        let project = create_project(&store, &json!({"name": "Test Project", "description": "Test Description"})).unwrap();

        assert_eq!(project.name, "Test Project");
        assert_eq!(
            store.calls(),
            vec![(Procedure::AddProject, vec![Arg::from("Test Project"), Arg::from("Test Description")])]
        );
    }

    #[test]
    fn test_create_defaults_description() {
        let store = RecordingStore::new();
        let project = create_project(&store, &json!({"name": "Solo"})).unwrap();

        assert_eq!(project.description, "");
        assert_eq!(store.calls()[0].1, vec![Arg::from("Solo"), Arg::from("")]);
    }

    #[test]
    fn test_invalid_create_never_opens_a_session() {
        let store = RecordingStore::new();
        let err = create_project(&store, &json!({"description": "Missing name field"})).unwrap_err();

        assert!(matches!(err, ApiError::Validation(ref errors) if errors.contains_key("name")));
        assert_eq!(store.sessions(), 0);
    }

    #[test]
    fn test_list_without_rows_is_empty() {
        let store = RecordingStore::new();
        assert!(list_projects(&store).unwrap().is_empty());
    }

    #[test]
    fn test_list_failure_detail() {
        let err = list_projects(&RecordingStore::failing()).unwrap_err();
        assert!(matches!(err, ApiError::Store { ref detail, .. } if detail == "Error retrieving projects."));
    }

    #[test]
    fn test_edit_unknown_project_is_not_found() {
        let store = RecordingStore::new();
        let err = edit_project(&store, 999, &json!({"name": "Updated Project"})).unwrap_err();

        assert!(matches!(err, ApiError::NotFound(PROJECT_NOT_FOUND)));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_edit_existing_project() {
        let store = RecordingStore::new().with_existing(Table::Projects, 1);
        edit_project(&store, 1, &json!({"name": "Updated Project", "description": "Updated Description"})).unwrap();

        assert_eq!(
            store.calls(),
            vec![(
                Procedure::EditProject,
                vec![Arg::from(1), Arg::from("Updated Project"), Arg::from("Updated Description")]
            )]
        );
        assert_eq!(store.sessions(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = RecordingStore::new();
        delete_project(&store, 42).unwrap();
        assert_eq!(store.calls(), vec![(Procedure::DeleteProject, vec![Arg::from(42)])]);
    }

    #[test]
    fn test_delete_failure_names_the_project() {
        let err = delete_project(&RecordingStore::failing(), 7).unwrap_err();
        assert!(matches!(err, ApiError::Store { ref detail, .. } if detail == "Error deleting project 7"));
    }
}
