//! One function per operation. Each validates its input, opens a single store session,
//! calls the store and turns the outcome into a value or an [`ApiError`].
//!
//! Invalid input never opens a session. Deletes are idempotent; edits check that the
//! target exists and answer 404 without calling the procedure when it does not.

pub mod projects;
pub mod todos;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use crate::error::ApiError;
use crate::repository::gateway::{Gateway, Store, StoreError};
use crate::validation::{validate, Schema};

fn parse<T: DeserializeOwned>(schema: &Schema, body: &Value) -> Result<T, ApiError> {
    let validated = validate(schema, body).map_err(|errors| {
        warn!(?errors, "validation failed");
        ApiError::Validation(errors)
    })?;
    serde_json::from_value(Value::Object(validated)).map_err(|err| {
        error!(error = %err, "validated record does not fit its payload");
        ApiError::Unexpected
    })
}

fn store_failure(detail: impl Into<String>) -> impl FnOnce(StoreError) -> ApiError {
    move |source| {
        error!(error = %source, "store call failed");
        ApiError::store(detail, source)
    }
}

fn open(store: &dyn Store, detail: impl Into<String>) -> Result<Box<dyn Gateway>, ApiError> {
    store.session().map_err(store_failure(detail))
}
