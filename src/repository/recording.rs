use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::repository::gateway::{Arg, Gateway, Procedure, Row, Store, StoreError, Table, TableFunction};

/// Raw text of the error raised by a failing store. Must never reach a client.
pub const STORE_FAILURE: &str = "insert or update on table todos violates foreign key constraint todos_project_id_fkey";

#[derive(Default)]
struct Recorded {
    calls: Vec<(Procedure, Vec<Arg>)>,
    rows: HashMap<TableFunction, Vec<Row>>,
    existing: HashSet<(Table, i32)>,
    sessions: usize,
    failing: bool,
    panicking: bool,
}

/// In-memory store that records every procedure call.
#[derive(Clone, Default)]
pub struct RecordingStore {
    state: Arc<Mutex<Recorded>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every gateway call fails with a database error.
    pub fn failing() -> Self {
        let store = Self::new();
        store.state.lock().unwrap().failing = true;
        store
    }

    /// Every gateway call panics.
    pub fn panicking() -> Self {
        let store = Self::new();
        store.state.lock().unwrap().panicking = true;
        store
    }

    pub fn with_rows(self, function: TableFunction, rows: Vec<Row>) -> Self {
        self.state.lock().unwrap().rows.insert(function, rows);
        self
    }

    pub fn with_existing(self, table: Table, id: i32) -> Self {
        self.state.lock().unwrap().existing.insert((table, id));
        self
    }

    pub fn calls(&self) -> Vec<(Procedure, Vec<Arg>)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn sessions(&self) -> usize {
        self.state.lock().unwrap().sessions
    }
}

impl Store for RecordingStore {
    fn session(&self) -> Result<Box<dyn Gateway>, StoreError> {
        self.state.lock().unwrap().sessions += 1;
        Ok(Box::new(RecordingGateway { state: Arc::clone(&self.state) }))
    }
}

struct RecordingGateway {
    state: Arc<Mutex<Recorded>>,
}

impl RecordingGateway {
    fn check(&self) -> Result<(), StoreError> {
        let (failing, panicking) = {
            let state = self.state.lock().unwrap();
            (state.failing, state.panicking)
        };
        if panicking {
            panic!("gateway blew up");
        }
        if failing {
            return Err(StoreError::Database(DieselError::DatabaseError(
                DatabaseErrorKind::Unknown,
                Box::new(STORE_FAILURE.to_string()),
            )));
        }
        Ok(())
    }
}

impl Gateway for RecordingGateway {
    fn call_procedure(&mut self, procedure: Procedure, args: Vec<Arg>) -> Result<(), StoreError> {
        self.check()?;
        self.state.lock().unwrap().calls.push((procedure, args));
        Ok(())
    }

    fn query_rows(&mut self, function: TableFunction) -> Result<Vec<Row>, StoreError> {
        self.check()?;
        Ok(self.state.lock().unwrap().rows.get(&function).cloned().unwrap_or_default())
    }

    fn exists(&mut self, table: Table, id: i32) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.state.lock().unwrap().existing.contains(&(table, id)))
    }
}
