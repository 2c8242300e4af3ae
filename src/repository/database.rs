use diesel::dsl::exists;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::sql_types::{Date, Integer, Text};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::models::project::ProjectRow;
use crate::models::todo::TodoRow;
use crate::repository::gateway::{Arg, Gateway, Procedure, Row, Store, StoreError, Table, TableFunction};
use crate::repository::schema::{projects, todos};

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
        let pool: DBPool = r2d2::Pool::builder()
            .max_size(config.pool_size)
            .build(manager)?;
        Ok(Database { pool })
    }
}

impl Store for Database {
    fn session(&self) -> Result<Box<dyn Gateway>, StoreError> {
        let conn = self.pool.get()?;
        Ok(Box::new(PgGateway { conn }))
    }
}

pub struct PgGateway {
    conn: PooledConnection<ConnectionManager<PgConnection>>,
}

impl Gateway for PgGateway {
    fn call_procedure(&mut self, procedure: Procedure, args: Vec<Arg>) -> Result<(), StoreError> {
        let placeholders = (1..=args.len())
            .map(|n| format!("${n}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT * FROM {}({placeholders})", procedure.as_str());
        debug!(%sql, "calling procedure");

        let mut query = diesel::sql_query(sql).into_boxed::<Pg>();
        for arg in args {
            query = match arg {
                Arg::Int(value) => query.bind::<Integer, _>(value),
                Arg::Text(value) => query.bind::<Text, _>(value),
                Arg::Date(value) => query.bind::<Date, _>(value),
            };
        }
        query.execute(&mut self.conn)?;
        Ok(())
    }

    fn query_rows(&mut self, function: TableFunction) -> Result<Vec<Row>, StoreError> {
        let sql = format!("SELECT * FROM {}()", function.as_str());
        match function {
            TableFunction::ListProjects => {
                into_rows(diesel::sql_query(sql).load::<ProjectRow>(&mut self.conn)?)
            }
            TableFunction::GetAllTodos => {
                into_rows(diesel::sql_query(sql).load::<TodoRow>(&mut self.conn)?)
            }
        }
    }

    fn exists(&mut self, table: Table, id: i32) -> Result<bool, StoreError> {
        let found = match table {
            Table::Projects => diesel::select(exists(projects::table.filter(projects::id.eq(id))))
                .get_result::<bool>(&mut self.conn)?,
            Table::Todos => diesel::select(exists(todos::table.filter(todos::id.eq(id))))
                .get_result::<bool>(&mut self.conn)?,
        };
        Ok(found)
    }
}

fn into_rows<T: Serialize>(records: Vec<T>) -> Result<Vec<Row>, StoreError> {
    records
        .into_iter()
        .map(|record| Ok(serde_json::from_value(serde_json::to_value(record)?)?))
        .collect()
}
