pub mod database;
pub mod gateway;
pub mod schema;

#[cfg(test)]
pub mod recording;
