use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath, TrailingSlash};
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder, Result};
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::error::{ApiError, Detail, NOT_FOUND};
use crate::repository::database::Database;
use crate::repository::gateway::Store;

mod api;
mod config;
mod error;
mod handlers;
mod models;
mod repository;
mod telemetry;
mod validation;

#[derive(Serialize)]
pub struct Response {
    pub message: String,
}

#[get("/health/")]
async fn healthcheck() -> impl Responder {
    let response = Response {
        message: "Everything is working fine".to_string(),
    };
    HttpResponse::Ok().json(response)
}

async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(Detail::new(NOT_FOUND)))
}

pub fn app(
    store: web::Data<dyn Store>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(store)
        .app_data(web::JsonConfig::default().error_handler(|err, req| ApiError::from_json(err, req).into()))
        .app_data(web::PathConfig::default().error_handler(|_, _| ApiError::NotFound(NOT_FOUND).into()))
        .configure(api::api::config)
        .service(healthcheck)
        .default_service(web::route().to(not_found))
        .wrap(NormalizePath::new(TrailingSlash::Always))
        .wrap(Logger::default())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init(env!("CARGO_PKG_NAME"))?;

    let database = Database::new(&config)?;
    let store: web::Data<dyn Store> = web::Data::from(Arc::new(database) as Arc<dyn Store>);

    info!(host = %config.host, port = config.port, "starting server");
    HttpServer::new(move || app(store.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;
    Ok(())
}
