use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::Value;

use crate::error::{ApiError, Detail};
use crate::handlers::{projects, todos};
use crate::repository::gateway::Store;

/// Runs a handler on the blocking pool, where the store session lives and dies.
async fn blocking<T, F>(store: web::Data<dyn Store>, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&dyn Store) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || op(store.get_ref())).await?
}

#[post("/projects/create/")]
pub async fn create_project(store: web::Data<dyn Store>, body: web::Json<Value>) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let project = blocking(store, move |store| projects::create_project(store, &body)).await?;
    Ok(HttpResponse::Created().json(project))
}

#[get("/projects/")]
pub async fn list_projects(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let rows = blocking(store, projects::list_projects).await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn edit_project(
    store: web::Data<dyn Store>,
    id: web::Path<i32>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let (id, body) = (id.into_inner(), body.into_inner());
    let project = blocking(store, move |store| projects::edit_project(store, id, &body)).await?;
    Ok(HttpResponse::Ok().json(project))
}

pub async fn delete_project(store: web::Data<dyn Store>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    blocking(store, move |store| projects::delete_project(store, id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/todos/create/")]
pub async fn create_todo(store: web::Data<dyn Store>, body: web::Json<Value>) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let todo = blocking(store, move |store| todos::create_todo(store, &body)).await?;
    Ok(HttpResponse::Created().json(todo))
}

#[get("/todos/")]
pub async fn list_todos(store: web::Data<dyn Store>) -> Result<HttpResponse, ApiError> {
    let rows = blocking(store, todos::list_todos).await?;
    Ok(HttpResponse::Ok().json(rows))
}

pub async fn edit_todo(
    store: web::Data<dyn Store>,
    id: web::Path<i32>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let (id, body) = (id.into_inner(), body.into_inner());
    let todo = blocking(store, move |store| todos::edit_todo(store, id, &body)).await?;
    Ok(HttpResponse::Ok().json(todo))
}

#[delete("/todos/{id}/")]
pub async fn delete_todo(store: web::Data<dyn Store>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    blocking(store, move |store| todos::delete_todo(store, id)).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/todo/completed/{id}/")]
pub async fn toggle_todo_completion(
    store: web::Data<dyn Store>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let detail = blocking(store, move |store| todos::toggle_todo_completion(store, &id)).await?;
    Ok(HttpResponse::Ok().json(Detail::new(detail)))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(create_project)
            .service(list_projects)
            .service(
                web::resource("/projects/edit/{id}/")
                    .route(web::patch().to(edit_project))
                    .route(web::put().to(edit_project)),
            )
            .service(
                web::resource("/projects/{id}/")
                    .route(web::patch().to(edit_project))
                    .route(web::put().to(edit_project))
                    .route(web::delete().to(delete_project)),
            )
            .service(create_todo)
            .service(list_todos)
            .service(
                web::resource("/todos/edit/{id}/")
                    .route(web::patch().to(edit_todo))
                    .route(web::put().to(edit_todo)),
            )
            .service(delete_todo)
            .service(toggle_todo_completion),
    );
}
