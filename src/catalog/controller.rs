use axum::{
    body::HttpBody,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::Json,
    routing::get,
    BoxError, Router,
};
use serde_json::Value;
use crate::books::validation::{validate_book, ValidationMode};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest, ListBooksCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::catalog::domain::CatalogService;
use crate::catalog::factory;
use crate::core::command::{Command, CommandError};
use crate::core::controller::{AppState, json_to_server_error, rejection_to_server_error, ServerError};

// generic over the request body so the same routes serve axum and the lambda runtime
pub fn build_router<B>(state: AppState) -> Router<(), B>
    where B: HttpBody + Send + 'static,
          B::Data: Send,
          B::Error: Into<BoxError> {
    Router::new()
        .route("/books", get(find_books).post(add_book))
        .route("/books/:isbn",
               get(find_book_by_isbn).put(update_book).delete(remove_book))
        .with_state(state)
}

fn build_service(state: &AppState) -> Box<dyn CatalogService> {
    factory::create_catalog_service(&state.config, state.pool.clone())
}

// checks the body against the book schema before anything reaches the store
fn validated_body(json: Result<Json<Value>, JsonRejection>, mode: ValidationMode) -> Result<Value, ServerError> {
    let Json(body) = json.map_err(rejection_to_server_error)?;
    validate_book(&body, mode).map_err(|err| ServerError::from(CommandError::from(err)))?;
    Ok(body)
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let body = validated_body(json, ValidationMode::Create)?;
    let req: AddBookCommandRequest = serde_json::from_value(body).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(build_service(&state)).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn find_books(
    State(state): State<AppState>) -> Result<Json<ListBooksCommandResponse>, ServerError> {
    let res = ListBooksCommand::new(build_service(&state)).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest::new(isbn);
    let res = GetBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    json: Result<Json<Value>, JsonRejection>) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let body = validated_body(json, ValidationMode::Update)?;
    let req: UpdateBookCommandRequest = serde_json::from_value(body).map_err(json_to_server_error)?;
    let res = UpdateBookCommand::new(build_service(&state)).execute(req.with_isbn(isbn.as_str())).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest::new(isbn);
    let res = RemoveBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}
