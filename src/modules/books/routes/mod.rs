//! Route table and handlers of the books module.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use book_gateway_http::{Envelope, GatewayError};
use book_gateway_upstream::{BookService, CallCtx, UpstreamError};

use super::models::{Book, GetAllBooksResponse, IdTracker};
use super::translate;
use crate::utils;

const CREATE_FAILED: &str = "cannot create book";
const LIST_FAILED: &str = "could not get all books (GetAllBooks)";
const GET_FAILED: &str = "could not get book by id (GetBookByID)";
const UPDATE_FAILED: &str = "cannot update book";
const DELETE_FAILED: &str = "could not delete book by id (DeleteBook)";

/// Shared by every handler; cloning copies the `Arc`, never the connection.
#[derive(Clone)]
pub struct BookState {
    service: Arc<dyn BookService>,
    call_timeout: Duration,
}

impl BookState {
    pub fn new(service: Arc<dyn BookService>, call_timeout: Duration) -> Self {
        Self {
            service,
            call_timeout,
        }
    }

    fn call_ctx(&self, headers: &HeaderMap) -> CallCtx {
        let ctx = CallCtx::new(self.call_timeout);
        match utils::request_id(headers) {
            Some(id) => ctx.with_request_id(id),
            None => ctx,
        }
    }
}

pub fn router(state: BookState) -> Router {
    Router::new()
        .route("/book", post(create_book).get(get_all_books))
        .route(
            "/book/{id}",
            get(get_book_by_id).put(update_book).delete(delete_book),
        )
        .with_state(state)
}

/// A body that could not be read is reported like one that could not be parsed.
fn read_body(
    body: Result<Bytes, BytesRejection>,
    message: &'static str,
) -> Result<Bytes, GatewayError> {
    body.map_err(|rejection| GatewayError::client(message, rejection.body_text()))
}

/// An id that cannot be decoded is never sent; the call fails the way an
/// unencodable argument fails upstream.
fn path_id(
    path: Result<Path<String>, PathRejection>,
    message: &'static str,
) -> Result<String, GatewayError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        GatewayError::upstream(message, UpstreamError::unencodable(rejection.body_text()))
    })
}

async fn create_book(
    State(state): State<BookState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope<IdTracker>, GatewayError> {
    let body = read_body(body, translate::CREATE_BAD_BODY)?;
    let request = translate::create_book(&body)?;

    let tracker = state
        .service
        .create_book(&state.call_ctx(&headers), request)
        .await
        .map_err(|err| GatewayError::upstream(CREATE_FAILED, err))?;

    Ok(Envelope::success(StatusCode::CREATED, "book created", tracker))
}

async fn get_all_books(
    State(state): State<BookState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Envelope<GetAllBooksResponse>, GatewayError> {
    let Query(params) = query.map_err(|rejection| {
        GatewayError::client(translate::LIST_BAD_QUERY, rejection.body_text())
    })?;
    let request = translate::get_all_books(&params)?;

    let books = state
        .service
        .get_all_books(&state.call_ctx(&headers), request)
        .await
        .map_err(|err| GatewayError::upstream(LIST_FAILED, err))?;

    Ok(Envelope::success(StatusCode::OK, "got all books", books))
}

async fn get_book_by_id(
    State(state): State<BookState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Book>, GatewayError> {
    let id = path_id(path, GET_FAILED)?;
    let book = state
        .service
        .get_book_by_id(&state.call_ctx(&headers), translate::get_book_by_id(id))
        .await
        .map_err(|err| GatewayError::upstream(GET_FAILED, err))?;

    Ok(Envelope::success(StatusCode::OK, "got book by id", book))
}

async fn update_book(
    State(state): State<BookState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope<IdTracker>, GatewayError> {
    let body = read_body(body, translate::UPDATE_BAD_BODY)?;
    let request = translate::parse_update_body(&body)?;
    let request = translate::update_book(path_id(path, UPDATE_FAILED)?, request);

    let tracker = state
        .service
        .update_book(&state.call_ctx(&headers), request)
        .await
        .map_err(|err| GatewayError::upstream(UPDATE_FAILED, err))?;

    Ok(Envelope::success(StatusCode::CREATED, "book updated", tracker))
}

async fn delete_book(
    State(state): State<BookState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Envelope<IdTracker>, GatewayError> {
    let id = path_id(path, DELETE_FAILED)?;
    let tracker = state
        .service
        .delete_book(&state.call_ctx(&headers), translate::delete_book(id))
        .await
        .map_err(|err| GatewayError::upstream(DELETE_FAILED, err))?;

    Ok(Envelope::success(StatusCode::OK, "deleted book by id", tracker))
}
