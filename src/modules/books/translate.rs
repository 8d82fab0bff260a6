//! HTTP input → upstream call arguments.
//!
//! Nothing here talks to the Book service; every function either returns the
//! request to send or a client error that stops the request with a 400.

use book_gateway_http::GatewayError;
use serde::de::DeserializeOwned;

use super::models::{
    default_list_request, CreateBookRequest, DeleteBookRequest, GetAllBooksRequest,
    GetBookByIdRequest, UpdateBookRequest,
};

pub const CREATE_BAD_BODY: &str = "could not bind json with struct (CreateBook)";
pub const UPDATE_BAD_BODY: &str = "could not bind json with struct (UpdateBook)";
pub const LIST_BAD_OFFSET: &str = "invalid offset (GetAllBooks)";
pub const LIST_BAD_LIMIT: &str = "invalid limit (GetAllBooks)";
pub const LIST_BAD_QUERY: &str = "invalid query (GetAllBooks)";

pub fn create_book(body: &[u8]) -> Result<CreateBookRequest, GatewayError> {
    parse_json(body, CREATE_BAD_BODY)
}

/// Offset, then limit, then search; the first bad value aborts the request.
pub fn get_all_books(params: &[(String, String)]) -> Result<GetAllBooksRequest, GatewayError> {
    let mut request = default_list_request();

    if let Some(raw) = first(params, "offset") {
        request.offset = parse_int("offset", raw, LIST_BAD_OFFSET)?;
    }

    if let Some(raw) = first(params, "limit") {
        request.limit = parse_int("limit", raw, LIST_BAD_LIMIT)?;
    }

    if let Some(search) = first(params, "search") {
        request.search = search.to_string();
    }

    Ok(request)
}

pub fn get_book_by_id(id: String) -> GetBookByIdRequest {
    GetBookByIdRequest { id }
}

/// The body is checked before the path id is looked at.
pub fn parse_update_body(body: &[u8]) -> Result<UpdateBookRequest, GatewayError> {
    parse_json(body, UPDATE_BAD_BODY)
}

/// The path id replaces any `id` carried in the body.
pub fn update_book(id: String, mut request: UpdateBookRequest) -> UpdateBookRequest {
    request.id = id;
    request
}

pub fn delete_book(id: String) -> DeleteBookRequest {
    DeleteBookRequest { id }
}

fn parse_json<T: DeserializeOwned>(body: &[u8], message: &'static str) -> Result<T, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GatewayError::client(message, "request body is empty"));
    }
    serde_json::from_slice(body).map_err(|err| GatewayError::client(message, err))
}

fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

fn parse_int(field: &str, raw: &str, message: &'static str) -> Result<i32, GatewayError> {
    raw.parse::<i32>().map_err(|err| {
        GatewayError::client(message, format!("{}: parsing {:?}: {}", field, raw, err))
    })
}
