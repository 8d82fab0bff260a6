//! Transfer shapes of the books module.
//!
//! The gateway owns no book data; these are the upstream protobuf messages,
//! which double as the JSON bodies on the HTTP side.

pub use book_gateway_upstream::{
    Book, CreateBookRequest, DeleteBookRequest, GetAllBooksRequest, GetAllBooksResponse,
    GetBookByIdRequest, IdTracker, UpdateBookRequest,
};

/// Page size used when `limit` is absent.
pub const DEFAULT_LIMIT: i32 = 10;
/// Offset used when `offset` is absent.
pub const DEFAULT_OFFSET: i32 = 0;

/// List request before any query parameter is applied.
pub fn default_list_request() -> GetAllBooksRequest {
    GetAllBooksRequest {
        limit: DEFAULT_LIMIT,
        offset: DEFAULT_OFFSET,
        search: String::new(),
    }
}
