//! Client binding for the upstream `book_service.BookService` gRPC API.
//!
//! The HTTP layer talks to [`BookService`], an object-safe trait, so handlers
//! can hold an `Arc<dyn BookService>`. [`GrpcBookService`] is the production
//! implementation over a single shared tonic channel.

pub mod client;
pub mod error;
pub mod proto;
pub mod service;

pub use error::UpstreamError;
pub use proto::{
    Book, CreateBookRequest, DeleteBookRequest, GetAllBooksRequest, GetAllBooksResponse,
    GetBookByIdRequest, IdTracker, UpdateBookRequest,
};
pub use service::{BookService, CallCtx, GrpcBookService};
