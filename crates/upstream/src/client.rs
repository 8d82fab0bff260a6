//! Typed tonic client for `book_service.BookService`.

use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{GrpcMethod, IntoRequest, Response, Status};

use crate::proto::{
    Book, CreateBookRequest, DeleteBookRequest, GetAllBooksRequest, GetAllBooksResponse,
    GetBookByIdRequest, IdTracker, UpdateBookRequest,
};

const SERVICE: &str = "book_service.BookService";

/// Unary client over a shared [`Channel`].
///
/// Cloning is cheap: clones share the underlying HTTP/2 connection.
#[derive(Debug, Clone)]
pub struct BookServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl BookServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn create_book(
        &mut self,
        request: impl IntoRequest<CreateBookRequest>,
    ) -> Result<Response<IdTracker>, Status> {
        self.unary(
            request.into_request(),
            "CreateBook",
            "/book_service.BookService/CreateBook",
        )
        .await
    }

    pub async fn get_all_books(
        &mut self,
        request: impl IntoRequest<GetAllBooksRequest>,
    ) -> Result<Response<GetAllBooksResponse>, Status> {
        self.unary(
            request.into_request(),
            "GetAllBooks",
            "/book_service.BookService/GetAllBooks",
        )
        .await
    }

    pub async fn get_book_by_id(
        &mut self,
        request: impl IntoRequest<GetBookByIdRequest>,
    ) -> Result<Response<Book>, Status> {
        self.unary(
            request.into_request(),
            "GetBookByID",
            "/book_service.BookService/GetBookByID",
        )
        .await
    }

    pub async fn update_book(
        &mut self,
        request: impl IntoRequest<UpdateBookRequest>,
    ) -> Result<Response<IdTracker>, Status> {
        self.unary(
            request.into_request(),
            "UpdateBook",
            "/book_service.BookService/UpdateBook",
        )
        .await
    }

    pub async fn delete_book(
        &mut self,
        request: impl IntoRequest<DeleteBookRequest>,
    ) -> Result<Response<IdTracker>, Status> {
        self.unary(
            request.into_request(),
            "DeleteBook",
            "/book_service.BookService/DeleteBook",
        )
        .await
    }

    async fn unary<Req, Resp>(
        &mut self,
        mut request: tonic::Request<Req>,
        method: &'static str,
        path: &'static str,
    ) -> Result<Response<Resp>, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {}", e)))?;

        let codec = tonic::codec::ProstCodec::default();
        request
            .extensions_mut()
            .insert(GrpcMethod::new(SERVICE, method));

        self.inner
            .unary(request, PathAndQuery::from_static(path), codec)
            .await
    }
}
