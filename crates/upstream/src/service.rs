//! The [`BookService`] seam and its gRPC implementation.

use std::time::Duration;

use async_trait::async_trait;
use book_gateway_kernel::settings::BookServiceSettings;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::transport::Endpoint;
use tonic::Request;

use crate::client::BookServiceClient;
use crate::error::UpstreamError;
use crate::proto::{
    Book, CreateBookRequest, DeleteBookRequest, GetAllBooksRequest, GetAllBooksResponse,
    GetBookByIdRequest, IdTracker, UpdateBookRequest,
};

const REQUEST_ID_METADATA: &str = "x-request-id";

/// Per-request call options.
///
/// The deadline is sent upstream as `grpc-timeout`. Cancellation needs no
/// field here: dropping the call future resets the HTTP/2 stream.
#[derive(Debug, Clone, Default)]
pub struct CallCtx {
    pub timeout: Option<Duration>,
    pub request_id: Option<String>,
}

impl CallCtx {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            request_id: None,
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        if let Some(timeout) = self.timeout {
            request.set_timeout(timeout);
        }
        if let Some(value) = self
            .request_id
            .as_deref()
            .and_then(|id| id.parse::<MetadataValue<Ascii>>().ok())
        {
            request.metadata_mut().insert(REQUEST_ID_METADATA, value);
        }
        request
    }
}

/// Remote operations of the Book service.
#[async_trait]
pub trait BookService: Send + Sync {
    async fn create_book(
        &self,
        ctx: &CallCtx,
        request: CreateBookRequest,
    ) -> Result<IdTracker, UpstreamError>;

    async fn get_all_books(
        &self,
        ctx: &CallCtx,
        request: GetAllBooksRequest,
    ) -> Result<GetAllBooksResponse, UpstreamError>;

    async fn get_book_by_id(
        &self,
        ctx: &CallCtx,
        request: GetBookByIdRequest,
    ) -> Result<Book, UpstreamError>;

    async fn update_book(
        &self,
        ctx: &CallCtx,
        request: UpdateBookRequest,
    ) -> Result<IdTracker, UpstreamError>;

    async fn delete_book(
        &self,
        ctx: &CallCtx,
        request: DeleteBookRequest,
    ) -> Result<IdTracker, UpstreamError>;
}

/// [`BookService`] backed by one plaintext tonic channel.
#[derive(Debug, Clone)]
pub struct GrpcBookService {
    client: BookServiceClient,
    endpoint: String,
}

impl GrpcBookService {
    /// Dial the Book service and wait for the connection to come up.
    pub async fn connect(settings: &BookServiceSettings) -> Result<Self, UpstreamError> {
        let endpoint = settings.endpoint();

        let channel = Endpoint::from_shared(endpoint.clone())
            .map_err(|e| UpstreamError::invalid_endpoint(&endpoint, &e))?
            .connect_timeout(settings.connect_timeout())
            .connect()
            .await
            .map_err(|e| UpstreamError::connect(&endpoint, &e))?;

        tracing::info!(endpoint = %endpoint, "connected to book service");

        Ok(Self {
            client: BookServiceClient::new(channel),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookService for GrpcBookService {
    async fn create_book(
        &self,
        ctx: &CallCtx,
        request: CreateBookRequest,
    ) -> Result<IdTracker, UpstreamError> {
        tracing::debug!(name = %request.name, "CreateBook");
        let response = self.client.clone().create_book(ctx.request(request)).await?;
        Ok(response.into_inner())
    }

    async fn get_all_books(
        &self,
        ctx: &CallCtx,
        request: GetAllBooksRequest,
    ) -> Result<GetAllBooksResponse, UpstreamError> {
        tracing::debug!(
            limit = request.limit,
            offset = request.offset,
            search = %request.search,
            "GetAllBooks"
        );
        let response = self
            .client
            .clone()
            .get_all_books(ctx.request(request))
            .await?;
        Ok(response.into_inner())
    }

    async fn get_book_by_id(
        &self,
        ctx: &CallCtx,
        request: GetBookByIdRequest,
    ) -> Result<Book, UpstreamError> {
        tracing::debug!(id = %request.id, "GetBookByID");
        let response = self
            .client
            .clone()
            .get_book_by_id(ctx.request(request))
            .await?;
        Ok(response.into_inner())
    }

    async fn update_book(
        &self,
        ctx: &CallCtx,
        request: UpdateBookRequest,
    ) -> Result<IdTracker, UpstreamError> {
        tracing::debug!(id = %request.id, "UpdateBook");
        let response = self.client.clone().update_book(ctx.request(request)).await?;
        Ok(response.into_inner())
    }

    async fn delete_book(
        &self,
        ctx: &CallCtx,
        request: DeleteBookRequest,
    ) -> Result<IdTracker, UpstreamError> {
        tracing::debug!(id = %request.id, "DeleteBook");
        let response = self.client.clone().delete_book(ctx.request(request)).await?;
        Ok(response.into_inner())
    }
}
