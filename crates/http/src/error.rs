//! Error handling for the gateway HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use book_gateway_upstream::UpstreamError;
use thiserror::Error;

use crate::response::Envelope;

/// Failure of a single gateway request.
///
/// `Client` is raised before any upstream call and maps to 400. `Upstream`
/// wraps whatever the remote call returned and always maps to 500, including
/// a not-found reported by the Book service.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{message}: {reason}")]
    Client {
        message: &'static str,
        reason: String,
    },

    #[error("{message}: {source}")]
    Upstream {
        message: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl GatewayError {
    /// Create a client error
    pub fn client(message: &'static str, reason: impl ToString) -> Self {
        Self::Client {
            message,
            reason: reason.to_string(),
        }
    }

    /// Create an upstream error
    pub fn upstream(message: &'static str, source: UpstreamError) -> Self {
        Self::Upstream { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Client { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed description of the failed operation
    pub fn message(&self) -> &'static str {
        match self {
            GatewayError::Client { message, .. } | GatewayError::Upstream { message, .. } => {
                message
            }
        }
    }

    /// Underlying error text, echoed to the caller unchanged
    pub fn detail(&self) -> String {
        match self {
            GatewayError::Client { reason, .. } => reason.clone(),
            GatewayError::Upstream { source, .. } => source.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        tracing::error!(
            status_code = %status.as_u16(),
            message = self.message(),
            error = %detail,
            "request failed"
        );

        Envelope::<()>::failure(status, self.message(), detail).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use tonic::Status;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn client_error_maps_to_400_with_reason() {
        let error = GatewayError::client("invalid offset (GetAllBooks)", "offset: bad digit");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["message"], "invalid offset (GetAllBooks)");
        assert_eq!(body["error"], "offset: bad digit");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn upstream_not_found_still_maps_to_500() {
        let error = GatewayError::upstream(
            "could not get book by id (GetBookByID)",
            UpstreamError::from(Status::not_found("no book with id 7")),
        );
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "rpc error: code = NotFound desc = no book with id 7"
        );
    }

    #[test]
    fn every_upstream_code_is_500() {
        for status in [
            Status::invalid_argument("bad isbn"),
            Status::unavailable("down"),
            Status::deadline_exceeded("slow"),
            Status::internal("oops"),
        ] {
            let error = GatewayError::upstream("cannot create book", status.into());
            assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
