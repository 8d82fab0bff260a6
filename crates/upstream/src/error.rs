//! Errors raised by the upstream binding.

use thiserror::Error;
use tonic::Status;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid book service endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to connect to book service at {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    /// Any status returned by, or on behalf of, a remote call.
    #[error("rpc error: code = {:?} desc = {}", .0.code(), .0.message())]
    Rpc(#[from] Status),
}

impl UpstreamError {
    pub(crate) fn invalid_endpoint(endpoint: &str, err: &dyn std::error::Error) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: error_chain(err),
        }
    }

    pub(crate) fn connect(endpoint: &str, err: &dyn std::error::Error) -> Self {
        Self::Connect {
            endpoint: endpoint.to_string(),
            reason: error_chain(err),
        }
    }

    /// A request argument that cannot be put on the wire, reported the way
    /// the gRPC runtime reports marshaling failures.
    pub fn unencodable(reason: impl std::fmt::Display) -> Self {
        Self::Rpc(Status::internal(format!(
            "grpc: error while marshaling: {}",
            reason
        )))
    }
}

/// Transport errors keep the useful part in their sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_text_carries_code_and_message() {
        let err = UpstreamError::from(Status::not_found("book not found"));
        assert_eq!(err.to_string(), "rpc error: code = NotFound desc = book not found");
        assert!(matches!(err, UpstreamError::Rpc(ref status) if status.code() == tonic::Code::NotFound));
    }

    #[test]
    fn unencodable_argument_reads_as_internal_rpc_error() {
        let err = UpstreamError::unencodable("invalid UTF-8 in `id`");
        assert_eq!(
            err.to_string(),
            "rpc error: code = Internal desc = grpc: error while marshaling: invalid UTF-8 in `id`"
        );
    }

    #[test]
    fn error_chain_joins_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = UpstreamError::connect("http://localhost:6060", &inner);
        assert_eq!(
            outer.to_string(),
            "failed to connect to book service at http://localhost:6060: refused"
        );
        assert!(matches!(outer, UpstreamError::Connect { .. }));
    }
}
