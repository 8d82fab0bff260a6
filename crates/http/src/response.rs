//! Uniform JSON envelope for every gateway response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

/// `{"code": .., "message": .., "data": ..}` or
/// `{"code": .., "message": .., "error": ..}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    #[serde(serialize_with = "serialize_status")]
    pub code: StatusCode,
    pub message: String,
    #[serde(flatten)]
    pub payload: Payload<T>,
}

/// Exactly one of the two is present in a serialized envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload<T> {
    Data(T),
    Error(String),
}

impl<T> Envelope<T> {
    pub fn success(code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            message: message.into(),
            payload: Payload::Data(data),
        }
    }

    pub fn failure(code: StatusCode, message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            payload: Payload::Error(error.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_has_data_and_no_error() {
        let envelope = Envelope::success(StatusCode::CREATED, "book created", json!({"id": "b-1"}));
        assert!(matches!(envelope.payload, Payload::Data(_)));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"code": 201, "message": "book created", "data": {"id": "b-1"}})
        );
    }

    #[test]
    fn failure_envelope_has_error_and_no_data() {
        let envelope =
            Envelope::<()>::failure(StatusCode::BAD_REQUEST, "invalid limit (GetAllBooks)", "boom");
        assert!(matches!(envelope.payload, Payload::Error(_)));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"code": 400, "message": "invalid limit (GetAllBooks)", "error": "boom"})
        );
    }

    #[test]
    fn response_status_matches_envelope_code() {
        let response = Envelope::success(StatusCode::OK, "got book by id", ()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
