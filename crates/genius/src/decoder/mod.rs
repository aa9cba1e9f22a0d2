//! Status check and body parsing for a raw response.

use crate::model::{Payload, SUCCESS_STATUS};

/// Why a response did not yield a payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Status was not [`SUCCESS_STATUS`]; the body was not looked at.
    Status(u16),
    /// Status was fine but the body is not JSON.
    Body(String),
}

/// Decode a response. The status is checked before the body is parsed, so a
/// failed status with a garbage body reports the status.
pub fn decode(status: u16, body: &str) -> Result<Payload, DecodeError> {
    if status != SUCCESS_STATUS {
        return Err(DecodeError::Status(status));
    }
    serde_json::from_str::<serde_json::Value>(body)
        .map(Payload::from)
        .map_err(|err| DecodeError::Body(err.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_success_status_wins_over_bad_body() {
        assert_eq!(
            decode(500, "<html>error</html>"),
            Err(DecodeError::Status(500))
        );
        assert_eq!(decode(201, "{}"), Err(DecodeError::Status(201)));
    }

    #[test]
    fn unparsable_body_is_a_body_error() {
        assert!(matches!(decode(200, "<html>"), Err(DecodeError::Body(_))));
        assert!(matches!(decode(200, ""), Err(DecodeError::Body(_))));
    }

    #[test]
    fn parses_every_json_shape() {
        assert_eq!(
            decode(200, r#"{"a":1}"#).unwrap(),
            Payload::from(json!({"a": 1}))
        );
        assert_eq!(decode(200, "[1,2]").unwrap(), Payload::from(json!([1, 2])));
        assert_eq!(decode(200, "\"ok\"").unwrap(), Payload::Scalar(json!("ok")));
    }
}
