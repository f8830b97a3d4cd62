use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

pub const SCHEMA_VERSION: &str = "ottmeta.v1";

#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeError {
    pub kind: &'static str,
    pub status: u16,
    pub message: String,
}

impl Envelope {
    pub fn success<T: Serialize>(op: &'static str, result: &T) -> Result<Self, serde_json::Error> {
        let res_val = serde_json::to_value(result)?;
        Ok(Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            success: true,
            result: Some(res_val),
            error: None,
        })
    }

    pub fn failure(op: &'static str, err: &ApiError) -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            success: false,
            result: None,
            error: Some(EnvelopeError { kind: err.kind(), status: err.status().as_u16(), message: err.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_success_envelope() {
        let result = json!({"posterUrl": "https://cdn.example/p.jpg"});
        let env = Envelope::success("poster", &result).expect("to serialize result");
        let s = serde_json::to_string(&env).unwrap();
        assert!(s.contains("\"schema_version\":\"ottmeta.v1\""));
        assert!(s.contains("\"success\":true"));
        assert!(s.contains("\"posterUrl\""));
        assert!(!s.contains("\"error\""));
    }

    #[test]
    fn serialize_failure_envelope() {
        let env = Envelope::failure("poster", &ApiError::NotFound("Page not found (HTTP 404)".into()));
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["success"], false);
        assert_eq!(v["error"]["status"], 404);
        assert_eq!(v["error"]["kind"], "not_found");
        assert!(v.get("result").is_none());
    }
}
