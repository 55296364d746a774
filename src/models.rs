//! Parser API payloads
//!
//! Typed views over the JSON the parser tooling API sends and expects, plus
//! the transforms applied before a response is displayed.

use crate::error::{ParserError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle state of a parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParserState {
    Active,
    Archived,
    Error,
    Pending,
    #[serde(other)]
    Unknown,
}

/// A parser configuration as returned by get, create and archive
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserConfig {
    pub config_id: String,
    #[serde(default)]
    pub log_type: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Base64 encoded parser source
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default)]
    pub state: Option<ParserState>,
}

impl ParserConfig {
    pub fn from_response(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| {
            ParserError::MalformedResponse(format!("Unexpected parser in API response: {}", e))
        })
    }

    /// Decoded parser source text
    pub fn decoded_config(&self) -> Result<String> {
        let encoded = self.config.as_deref().ok_or_else(|| {
            ParserError::MalformedResponse("No config found within API response".to_string())
        })?;
        decode_text(encoded)
    }
}

/// Drop the bulky `config` field from every parser in a list response.
///
/// Entry order and all other fields are kept as received.
pub fn parser_summaries(response: &Value) -> Result<Vec<Value>> {
    let parsers = response
        .get("cbnParsers")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ParserError::MalformedResponse("No parsers found.".to_string()))?;

    Ok(parsers
        .iter()
        .cloned()
        .map(|mut parser| {
            if let Some(obj) = parser.as_object_mut() {
                obj.shift_remove("config");
            }
            parser
        })
        .collect())
}

/// Body of a create request
#[derive(Debug, Clone, Serialize)]
pub struct CreateParserRequest {
    pub config: String,
    pub log_type: String,
    pub author: String,
}

/// Body of a validate request
#[derive(Debug, Clone, Serialize)]
pub struct ValidateParserRequest {
    pub config: String,
    pub logs: String,
}

/// Diagnostics returned by validate
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationResult {
    pub result: Vec<String>,
}

impl ValidationResult {
    pub fn from_response(value: &Value) -> Result<Self> {
        if value.get("result").is_none() {
            return Err(ParserError::MalformedResponse(
                "No results found within API response".to_string(),
            ));
        }
        Self::deserialize(value).map_err(|e| {
            ParserError::MalformedResponse(format!("Unexpected validation result: {}", e))
        })
    }

    /// Diagnostic lines already carry their own line breaks
    pub fn render(&self) -> String {
        self.result.concat()
    }
}

/// Body of a sample log request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleLogsRequest {
    pub log_type: String,
    pub start_time: String,
    pub end_time: String,
    pub max_entries: u32,
}

/// Sample logs returned by retrieveSampleLogs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleLogBatch {
    #[serde(default)]
    pub log_type: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub max_entries: Option<Value>,
    /// Base64 encoded log entries; omitted by the API when there are none
    #[serde(default)]
    pub data: Vec<String>,
}

impl SampleLogBatch {
    pub fn from_response(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| {
            ParserError::MalformedResponse(format!("Unexpected sample log response: {}", e))
        })
    }

    /// One compact JSON document per line, or `None` if there are no entries
    pub fn render(&self) -> Result<Option<String>> {
        let mut lines = String::new();
        for entry in &self.data {
            let decoded = decode_text(entry)?;
            let parsed: Value = serde_json::from_str(&decoded)
                .map_err(|e| ParserError::Decode(format!("sample log entry as JSON: {}", e)))?;
            lines.push_str(&serde_json::to_string(&parsed)?);
            lines.push('\n');
        }

        Ok(Some(lines).filter(|l| !l.is_empty()))
    }
}

pub fn encode_text(text: &str) -> String {
    BASE64.encode(text.as_bytes())
}

pub fn decode_text(encoded: &str) -> Result<String> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| ParserError::Decode(format!("base64 payload: {}", e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Pretty JSON with two-space indentation
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parser_config_decodes() {
        let response = json!({
            "configId": "12345678-abcd-1234-abcd-1234567890ab",
            "logType": "WINDOWS_DNS",
            "author": "jane",
            "config": encode_text("filter {}\n"),
            "state": "ACTIVE",
            "createTime": "2021-01-01T00:00:00Z"
        });
        let parser = ParserConfig::from_response(&response).unwrap();
        assert_eq!(parser.state, Some(ParserState::Active));
        assert_eq!(parser.decoded_config().unwrap(), "filter {}\n");
    }

    #[test]
    fn test_unknown_state_is_tolerated() {
        let parser =
            ParserConfig::from_response(&json!({"configId": "x", "state": "LIVE"})).unwrap();
        assert_eq!(parser.state, Some(ParserState::Unknown));
    }

    #[test]
    fn test_missing_config_id_is_malformed() {
        let err = ParserConfig::from_response(&json!({"logType": "X"})).unwrap_err();
        assert!(matches!(err, ParserError::MalformedResponse(_)));
    }

    #[test]
    fn test_summaries_strip_config_only() {
        let response = json!({
            "cbnParsers": [
                {"configId": "b", "config": "Zm9v", "state": "ACTIVE"},
                {"configId": "a", "logType": "X"}
            ]
        });
        let summaries = parser_summaries(&response).unwrap();
        assert_eq!(
            summaries,
            vec![
                json!({"configId": "b", "state": "ACTIVE"}),
                json!({"configId": "a", "logType": "X"})
            ]
        );
    }

    #[test]
    fn test_summaries_without_list_is_malformed() {
        let err = parser_summaries(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "No parsers found.");
    }

    #[test]
    fn test_validation_result() {
        let result =
            ValidationResult::from_response(&json!({"result": ["line 1\n", "line 2\n"]})).unwrap();
        assert_eq!(result.render(), "line 1\nline 2\n");

        let err = ValidationResult::from_response(&json!({"errors": []})).unwrap_err();
        assert_eq!(err.to_string(), "No results found within API response");
    }

    #[test]
    fn test_sample_render_one_line_per_entry() {
        let batch = SampleLogBatch::from_response(&json!({
            "data": [encode_text(r#"{ "a" : 1 }"#), encode_text(r#"{"b": [1, 2]}"#)]
        }))
        .unwrap();
        assert_eq!(batch.render().unwrap().unwrap(), "{\"a\":1}\n{\"b\":[1,2]}\n");
    }

    #[test]
    fn test_sample_without_entries_renders_nothing() {
        let batch = SampleLogBatch::from_response(&json!({"data": []})).unwrap();
        assert_eq!(batch.render().unwrap(), None);

        let batch = SampleLogBatch::from_response(&json!({})).unwrap();
        assert_eq!(batch.render().unwrap(), None);
    }

    #[test]
    fn test_sample_entry_that_is_not_json_fails() {
        let batch = SampleLogBatch {
            data: vec![encode_text("plain text")],
            ..Default::default()
        };
        assert!(matches!(batch.render(), Err(ParserError::Decode(_))));
    }

    #[test]
    fn test_sample_request_body() {
        let body = SampleLogsRequest {
            log_type: "WINDOWS_DNS".into(),
            start_time: "2024-01-01T00:00:00.000Z".into(),
            end_time: "2024-01-08T00:00:00.000Z".into(),
            max_entries: 10,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "log_type": "WINDOWS_DNS",
                "start_time": "2024-01-01T00:00:00.000Z",
                "end_time": "2024-01-08T00:00:00.000Z",
                "max_entries": 10
            })
        );
    }
}
