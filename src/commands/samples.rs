use super::{
    ask, log_type_request, ParserTools, SAMPLE_END_TITLE, SAMPLE_LOG_TYPE_TITLE,
    SAMPLE_MAX_TITLE, SAMPLE_START_TITLE,
};
use crate::document::Document;
use crate::error::{ParserError, Result};
use crate::frontend::{Frontend, InputRequest};
use crate::models::{SampleLogBatch, SampleLogsRequest};
use chrono::{DateTime, Duration, SecondsFormat, Utc};

pub const DEFAULT_MAX_ENTRIES: u32 = 10;
const DEFAULT_LOOKBACK_DAYS: i64 = 7;

fn iso_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn validate_timestamp(input: &str) -> std::result::Result<(), String> {
    DateTime::parse_from_rfc3339(input.trim())
        .map(|_| ())
        .map_err(|e| format!("expected an ISO-8601 timestamp: {}", e))
}

fn validate_max_entries(input: &str) -> std::result::Result<(), String> {
    match input.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err("expected a positive whole number".to_string()),
    }
}

impl ParserTools {
    /// Retrieve sample logs for a log type, one JSON entry per line
    pub(super) async fn sample(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let now = Utc::now();

        let log_type = ask(
            frontend,
            log_type_request(SAMPLE_LOG_TYPE_TITLE, "Retrieve logs for which data type?"),
        )?;

        let start_time = ask(
            frontend,
            InputRequest::new(
                SAMPLE_START_TITLE,
                "Retrieve logs starting at what datetime? (default: 7 days ago)",
            )
            .value(iso_timestamp(now - Duration::days(DEFAULT_LOOKBACK_DAYS)))
            .validate(validate_timestamp),
        )?;

        let end_time = ask(
            frontend,
            InputRequest::new(
                SAMPLE_END_TITLE,
                "Retrieve logs ending at what datetime? (default: now)",
            )
            .value(iso_timestamp(now))
            .validate(validate_timestamp),
        )?;

        let max_entries = ask(
            frontend,
            InputRequest::new(
                SAMPLE_MAX_TITLE,
                "Retrieve a maximum of how many samples? (default: 10)",
            )
            .value(DEFAULT_MAX_ENTRIES.to_string())
            .validate(validate_max_entries),
        )?;
        let max_entries = max_entries
            .trim()
            .parse::<u32>()
            .map_err(|e| ParserError::Decode(format!("max entries '{}': {}", max_entries, e)))?;

        let client = self.client()?;
        let body = serde_json::to_string(&SampleLogsRequest {
            log_type,
            start_time,
            end_time,
            max_entries,
        })?;
        let response = client.post(&client.sample_logs_url(), Some(body)).await?;

        let batch = SampleLogBatch::from_response(&response)?;
        tracing::info!("Retrieved {} sample logs", batch.data.len());

        Ok(batch.render()?.map(Document::untitled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_matches_javascript_format() {
        let time = DateTime::parse_from_rfc3339("2024-03-05T06:07:08.009Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(iso_timestamp(time), "2024-03-05T06:07:08.009Z");
    }

    #[test]
    fn test_validators() {
        assert!(validate_timestamp("2024-03-05T06:07:08.009Z").is_ok());
        assert!(validate_timestamp("last tuesday").is_err());
        assert!(validate_max_entries("10").is_ok());
        assert!(validate_max_entries("0").is_err());
        assert!(validate_max_entries("-3").is_err());
    }
}
