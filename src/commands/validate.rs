use super::{ParserTools, VALIDATE_CONF_TITLE, VALIDATE_LOG_TITLE};
use crate::document::Document;
use crate::error::Result;
use crate::frontend::Frontend;
use crate::models::{ValidateParserRequest, ValidationResult};

impl ParserTools {
    /// Run an open `.conf` parser against an open `.log` file on the server
    pub(super) async fn validate(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let config = self.pick_encoded_file(frontend, "conf", VALIDATE_CONF_TITLE)?;
        let logs = self.pick_encoded_file(frontend, "log", VALIDATE_LOG_TITLE)?;

        let client = self.client()?;
        let body = serde_json::to_string(&ValidateParserRequest { config, logs })?;
        let response = client.post(&client.validate_url(), Some(body)).await?;

        let result = ValidationResult::from_response(&response)?;
        tracing::info!("Validation returned {} lines", result.result.len());

        Ok(Some(Document::list(&result.render())))
    }
}
