//! Parser resource commands

use super::{
    ask, config_id_request, log_type_request, ParserTools, ARCHIVE_TITLE, CREATE_CONF_TITLE,
    CREATE_LOG_TYPE_TITLE, DOWNLOAD_TITLE, HISTORY_TITLE,
};
use crate::document::Document;
use crate::error::{ParserError, Result};
use crate::frontend::Frontend;
use crate::models::{parser_summaries, to_pretty_json, CreateParserRequest, ParserConfig};

impl ParserTools {
    /// List all parsers without their config payloads
    pub(super) async fn list(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let client = self.client()?;
        let response = client.get(&client.parsers_url()).await?;

        let summaries = match parser_summaries(&response) {
            Ok(summaries) => summaries,
            Err(ParserError::MalformedResponse(message)) => {
                frontend.show_info(&message);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        tracing::info!("Listed {} parsers", summaries.len());
        Ok(Some(Document::list(&to_pretty_json(&summaries)?)))
    }

    /// Fetch the parser created last in this workspace
    pub(super) async fn get(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let Some(config_id) = self.session.current_config_id().map(str::to_string) else {
            frontend.show_info("No parser has been created in this workspace yet.");
            return Ok(None);
        };

        let client = self.client()?;
        let response = client.get(&client.parser_url(&config_id)).await?;

        Ok(Some(Document::get(&to_pretty_json(&response)?)))
    }

    /// Fetch a parser and show its decoded config text
    pub(super) async fn download(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let config_id = ask(
            frontend,
            config_id_request(DOWNLOAD_TITLE, "Enter a configId (UUID) to download"),
        )?;

        let client = self.client()?;
        let response = client.get(&client.parser_url(&config_id)).await?;
        let parser = ParserConfig::from_response(&response)?;

        Ok(Some(Document::untitled(parser.decoded_config()?)))
    }

    pub(super) async fn archive(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let config_id = ask(
            frontend,
            config_id_request(ARCHIVE_TITLE, "Enter a configId (UUID) to archive"),
        )?;

        let client = self.client()?;
        let response = client.post(&client.archive_url(&config_id), None).await?;
        tracing::info!("Archived parser {}", config_id);

        Ok(Some(Document::get(&to_pretty_json(&response)?)))
    }

    /// Upload an open `.conf` document as a new parser and remember its id
    pub(super) async fn create(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        self.session.clear_config_id();

        let author = self
            .config
            .author()
            .ok_or(ParserError::ConfigurationMissing { setting: "Author" })?
            .to_string();

        let config = self.pick_encoded_file(frontend, "conf", CREATE_CONF_TITLE)?;

        let log_type = ask(
            frontend,
            log_type_request(CREATE_LOG_TYPE_TITLE, "Enter a data type for the new parser"),
        )?;

        let client = self.client()?;
        let body = serde_json::to_string(&CreateParserRequest {
            config,
            log_type,
            author,
        })?;
        let response = client.post(&client.parsers_url(), Some(body)).await?;

        let created = ParserConfig::from_response(&response)?;
        tracing::info!("Created parser {}", created.config_id);
        self.session.set_config_id(&created.config_id);

        Ok(Some(Document::get(&to_pretty_json(&response)?)))
    }

    pub(super) async fn history(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let log_type = ask(
            frontend,
            log_type_request(HISTORY_TITLE, "Enter a data type to retrieve its parser history"),
        )?;

        let client = self.client()?;
        let response = client.get(&client.history_url(&log_type)?).await?;

        Ok(Some(Document::history(&to_pretty_json(&response)?)))
    }
}
