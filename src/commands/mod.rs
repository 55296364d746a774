//! Parser commands
//!
//! Every command gathers its input through the [`Frontend`], makes at most one
//! API request and produces a document to display. A dismissed prompt ends
//! the command quietly; any other failure is reported to the user.
//!
//! - [`parsers`] - list, get, download, archive, create, history
//! - [`samples`] - retrieve sample logs
//! - [`validate`] - validate a parser against local logs

mod parsers;
mod samples;
mod validate;

use crate::chronicle::client::ChronicleClient;
use crate::config::Config;
use crate::document::{Document, DocumentRegistry, GET_SCHEME};
use crate::error::{ParserError, Result};
use crate::frontend::{Frontend, InputRequest};
use crate::models::encode_text;
use crate::session::SessionState;
use crate::workspace::Workspace;

pub const DOWNLOAD_TITLE: &str = "Download Parser";
pub const ARCHIVE_TITLE: &str = "Archive Parser";
pub const HISTORY_TITLE: &str = "Parser History";
pub const CREATE_CONF_TITLE: &str = "Create Parser (1/2)";
pub const CREATE_LOG_TYPE_TITLE: &str = "Create Parser (2/2)";
pub const VALIDATE_CONF_TITLE: &str = "Validate Parser (1/2)";
pub const VALIDATE_LOG_TITLE: &str = "Validate Parser (2/2)";
pub const SAMPLE_LOG_TYPE_TITLE: &str = "Retrieve Sample Logs (1/4)";
pub const SAMPLE_START_TITLE: &str = "Retrieve Sample Logs (2/4)";
pub const SAMPLE_END_TITLE: &str = "Retrieve Sample Logs (3/4)";
pub const SAMPLE_MAX_TITLE: &str = "Retrieve Sample Logs (4/4)";

const PLACEHOLDER_CONFIG_ID: &str = "12345678-abcd-1234-abcd-1234567890ab";
const PLACEHOLDER_LOG_TYPE: &str = "DATA_TYPE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Get,
    Download,
    Archive,
    Create,
    Sample,
    Validate,
    History,
    /// Re-run get when the active document is a get document
    Refresh,
}

/// Command runner for one workspace session
pub struct ParserTools {
    config: Config,
    workspace: Workspace,
    session: SessionState,
    documents: DocumentRegistry,
}

impl ParserTools {
    pub fn new(config: Config, workspace: Workspace, session: SessionState) -> Self {
        Self {
            config,
            workspace,
            session,
            documents: DocumentRegistry::default(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn into_session(self) -> SessionState {
        self.session
    }

    pub fn documents(&self) -> &DocumentRegistry {
        &self.documents
    }

    /// Run a command, display its document and report failures.
    ///
    /// Returns the displayed document, if any. A returned error has already
    /// been shown to the user.
    pub async fn run(
        &mut self,
        command: Command,
        frontend: &mut dyn Frontend,
    ) -> Result<Option<Document>> {
        tracing::info!("Running {:?}", command);

        let result = match self.execute(command, frontend).await {
            Ok(Some(document)) => self.display(document, frontend).map(Some),
            other => other,
        };

        if let Err(e) = &result {
            report(e, frontend);
        }
        result
    }

    /// Run a command without displaying or reporting anything
    pub async fn execute(
        &mut self,
        command: Command,
        frontend: &mut dyn Frontend,
    ) -> Result<Option<Document>> {
        match command {
            Command::List => self.list(frontend).await,
            Command::Get => self.get(frontend).await,
            Command::Download => self.download(frontend).await,
            Command::Archive => self.archive(frontend).await,
            Command::Create => self.create(frontend).await,
            Command::Sample => self.sample(frontend).await,
            Command::Validate => self.validate(frontend).await,
            Command::History => self.history(frontend).await,
            Command::Refresh => self.refresh(frontend).await,
        }
    }

    async fn refresh(&mut self, frontend: &mut dyn Frontend) -> Result<Option<Document>> {
        let active_scheme = self
            .session
            .active_document
            .as_deref()
            .and_then(|uri| uri.split_once(':'))
            .map(|(scheme, _)| scheme);

        if active_scheme != Some(GET_SCHEME) {
            tracing::debug!("Refresh ignored, active document scheme is {:?}", active_scheme);
            return Ok(None);
        }

        self.get(frontend).await
    }

    fn display(&mut self, document: Document, frontend: &mut dyn Frontend) -> Result<Document> {
        let content = document.content(&self.documents)?;
        frontend.show_document(&document, &content)?;
        self.session.active_document = document.uri().map(str::to_string);
        Ok(document)
    }

    /// Client built from the settings as they are right now
    fn client(&self) -> Result<ChronicleClient> {
        ChronicleClient::from_config(&self.config)
    }

    /// Pick one open document by extension and return its base64 text
    fn pick_encoded_file(
        &self,
        frontend: &mut dyn Frontend,
        extension: &str,
        title: &str,
    ) -> Result<String> {
        let not_found = || ParserError::NoMatchingFiles {
            extension: extension.to_string(),
        };

        let files = self.workspace.documents_with_extension(extension);
        if files.is_empty() {
            return Err(not_found());
        }

        let placeholder = format!("Select a {} file", extension);
        let file = frontend
            .pick(title, &placeholder, &files)?
            .ok_or_else(not_found)?;

        tracing::debug!("Encoding {}", file);
        let text = std::fs::read_to_string(&file)?;
        Ok(encode_text(&text))
    }
}

/// Prompt for a value, treating no answer as cancellation
fn ask(frontend: &mut dyn Frontend, request: InputRequest) -> Result<String> {
    frontend
        .input(&request)?
        .filter(|answer| !answer.is_empty())
        .ok_or(ParserError::Cancelled)
}

fn config_id_request(title: &'static str, prompt: &'static str) -> InputRequest {
    InputRequest::new(title, prompt)
        .placeholder(PLACEHOLDER_CONFIG_ID)
        .validate(validate_config_id)
}

fn log_type_request(title: &'static str, prompt: &'static str) -> InputRequest {
    InputRequest::new(title, prompt).placeholder(PLACEHOLDER_LOG_TYPE)
}

pub fn validate_config_id(input: &str) -> std::result::Result<(), String> {
    uuid::Uuid::parse_str(input.trim())
        .map(|_| ())
        .map_err(|_| "configId must be a UUID".to_string())
}

/// Show a failure to the user
pub fn report(error: &ParserError, frontend: &mut dyn Frontend) {
    if error.is_silent() {
        tracing::debug!("Command aborted: {}", error);
        return;
    }

    tracing::warn!("Command failed: {}", error);
    frontend.show_error(&error.to_string());

    if error.wants_settings() {
        frontend.open_settings();
    }
}
