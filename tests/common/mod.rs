//! Shared fixtures for integration tests

#![allow(dead_code)]

use cbntool::commands::ParserTools;
use cbntool::config::Config;
use cbntool::document::Document;
use cbntool::error::Result;
use cbntool::frontend::{find_pick_item, Frontend, InputRequest};
use cbntool::session::SessionState;
use cbntool::workspace::Workspace;
use std::collections::HashMap;
use std::path::PathBuf;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

/// Frontend that answers prompts from a script and records what it is shown
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    /// Prompt answers by title; a missing title accepts the pre-filled value
    pub answers: HashMap<&'static str, Option<String>>,
    /// Quick pick answers by title; a missing title dismisses the pick
    pub picks: HashMap<&'static str, String>,
    pub asked: Vec<&'static str>,
    pub documents: Vec<(Document, String)>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
    pub settings_opened: usize,
}

impl ScriptedFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, title: &'static str, answer: &str) -> Self {
        self.answers.insert(title, Some(answer.to_string()));
        self
    }

    pub fn dismiss(mut self, title: &'static str) -> Self {
        self.answers.insert(title, None);
        self
    }

    pub fn pick(mut self, title: &'static str, item: &str) -> Self {
        self.picks.insert(title, item.to_string());
        self
    }

    pub fn only_document(&self) -> &(Document, String) {
        assert_eq!(self.documents.len(), 1, "expected exactly one document");
        &self.documents[0]
    }
}

impl Frontend for ScriptedFrontend {
    fn input(&mut self, request: &InputRequest) -> Result<Option<String>> {
        self.asked.push(request.title);
        let answer = match self.answers.get(request.title) {
            Some(answer) => answer.clone(),
            None => request.value.clone(),
        };
        if let (Some(answer), Some(validate)) = (&answer, request.validate) {
            assert!(validate(answer).is_ok(), "scripted answer {:?} is invalid", answer);
        }
        Ok(answer)
    }

    fn pick(&mut self, title: &str, _placeholder: &str, items: &[String]) -> Result<Option<String>> {
        Ok(self
            .picks
            .get(title)
            .and_then(|wanted| find_pick_item(items, wanted)))
    }

    fn show_document(&mut self, document: &Document, content: &str) -> Result<()> {
        self.documents.push((document.clone(), content.to_string()));
        Ok(())
    }

    fn show_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn open_settings(&mut self) {
        self.settings_opened += 1;
    }
}

/// Settings pointing at the mock server with a static token
pub fn mock_config(server: &MockServer) -> Config {
    Config {
        api_base_url: Some(format!("{}/v1", server.uri())),
        access_token: Some(TOKEN.to_string()),
        author: Some("jane@example.com".to_string()),
        ..Default::default()
    }
}

/// A workspace whose open documents are the given files
pub fn workspace_with(files: &[(&str, &str)]) -> (tempfile::TempDir, Workspace) {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths: Vec<PathBuf> = files
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            std::fs::write(&path, content).expect("write fixture");
            path
        })
        .collect();
    let workspace = Workspace::new(dir.path().to_path_buf(), paths);
    (dir, workspace)
}

pub fn tools(config: Config, workspace: Workspace) -> ParserTools {
    ParserTools::new(config, workspace, SessionState::default())
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}
