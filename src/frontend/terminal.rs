//! Interactive terminal frontend
//!
//! Prompts with dialoguer, prints documents to stdout (or a file) and
//! messages to stderr. Answers given on the command line are used instead of
//! prompting, keyed by the prompt title.

use super::{find_pick_item, Frontend, InputRequest};
use crate::config::Config;
use crate::document::Document;
use crate::error::{ParserError, Result};
use console::style;
use dialoguer::{Input, Select};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

fn prompt_error(e: dialoguer::Error) -> ParserError {
    ParserError::Io(std::io::Error::other(e.to_string()))
}

#[derive(Debug, Default)]
pub struct TerminalFrontend {
    presets: HashMap<&'static str, String>,
    output: Option<PathBuf>,
}

impl TerminalFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the prompt titled `title` with `answer` instead of asking
    pub fn preset(&mut self, title: &'static str, answer: Option<String>) {
        if let Some(answer) = answer {
            self.presets.insert(title, answer);
        }
    }

    /// Write documents to `path` instead of stdout
    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    fn ensure_terminal(&self, title: &str) -> Result<()> {
        if console::user_attended_stderr() {
            Ok(())
        } else {
            Err(ParserError::Io(std::io::Error::other(format!(
                "'{}' needs an answer but no terminal is attached",
                title
            ))))
        }
    }
}

impl Frontend for TerminalFrontend {
    fn input(&mut self, request: &InputRequest) -> Result<Option<String>> {
        if let Some(answer) = self.presets.remove(request.title) {
            let answer = answer.trim().to_string();
            if let Some(validate) = request.validate {
                validate(&answer).map_err(ParserError::InvalidInput)?;
            }
            return Ok(Some(answer).filter(|a| !a.is_empty()));
        }

        self.ensure_terminal(request.title)?;
        eprintln!("{}", style(request.title).bold());

        let prompt = match request.placeholder {
            Some(placeholder) => format!("{} (e.g. {})", request.prompt, placeholder),
            None => request.prompt.to_string(),
        };

        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(value) = &request.value {
            input = input.with_initial_text(value.clone());
        }
        if let Some(validate) = request.validate {
            input = input.validate_with(move |answer: &String| {
                if answer.is_empty() {
                    Ok(())
                } else {
                    validate(answer)
                }
            });
        }

        let answer = input.interact_text().map_err(prompt_error)?;
        Ok(Some(answer.trim().to_string()).filter(|a| !a.is_empty()))
    }

    fn pick(&mut self, title: &str, placeholder: &str, items: &[String]) -> Result<Option<String>> {
        if let Some(wanted) = self.presets.remove(title) {
            return Ok(find_pick_item(items, wanted.trim()));
        }

        self.ensure_terminal(title)?;
        eprintln!("{}", style(title).bold());

        let selection = Select::new()
            .with_prompt(placeholder)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?;

        Ok(selection.map(|i| items[i].clone()))
    }

    fn show_document(&mut self, document: &Document, content: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                std::fs::write(path, content)?;
                eprintln!("{} {}", style("Wrote").green(), path.display());
            }
            None => {
                if let Some(scheme) = document.scheme() {
                    eprintln!("{}", style(format!("[{}]", scheme)).dim());
                }
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }

    fn show_info(&mut self, message: &str) {
        eprintln!("{}", style(message).cyan());
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("{} {}", style("Error:").red().bold(), message);
    }

    fn open_settings(&mut self) {
        let path = Config::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<no config directory>".to_string());
        eprintln!(
            "Settings live in {}. Update them with `cbntool config set <key> <value>`.",
            style(path).underlined()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_id(input: &str) -> std::result::Result<(), String> {
        uuid::Uuid::parse_str(input)
            .map(|_| ())
            .map_err(|_| "configId must be a UUID".to_string())
    }

    #[test]
    fn test_preset_answer_is_trimmed() {
        let mut frontend = TerminalFrontend::new();
        let id = "12345678-abcd-1234-abcd-1234567890ab";
        frontend.preset("Download Parser", Some(format!("  {}\n", id)));

        let request = InputRequest::new("Download Parser", "configId").validate(config_id);
        assert_eq!(frontend.input(&request).unwrap(), Some(id.to_string()));
    }

    #[test]
    fn test_invalid_preset_answer() {
        let mut frontend = TerminalFrontend::new();
        frontend.preset("Download Parser", Some("not-a-uuid".to_string()));

        let request = InputRequest::new("Download Parser", "configId").validate(config_id);
        let err = frontend.input(&request).unwrap_err();
        assert!(matches!(err, ParserError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: configId must be a UUID");
    }

    #[test]
    fn test_preset_pick_does_not_match_suffix() {
        let mut frontend = TerminalFrontend::new();
        frontend.preset("Create Parser (1/2)", Some("a.conf".to_string()));

        let items = vec!["/ws/data.conf".to_string()];
        let picked = frontend.pick("Create Parser (1/2)", "Select a conf file", &items).unwrap();
        assert_eq!(picked, None);
    }

    #[test]
    fn test_preset_pick_by_file_name() {
        let mut frontend = TerminalFrontend::new();
        frontend.preset("Validate Parser (2/2)", Some("sample.log".to_string()));

        let items = vec!["/ws/other.log".to_string(), "/ws/sample.log".to_string()];
        let picked = frontend.pick("Validate Parser (2/2)", "Select a log file", &items).unwrap();
        assert_eq!(picked, Some("/ws/sample.log".to_string()));
    }
}
