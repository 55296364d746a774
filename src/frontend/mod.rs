//! User-facing capabilities the commands rely on
//!
//! Commands never talk to the terminal directly. They ask a [`Frontend`] for
//! input, show it documents and messages, and let it open the settings.

pub mod terminal;

use crate::document::Document;
use crate::error::Result;
use std::ffi::OsStr;
use std::path::Path;

/// Checks a prompt answer; `Err` carries the message shown to the user
pub type InputValidator = fn(&str) -> std::result::Result<(), String>;

/// A single-line input prompt
#[derive(Debug, Clone, Default)]
pub struct InputRequest {
    pub title: &'static str,
    pub prompt: &'static str,
    /// Hint shown while the input is empty
    pub placeholder: Option<&'static str>,
    /// Pre-filled value
    pub value: Option<String>,
    pub validate: Option<InputValidator>,
}

impl InputRequest {
    pub fn new(title: &'static str, prompt: &'static str) -> Self {
        Self {
            title,
            prompt,
            ..Default::default()
        }
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn validate(mut self, validate: InputValidator) -> Self {
        self.validate = Some(validate);
        self
    }
}

pub trait Frontend {
    /// Ask for one line of text. `None` or an empty answer means cancelled.
    fn input(&mut self, request: &InputRequest) -> Result<Option<String>>;

    /// Let the user choose one of `items`. `None` means dismissed.
    fn pick(&mut self, title: &str, placeholder: &str, items: &[String])
        -> Result<Option<String>>;

    /// Display a read-only document
    fn show_document(&mut self, document: &Document, content: &str) -> Result<()>;

    fn show_info(&mut self, message: &str);

    fn show_error(&mut self, message: &str);

    /// Point the user at the settings they need to fill in
    fn open_settings(&mut self);
}

/// Resolve a named file among pick items.
///
/// `wanted` matches an item by full path, or by file name when exactly one
/// item has that name.
pub fn find_pick_item(items: &[String], wanted: &str) -> Option<String> {
    if let Some(exact) = items.iter().find(|item| item.as_str() == wanted) {
        return Some(exact.clone());
    }

    let mut by_name = items
        .iter()
        .filter(|item| Path::new(item.as_str()).file_name() == Some(OsStr::new(wanted)));
    match (by_name.next(), by_name.next()) {
        (Some(item), None) => Some(item.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_pick_requires_whole_file_name() {
        let files = items(&["/ws/data.conf"]);
        assert_eq!(find_pick_item(&files, "a.conf"), None);
        assert_eq!(find_pick_item(&files, "data.conf"), Some("/ws/data.conf".to_string()));
        assert_eq!(find_pick_item(&files, "/ws/data.conf"), Some("/ws/data.conf".to_string()));
    }

    #[test]
    fn test_pick_ambiguous_name_matches_nothing() {
        let files = items(&["/ws/a/parser.conf", "/ws/b/parser.conf"]);
        assert_eq!(find_pick_item(&files, "parser.conf"), None);
        assert_eq!(
            find_pick_item(&files, "/ws/b/parser.conf"),
            Some("/ws/b/parser.conf".to_string())
        );
    }
}
