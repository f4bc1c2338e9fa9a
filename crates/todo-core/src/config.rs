//! Client configuration.
//!
//! Values come from environment variables, with defaults that point at the
//! hosted notes API. Front-ends may override individual values afterwards.

use std::env;

use crate::editor::ValidationPolicy;
use crate::error::{Error, Result};
use crate::table::{DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
use crate::util::{normalize_base_url, normalize_text_option, parse_flag};

/// Base URL of the hosted notes API; the resource lives at `{base}/notes`.
pub const DEFAULT_API_BASE_URL: &str =
    "https://todo-app-production-e57d.up.railway.app/todo-list/api/v1";

pub const API_URL_VAR: &str = "TODO_NOTES_API_URL";
pub const ROWS_PER_PAGE_VAR: &str = "TODO_NOTES_ROWS_PER_PAGE";
pub const STRICT_VALIDATION_VAR: &str = "TODO_NOTES_STRICT_VALIDATION";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub rows_per_page: usize,
    pub validation: ValidationPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            validation: ValidationPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = match normalize_text_option(lookup(API_URL_VAR)) {
            Some(url) => normalize_base_url(&url)
                .map_err(|error| Error::Config(format!("{API_URL_VAR}: {error}")))?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let rows_per_page = match normalize_text_option(lookup(ROWS_PER_PAGE_VAR)) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|rows| ROWS_PER_PAGE_OPTIONS.contains(rows))
                .ok_or_else(|| {
                    Error::Config(format!(
                        "{ROWS_PER_PAGE_VAR} must be one of {ROWS_PER_PAGE_OPTIONS:?}"
                    ))
                })?,
            None => DEFAULT_ROWS_PER_PAGE,
        };

        let validation = match normalize_text_option(lookup(STRICT_VALIDATION_VAR)) {
            Some(raw) => match parse_flag(&raw) {
                Some(true) => ValidationPolicy::Blocking,
                Some(false) => ValidationPolicy::Advisory,
                None => {
                    return Err(Error::Config(format!(
                        "{STRICT_VALIDATION_VAR} must be true or false"
                    )))
                }
            },
            None => ValidationPolicy::default(),
        };

        Ok(Self {
            api_base_url,
            rows_per_page,
            validation,
        })
    }

    /// Replace the API base URL, validating it the same way as the env value.
    pub fn with_api_base_url(mut self, raw: &str) -> Result<Self> {
        self.api_base_url = normalize_base_url(raw).map_err(Error::Config)?;
        Ok(self)
    }
}
