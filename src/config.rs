// SPDX-License-Identifier: MIT

//! Runtime configuration
//!
//! Values come from the environment (a `.env` file is loaded first by the
//! binary) and can be overridden by command-line flags.

use crate::condition::Locale;
use crate::error::FlowCondError;

/// Environment variable selecting the render locale
pub const LOCALE_ENV: &str = "FLOWCOND_LOCALE";

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Locale used by the renderer
    pub locale: Locale,
}

impl EngineConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, FlowCondError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FlowCondError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let locale = match lookup(LOCALE_ENV) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => Locale::default(),
        };
        Ok(Self { locale })
    }

    /// Apply a command-line override
    pub fn with_locale(mut self, locale: Option<Locale>) -> Self {
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self
    }
}
