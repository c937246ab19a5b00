// ============================================================
// CLEANING CONFIGURATION
// ============================================================
// Run-wide options threaded explicitly into every pipeline stage

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Mode;
use crate::domain::error::AppError;

/// How strictly the invalid-email filter judges an address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EmailRule {
    /// One `@`, non-empty local and domain parts, a `.` in the domain, no whitespace
    #[default]
    Basic,

    /// Basic shape plus well-formed domain labels and an alphabetic TLD
    Strict,
}

impl EmailRule {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailRule::Basic => "basic",
            EmailRule::Strict => "strict",
        }
    }
}

impl fmt::Display for EmailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(EmailRule::Basic),
            "strict" => Ok(EmailRule::Strict),
            other => Err(format!(
                "unknown email rule '{}', expected 'basic' or 'strict'",
                other
            )),
        }
    }
}

impl TryFrom<String> for EmailRule {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EmailRule> for String {
    fn from(rule: EmailRule) -> Self {
        rule.as_str().to_string()
    }
}

/// Validated configuration for one cleaning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningConfig {
    pub mode: Mode,

    /// Keep only the first row per email (case-insensitive)
    pub dedupe_by_email: bool,

    /// Drop rows whose email fails `email_rule`
    pub filter_invalid_emails: bool,

    pub email_rule: EmailRule,

    /// Trim surrounding whitespace of every data cell while reading
    pub trim_fields: bool,
}

impl CleaningConfig {
    /// Mode and dedup have no defaults; everything else is off.
    pub fn new(mode: Mode, dedupe_by_email: bool) -> Self {
        Self {
            mode,
            dedupe_by_email,
            filter_invalid_emails: false,
            email_rule: EmailRule::default(),
            trim_fields: false,
        }
    }

    pub fn with_invalid_email_filter(mut self, rule: EmailRule) -> Self {
        self.filter_invalid_emails = true;
        self.email_rule = rule;
        self
    }

    pub fn with_trim_fields(mut self, trim: bool) -> Self {
        self.trim_fields = trim;
        self
    }

    /// Rule to apply, or `None` when the filter is disabled
    pub fn active_email_rule(&self) -> Option<EmailRule> {
        self.filter_invalid_emails.then_some(self.email_rule)
    }
}

/// Partially specified settings, as merged from file, environment and flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedupe_by_email: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_invalid_emails: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_rule: Option<EmailRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_fields: Option<bool>,
}

impl CleaningSettings {
    /// Check that the required choices were made
    pub fn validate(&self) -> Result<(), String> {
        if self.mode.is_none() {
            return Err("mode is required (clone or owner_only)".to_string());
        }
        if self.dedupe_by_email.is_none() {
            return Err("dedupe_by_email must be set explicitly (true or false)".to_string());
        }
        Ok(())
    }
}

impl TryFrom<CleaningSettings> for CleaningConfig {
    type Error = AppError;

    fn try_from(settings: CleaningSettings) -> Result<Self, Self::Error> {
        settings.validate().map_err(AppError::ValidationError)?;

        let (Some(mode), Some(dedupe_by_email)) = (settings.mode, settings.dedupe_by_email) else {
            return Err(AppError::ValidationError(
                "mode and dedupe_by_email are required".to_string(),
            ));
        };

        Ok(Self {
            mode,
            dedupe_by_email,
            filter_invalid_emails: settings.filter_invalid_emails.unwrap_or(false),
            email_rule: settings.email_rule.unwrap_or_default(),
            trim_fields: settings.trim_fields.unwrap_or(false),
        })
    }
}
