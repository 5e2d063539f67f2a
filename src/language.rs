//! Site languages
//!
//! The languages the site serves. Anything outside this set falls back
//! to English, so downstream code never has to handle an unknown code.

use std::fmt;

/// A supported site language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Russian,
    German,
    Ukrainian,
}

impl Language {
    /// Parse a language code, falling back to English for unknown values
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Language::Russian,
            "de" => Language::German,
            "uk" => Language::Ukrainian,
            _ => Language::English,
        }
    }

    /// The two-letter language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::German => "de",
            Language::Ukrainian => "uk",
        }
    }

    /// The English name of the language, used in generation prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Russian",
            Language::German => "German",
            Language::Ukrainian => "Ukrainian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
