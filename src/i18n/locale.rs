//! Locales and their fallback chain.

use super::error::BundleError;
use std::fmt;
use std::str::FromStr;

/// A language with an optional country, such as `nl_BE`.
///
/// The root locale has neither and matches every bundle's base entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: Option<String>,
    country: Option<String>,
}

impl Locale {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn language(language: &str) -> Self {
        Self {
            language: Some(language.to_ascii_lowercase()),
            country: None,
        }
    }

    pub fn with_country(language: &str, country: &str) -> Self {
        Self {
            language: Some(language.to_ascii_lowercase()),
            country: Some(country.to_ascii_uppercase()),
        }
    }

    /// Parse `nl`, `nl_BE` or `nl-BE`. The empty tag is the root locale.
    ///
    /// ```rust
    /// use rousseau::i18n::Locale;
    ///
    /// let locale = Locale::parse("nl-be").unwrap();
    /// assert_eq!(locale.to_string(), "nl_BE");
    /// assert!(Locale::parse("nl_BE_x").is_err());
    /// ```
    pub fn parse(tag: &str) -> Result<Self, BundleError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(Self::root());
        }
        let invalid = || BundleError::InvalidLocale(tag.to_string());
        let well_formed =
            |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphabetic());

        let mut parts = tag.split(['_', '-']);
        let language = parts
            .next()
            .filter(|p| well_formed(p))
            .ok_or_else(invalid)?;
        let country = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }
        match country {
            None => Ok(Self::language(language)),
            Some(country) if well_formed(country) => Ok(Self::with_country(language, country)),
            Some(_) => Err(invalid()),
        }
    }

    pub fn is_root(&self) -> bool {
        self.language.is_none()
    }

    /// This locale, then its language alone, then root.
    pub fn fallback_chain(&self) -> Vec<Locale> {
        let mut chain = vec![self.clone()];
        if self.country.is_some() {
            chain.push(Locale {
                language: self.language.clone(),
                country: None,
            });
        }
        if !self.is_root() {
            chain.push(Locale::root());
        }
        chain
    }
}

impl FromStr for Locale {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.language, &self.country) {
            (Some(language), Some(country)) => write!(f, "{}_{}", language, country),
            (Some(language), None) => write!(f, "{}", language),
            _ => Ok(()),
        }
    }
}
