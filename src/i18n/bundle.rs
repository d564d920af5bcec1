//! Message bundles and the strategies that load them.

use super::error::BundleError;
use super::locale::Locale;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Key to message template map for one base name and one locale.
///
/// Bundles serialize as a flat JSON object:
///
/// ```rust
/// use rousseau::i18n::MessageBundle;
///
/// let bundle = MessageBundle::from_json(r#"{ "type": "Persoon" }"#).unwrap();
/// assert_eq!(bundle.get("type"), Some("Persoon"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBundle {
    entries: HashMap<String, String>,
}

impl MessageBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, BundleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where bundles come from.
pub trait BundleLoadStrategy: Send + Sync {
    /// The bundle registered for exactly this base name and locale.
    fn load(&self, base_name: &str, locale: &Locale) -> Option<Arc<MessageBundle>>;

    /// Look `key` up in the bundles for `base_name`, walking the locale's
    /// fallback chain from most to least specific.
    fn lookup(&self, base_name: &str, locale: &Locale, key: &str) -> Option<String> {
        for candidate in locale.fallback_chain() {
            if let Some(template) = self
                .load(base_name, &candidate)
                .and_then(|bundle| bundle.get(key).map(str::to_owned))
            {
                trace!(base_name, locale = %candidate, key, "message key found");
                return Some(template);
            }
        }
        None
    }
}

/// In-memory bundles, registered up front.
///
/// ```rust
/// use rousseau::i18n::{BundleLoadStrategy, BundleRegistry, Locale, MessageBundle};
///
/// let english = MessageBundle::new().with("type", "person");
/// let dutch = MessageBundle::new().with("type", "persoon");
/// let mut registry = BundleRegistry::new();
/// registry.register("Person", Locale::root(), english);
/// registry.register("Person", Locale::language("nl"), dutch);
///
/// let nl_be = Locale::parse("nl_BE").unwrap();
/// let fr = Locale::language("fr");
/// assert_eq!(registry.lookup("Person", &nl_be, "type").as_deref(), Some("persoon"));
/// assert_eq!(registry.lookup("Person", &fr, "type").as_deref(), Some("person"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    bundles: HashMap<(String, Locale), Arc<MessageBundle>>,
}

impl BundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bundle, replacing any earlier one for the same base name
    /// and locale.
    pub fn register(
        &mut self,
        base_name: impl Into<String>,
        locale: Locale,
        bundle: MessageBundle,
    ) {
        self.bundles
            .insert((base_name.into(), locale), Arc::new(bundle));
    }

    pub fn register_json(
        &mut self,
        base_name: impl Into<String>,
        locale: Locale,
        json: &str,
    ) -> Result<(), BundleError> {
        let bundle = MessageBundle::from_json(json)?;
        self.register(base_name, locale, bundle);
        Ok(())
    }

    /// Register a bundle, builder style.
    pub fn with_bundle(
        mut self,
        base_name: impl Into<String>,
        locale: Locale,
        bundle: MessageBundle,
    ) -> Self {
        self.register(base_name, locale, bundle);
        self
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl BundleLoadStrategy for BundleRegistry {
    fn load(&self, base_name: &str, locale: &Locale) -> Option<Arc<MessageBundle>> {
        self.bundles
            .get(&(base_name.to_string(), locale.clone()))
            .cloned()
    }
}
