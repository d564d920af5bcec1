//! Localized labels for bean types and their properties.
//!
//! Labels live in the bean type's own bundles:
//!
//! | label               | key                         |
//! |---------------------|-----------------------------|
//! | type                | `type`                      |
//! | type, plural        | `type.plural`               |
//! | property            | `propertyName.{p}`          |
//! | property, short     | `propertyName.short.{p}`    |
//!
//! A short property label falls back to the long one and vice versa.
//! Dotted property paths are looked up verbatim.

use super::locale::Locale;
use super::resolver::{not_found, MessageResolver};
use crate::core::OriginType;
use crate::fault::ContractViolation;

pub const PROPERTY_LABEL_KEY_PREFIX: &str = "propertyName.";
pub const SHORT_PROPERTY_LABEL_KEY_PREFIX: &str = "propertyName.short.";
pub const TYPE_LABEL_KEY: &str = "type";
pub const PLURAL_TYPE_LABEL_KEY: &str = "type.plural";

/// Joins property and type in the not-found rendering, as in
/// `???name#Person???`.
pub const PROPERTY_SEPARATOR_TOKEN: &str = "#";

impl MessageResolver {
    /// Label of `property` of `origin_type`.
    ///
    /// A missing label renders as `???property#Type???`.
    ///
    /// ```rust
    /// use rousseau::core::OriginType;
    /// use rousseau::i18n::{BundleRegistry, Locale, MessageBundle, MessageResolver};
    /// use rousseau::introspect;
    ///
    /// #[derive(Debug)]
    /// struct Person {
    ///     name: String,
    /// }
    ///
    /// introspect! {
    ///     Person { name }
    /// }
    ///
    /// let registry = BundleRegistry::new().with_bundle(
    ///     "Person",
    ///     Locale::language("nl"),
    ///     MessageBundle::new().with("propertyName.name", "naam"),
    /// );
    /// let resolver = MessageResolver::builder().strategy(registry).build();
    /// let person = OriginType::of::<Person>();
    ///
    /// let dutch = resolver.property_label(person, "name", false, &Locale::language("nl"));
    /// let english = resolver.property_label(person, "name", false, &Locale::root());
    /// assert_eq!(dutch.unwrap(), "naam");
    /// assert_eq!(english.unwrap(), "???name#Person???");
    /// ```
    pub fn property_label(
        &self,
        origin_type: OriginType,
        property: &str,
        short: bool,
        locale: &Locale,
    ) -> Result<String, ContractViolation> {
        if property.is_empty() {
            return Err(ContractViolation::EmptyPropertyName);
        }
        if let Some(label) = self.find_property_label(origin_type, property, short, locale) {
            return Ok(label);
        }
        let missing = format!("{property}{PROPERTY_SEPARATOR_TOKEN}{}", origin_type.name());
        Ok(not_found(&missing))
    }

    /// Label of `origin_type` itself; a miss renders as `???Type???`.
    pub fn type_label(&self, origin_type: OriginType, plural: bool, locale: &Locale) -> String {
        self.find_type_label(origin_type, plural, locale)
            .unwrap_or_else(|| not_found(origin_type.name()))
    }

    pub(crate) fn find_property_label(
        &self,
        origin_type: OriginType,
        property: &str,
        short: bool,
        locale: &Locale,
    ) -> Option<String> {
        let long = format!("{PROPERTY_LABEL_KEY_PREFIX}{property}");
        let brief = format!("{SHORT_PROPERTY_LABEL_KEY_PREFIX}{property}");
        let keys = if short { [brief, long] } else { [long, brief] };
        self.find_key(&origin_type.bundle_chain(), &keys, locale)
    }

    pub(crate) fn find_type_label(
        &self,
        origin_type: OriginType,
        plural: bool,
        locale: &Locale,
    ) -> Option<String> {
        let key = if plural {
            PLURAL_TYPE_LABEL_KEY
        } else {
            TYPE_LABEL_KEY
        };
        self.find_key(&origin_type.bundle_chain(), &[key], locale)
    }
}
