//! Message template resolution for faults.

use super::bundle::{BundleLoadStrategy, BundleRegistry};
use super::locale::Locale;
use crate::fault::FaultReport;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Base name of the library-wide bundle.
pub const LIBRARY_BUNDLE: &str = "rousseau";

/// Key of the last-resort template in [`LIBRARY_BUNDLE`].
pub const DEFAULT_MESSAGE_KEY: &str = "default";

/// Marks a missing translation, as in `???ValueFault???`.
pub const NOT_FOUND_TOKEN: &str = "???";

const DOT: char = '.';

/// Turns faults into human-readable, localized messages.
///
/// Templates are looked up in the bundles of the fault's origin type,
/// most specific first, trying these keys in order:
///
/// 1. `{Kind}.{property}.{message}`
/// 2. `{Kind}.{property}`
/// 3. `{Kind}.{message}`
/// 4. `{Kind}`
///
/// where `Kind` is the fault's kind name (`ValueFault`, `CompoundFault`,
/// ...). Keys that would need an absent property or message are skipped.
/// Failing that, the bundle named after the kind is consulted with the
/// message as key, and finally the [`LIBRARY_BUNDLE`] with
/// [`DEFAULT_MESSAGE_KEY`].
///
/// # Example
///
/// ```rust
/// use rousseau::fault::FaultBuilder;
/// use rousseau::i18n::{BundleRegistry, Locale, MessageBundle, MessageResolver};
/// use rousseau::introspect;
/// use std::sync::Arc;
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
///     Locale::root(),
///     MessageBundle::new().with("ValueFault.name.required", "{type} needs a {property}"),
/// );
/// let resolver = MessageResolver::builder().strategy(registry).build();
///
/// let person = Arc::new(Person { name: String::new() });
/// let fault = FaultBuilder::for_origin(&person)
///     .property("name")
///     .message("required")
///     .build_value()
///     .unwrap();
///
/// assert_eq!(resolver.message(&fault), "Person needs a name");
/// ```
#[derive(Clone)]
pub struct MessageResolver {
    strategy: Arc<dyn BundleLoadStrategy>,
    default_locale: Locale,
}

impl MessageResolver {
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// The first template found for `keys` in the bundles of `chain`.
    ///
    /// Bundles are the outer loop: every key is tried in the first bundle
    /// before moving on to the next one.
    pub fn find_key<K: AsRef<str>>(
        &self,
        chain: &[&str],
        keys: &[K],
        locale: &Locale,
    ) -> Option<String> {
        chain.iter().find_map(|base_name| {
            keys.iter()
                .find_map(|key| self.strategy.lookup(base_name, locale, key.as_ref()))
        })
    }

    /// The raw template for this fault, before placeholder substitution.
    pub fn message_template<F>(&self, fault: &F, locale: &Locale) -> Option<String>
    where
        F: FaultReport + ?Sized,
    {
        let kind = fault.kind_name();
        let property = fault.property_name();
        let message = fault.message();

        if let Some(origin_type) = fault.report_origin_type() {
            let keys = bean_bundle_keys(kind, property, message);
            if let Some(template) = self.find_key(&origin_type.bundle_chain(), &keys, locale) {
                return Some(template);
            }
        }
        if let Some(template) = message.and_then(|m| self.strategy.lookup(kind, locale, m)) {
            return Some(template);
        }
        let fallback = self
            .strategy
            .lookup(LIBRARY_BUNDLE, locale, DEFAULT_MESSAGE_KEY);
        if fallback.is_none() {
            trace!(kind, ?property, ?message, %locale, "no message template");
        }
        fallback
    }

    /// The localized message for this fault.
    ///
    /// Placeholders `{property}`, `{type}`, `{message}`, `{value}` and
    /// `{vetoed}` are substituted; property and type use their labels when
    /// the bundles have them. Without a template the raw message is used,
    /// and without a message `???Kind???`.
    pub fn localized_message<F>(&self, fault: &F, locale: &Locale) -> String
    where
        F: FaultReport + ?Sized,
    {
        match self.message_template(fault, locale) {
            Some(template) => substitute(&template, |placeholder| {
                self.placeholder_value(fault, placeholder, locale)
            }),
            None => match fault.message() {
                Some(message) => message.to_string(),
                None => not_found(fault.kind_name()),
            },
        }
    }

    /// [`MessageResolver::localized_message`] in the default locale.
    pub fn message<F>(&self, fault: &F) -> String
    where
        F: FaultReport + ?Sized,
    {
        self.localized_message(fault, &self.default_locale)
    }

    fn placeholder_value<F>(&self, fault: &F, placeholder: &str, locale: &Locale) -> Option<String>
    where
        F: FaultReport + ?Sized,
    {
        let origin_type = fault.report_origin_type();
        match placeholder {
            "property" => Some(match (origin_type, fault.property_name()) {
                (Some(ty), Some(property)) => self
                    .find_property_label(ty, property, false, locale)
                    .unwrap_or_else(|| property.to_string()),
                (None, Some(property)) => property.to_string(),
                (_, None) => String::new(),
            }),
            "type" => Some(match origin_type {
                Some(ty) => self
                    .find_type_label(ty, false, locale)
                    .unwrap_or_else(|| ty.name().to_string()),
                None => String::new(),
            }),
            "message" => Some(fault.message().unwrap_or_default().to_string()),
            "value" => Some(render(fault.report_property_value())),
            "vetoed" => Some(render(fault.report_vetoed_value())),
            _ => None,
        }
    }
}

impl fmt::Debug for MessageResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageResolver")
            .field("default_locale", &self.default_locale)
            .finish_non_exhaustive()
    }
}

/// Configures a [`MessageResolver`].
pub struct ResolverBuilder {
    strategy: Option<Arc<dyn BundleLoadStrategy>>,
    default_locale: Locale,
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            strategy: None,
            default_locale: Locale::root(),
        }
    }

    /// Locale used by [`MessageResolver::message`] and the label helpers
    /// when none is given.
    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Where bundles come from. Defaults to an empty [`BundleRegistry`].
    pub fn strategy<S>(mut self, strategy: S) -> Self
    where
        S: BundleLoadStrategy + 'static,
    {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Share one strategy among several resolvers.
    pub fn shared_strategy(mut self, strategy: Arc<dyn BundleLoadStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn build(self) -> MessageResolver {
        MessageResolver {
            strategy: self
                .strategy
                .unwrap_or_else(|| Arc::new(BundleRegistry::new())),
            default_locale: self.default_locale,
        }
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn bean_bundle_keys(kind: &str, property: Option<&str>, message: Option<&str>) -> Vec<String> {
    let mut keys = Vec::with_capacity(4);
    if let (Some(property), Some(message)) = (property, message) {
        keys.push(format!("{kind}{DOT}{property}{DOT}{message}"));
    }
    if let Some(property) = property {
        keys.push(format!("{kind}{DOT}{property}"));
    }
    if let Some(message) = message {
        keys.push(format!("{kind}{DOT}{message}"));
    }
    keys.push(kind.to_string());
    keys
}

pub(crate) fn not_found(key: &str) -> String {
    format!("{NOT_FOUND_TOKEN}{key}{NOT_FOUND_TOKEN}")
}

fn render(value: Option<crate::core::Value>) -> String {
    value.map_or_else(|| "none".to_string(), |v| v.render())
}

/// Replace `{name}` placeholders in one pass; unknown ones are kept.
fn substitute<L>(template: &str, lookup: L) -> String
where
    L: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match lookup(name) {
                    Some(replacement) => out.push_str(&replacement),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
