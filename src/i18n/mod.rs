//! Localized presentation of faults.
//!
//! The fault types never localize anything themselves. Presentation code
//! hands a fault to a [`MessageResolver`], which looks up a template in
//! the [`MessageBundle`]s supplied by a [`BundleLoadStrategy`].

pub mod bundle;
pub mod error;
pub mod labels;
pub mod locale;
pub mod resolver;

pub use bundle::{BundleLoadStrategy, BundleRegistry, MessageBundle};
pub use error::BundleError;
pub use labels::PROPERTY_SEPARATOR_TOKEN;
pub use locale::Locale;
pub use resolver::{
    MessageResolver, ResolverBuilder, DEFAULT_MESSAGE_KEY, LIBRARY_BUNDLE, NOT_FOUND_TOKEN,
};
