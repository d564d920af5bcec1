//! Validatable beans.
//!
//! A [`RousseauBean`] may be wild (invalid) for as long as it likes. It
//! reports what is wrong through [`RousseauBean::wild_faults`]; callers
//! decide when that matters with [`RousseauBean::check_civility`].

pub mod helpers;
pub mod rousseau;

pub use helpers::{check_civility_of, normalize_all, wild_faults_of};
pub use rousseau::{has_same_values_with_none, Civility, RousseauBean};
