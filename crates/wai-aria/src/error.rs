//! Error Types
//!
//! Structural/configuration failures only. Data coercion never errors:
//! invalid input degrades to a property's empty value instead.

use thiserror::Error;

/// Structural errors raised by registry and accessor setup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AriaError {
    #[error("invalid attribute name {0:?}: must be non-empty and free of whitespace")]
    InvalidAttributeName(String),

    #[error("attribute name {0:?} is missing the \"aria-\" prefix")]
    MissingAriaPrefix(String),

    #[error("property names must be non-empty strings")]
    InvalidPropertyName,

    #[error("property {0:?} is already registered; pass Override::Allow to replace it")]
    AlreadyRegistered(String),

    #[error("no property registered under {0:?}")]
    UnknownProperty(String),
}
