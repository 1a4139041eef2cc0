//! Error types for structural validation of model instances

use crate::reference::ResourceType;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A singular field marked as required was never set.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A required choice field was left unpopulated.
    #[error("missing required choice field `{0}`")]
    MissingChoice(&'static str),

    /// An element carries neither a value nor any children.
    #[error("element `{0}` must have a value or children")]
    EmptyElement(&'static str),

    /// A repeated field contains an entry with neither a value nor children.
    #[error("list field `{field}` contains an empty element at index {index}")]
    EmptyListEntry { field: &'static str, index: usize },

    /// A reference declares a target type outside the allowed set for the field.
    #[error("field `{field}` does not allow reference target `{target}` (allowed: {})",
        format_allowed(.allowed))]
    DisallowedReferenceTarget {
        field: &'static str,
        target: ResourceType,
        allowed: &'static [ResourceType],
    },

    /// A resource type name could not be parsed.
    #[error("unknown resource type `{0}`")]
    UnknownResourceType(String),

    /// A code value is not part of its bound value set.
    #[error("unknown code `{code}` for `{kind}`")]
    UnknownCode { kind: &'static str, code: String },
}

fn format_allowed(allowed: &[ResourceType]) -> String {
    allowed
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
