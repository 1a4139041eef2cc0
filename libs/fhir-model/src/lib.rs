//! Immutable FHIR R5 data models
//!
//! This crate provides strongly-typed, immutable Rust structures for FHIR
//! resources, assembled from a small generic core.
//!
//! # Module Organization
//!
//! - `primitive`: the generic [`Primitive`] element and its type aliases
//! - `datatype`: general-purpose complex datatypes (Coding, Quantity, ...)
//! - `extension`: the extension side channel every element carries
//! - `reference`: typed pointers between resources with target allow-lists
//! - `resource`: the closed [`Resource`] set (Consent, DeviceDefinition)
//! - `visitor`: the four-phase traversal contract
//! - `validation`: the build-time structural checks and [`ValidationMode`]
//! - `code`: value-set-bound code enums and their binding metadata
//!
//! # Design Philosophy
//!
//! - **Immutable**: instances are constructed through builders and never
//!   mutated; derivation goes through `to_builder()`.
//! - **Valid by construction**: `build()` runs all structural checks, so a
//!   strictly-built instance needs no re-validation downstream.
//! - **Closed dispatch**: resources and choice fields are enums, not trait
//!   objects, so consumers match instead of downcasting.
//!
//! # Example
//!
//! ```rust
//! use stannum_model::code::ConsentState;
//! use stannum_model::resource::Consent;
//! use stannum_model::validation::Build;
//! use stannum_model::visitor::Visitable;
//!
//! let consent = Consent::builder()
//!     .status(ConsentState::Active)
//!     .build()
//!     .unwrap();
//! assert!(consent.has_children());
//! assert!(consent.identifier().is_empty());
//! ```
//!
//! [`Primitive`]: primitive::Primitive
//! [`Resource`]: resource::Resource
//! [`ValidationMode`]: validation::ValidationMode

pub mod code;
pub mod datatype;
pub mod element;
pub mod error;
pub mod extension;
pub mod primitive;
pub mod reference;
pub mod resource;
pub mod validation;
pub mod visitor;

pub use element::{BackboneElement, Element};
pub use error::{Error, Result};
pub use extension::{Extension, ExtensionValue};
pub use reference::{Reference, ResourceType};
pub use resource::Resource;
pub use validation::{Build, ValidationMode};
pub use visitor::{Visitable, Visitor};
