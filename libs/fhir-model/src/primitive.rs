//! FHIR primitive elements
//!
//! Every FHIR primitive is an element: besides its raw value it may carry an
//! element id and extensions. Rather than one wrapper type per primitive,
//! a single generic [`Primitive`] container is parameterized over the value
//! type, and type aliases supply the FHIR vocabulary. Date and time values
//! are carried as strings.

use crate::code::{
    ConsentProvisionType, ConsentState, DeviceRegulatoryIdentifierType, IdentifierUse,
    NarrativeStatus, QuantityComparator,
};
use crate::element::Element;
use crate::extension::Extension;
use crate::visitor::{visit_list, NodeKind, ValueRef, Visitable, Visitor};

/// A raw value that can live inside a [`Primitive`].
pub trait PrimitiveValue: Clone + PartialEq + std::fmt::Debug {
    /// The FHIR primitive type name.
    fn type_name() -> &'static str;

    /// Borrowed view for visitors.
    fn value_ref(&self) -> ValueRef<'_>;
}

impl PrimitiveValue for bool {
    fn type_name() -> &'static str {
        "boolean"
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Boolean(*self)
    }
}

impl PrimitiveValue for i32 {
    fn type_name() -> &'static str {
        "integer"
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Integer(*self)
    }
}

impl PrimitiveValue for u32 {
    fn type_name() -> &'static str {
        "unsignedInt"
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::UnsignedInt(*self)
    }
}

impl PrimitiveValue for String {
    fn type_name() -> &'static str {
        "string"
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Str(self)
    }
}

impl PrimitiveValue for rust_decimal::Decimal {
    fn type_name() -> &'static str {
        "decimal"
    }

    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Decimal(self)
    }
}

macro_rules! code_primitive_value {
    ($($ty:ty),+ $(,)?) => {
        $(impl PrimitiveValue for $ty {
            fn type_name() -> &'static str {
                "code"
            }

            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Str(self.as_str())
            }
        })+
    };
}

code_primitive_value!(
    ConsentState,
    ConsentProvisionType,
    NarrativeStatus,
    IdentifierUse,
    QuantityComparator,
    DeviceRegulatoryIdentifierType,
);

/// Generic primitive element: a value plus the element side-channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<V: PrimitiveValue> {
    id: Option<String>,
    extension: Vec<Extension>,
    value: Option<V>,
}

impl<V: PrimitiveValue> Default for Primitive<V> {
    fn default() -> Self {
        Primitive {
            id: None,
            extension: Vec::new(),
            value: None,
        }
    }
}

impl<V: PrimitiveValue> Primitive<V> {
    pub fn new(value: V) -> Self {
        Primitive {
            id: None,
            extension: Vec::new(),
            value: Some(value),
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn extension(&self) -> &[Extension] {
        &self.extension
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// True if no value, id, or extensions are present.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.id.is_none() && self.extension.is_empty()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    /// An extension-only primitive (no value).
    pub fn extension_only(extension: Vec<Extension>) -> Self {
        Primitive {
            id: None,
            extension,
            value: None,
        }
    }
}

impl<V: PrimitiveValue> From<V> for Primitive<V> {
    fn from(value: V) -> Self {
        Primitive::new(value)
    }
}

impl From<&str> for Primitive<String> {
    fn from(value: &str) -> Self {
        Primitive::new(value.to_string())
    }
}

impl<V: PrimitiveValue> Visitable for Primitive<V> {
    fn type_name(&self) -> &'static str {
        V::type_name()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Primitive
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn value(&self) -> Option<ValueRef<'_>> {
        self.value.as_ref().map(PrimitiveValue::value_ref)
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
    }
}

impl<V: PrimitiveValue> Element for Primitive<V> {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

pub type Boolean = Primitive<bool>;
pub type Integer = Primitive<i32>;
pub type UnsignedInt = Primitive<u32>;
pub type Decimal = Primitive<rust_decimal::Decimal>;
pub type FhirString = Primitive<String>;
pub type Uri = Primitive<String>;
pub type Url = Primitive<String>;
pub type Markdown = Primitive<String>;
pub type Date = Primitive<String>;
pub type DateTime = Primitive<String>;
pub type Instant = Primitive<String>;
/// A free-form code (no fixed value set at this layer).
pub type Code = Primitive<String>;
/// A code bound to a fixed value set, carried as its enum.
pub type Coded<C> = Primitive<C>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::ConsentState;

    #[test]
    fn new_primitive_has_a_value_and_no_children() {
        let b = Boolean::new(true);
        assert_eq!(b.value(), Some(&true));
        assert!(!b.has_children());
        assert!(!b.is_empty());
    }

    #[test]
    fn default_primitive_is_empty() {
        let s = FhirString::default();
        assert!(s.is_empty());
        assert_eq!(s.value(), None);
    }

    #[test]
    fn from_str_wraps_the_host_value() {
        let s: FhirString = "hello".into();
        assert_eq!(s.value().map(String::as_str), Some("hello"));
    }

    #[test]
    fn coded_primitive_exposes_the_code_string() {
        let status = Coded::from(ConsentState::Active);
        assert_eq!(Visitable::value(&status), Some(ValueRef::Str("active")));
        assert_eq!(status.type_name(), "code");
    }

    #[test]
    fn id_only_primitive_is_not_empty() {
        let s = FhirString::default().with_id("elem-1");
        assert!(!s.is_empty());
        assert_eq!(s.id(), Some("elem-1"));
    }
}
