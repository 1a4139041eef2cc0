//! Extensions: the free-form side channel every element carries

use crate::datatype::{CodeableConcept, Coding, Period, Quantity};
use crate::element::Element;
use crate::error::Result;
use crate::primitive::{Boolean, Code, DateTime, Decimal, FhirString, Integer, Uri};
use crate::reference::Reference;
use crate::validation::{self, Build, ValidationMode};
use crate::visitor::{visit_list, walk, NodeKind, Visitable, Visitor};

/// The value carried by an extension: exactly one of a fixed set of types.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionValue {
    Boolean(Boolean),
    Integer(Integer),
    Decimal(Decimal),
    String(FhirString),
    Uri(Uri),
    Code(Code),
    DateTime(DateTime),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Quantity(Quantity),
    Period(Period),
    Reference(Reference),
}

impl ExtensionValue {
    /// The wire name of the populated alternative.
    pub fn field_name(&self) -> &'static str {
        match self {
            ExtensionValue::Boolean(_) => "valueBoolean",
            ExtensionValue::Integer(_) => "valueInteger",
            ExtensionValue::Decimal(_) => "valueDecimal",
            ExtensionValue::String(_) => "valueString",
            ExtensionValue::Uri(_) => "valueUri",
            ExtensionValue::Code(_) => "valueCode",
            ExtensionValue::DateTime(_) => "valueDateTime",
            ExtensionValue::Coding(_) => "valueCoding",
            ExtensionValue::CodeableConcept(_) => "valueCodeableConcept",
            ExtensionValue::Quantity(_) => "valueQuantity",
            ExtensionValue::Period(_) => "valuePeriod",
            ExtensionValue::Reference(_) => "valueReference",
        }
    }

    pub(crate) fn visit(&self, visitor: &mut dyn Visitor) {
        let name = self.field_name();
        match self {
            ExtensionValue::Boolean(v) => walk(v, name, None, visitor),
            ExtensionValue::Integer(v) => walk(v, name, None, visitor),
            ExtensionValue::Decimal(v) => walk(v, name, None, visitor),
            ExtensionValue::String(v) => walk(v, name, None, visitor),
            ExtensionValue::Uri(v) => walk(v, name, None, visitor),
            ExtensionValue::Code(v) => walk(v, name, None, visitor),
            ExtensionValue::DateTime(v) => walk(v, name, None, visitor),
            ExtensionValue::Coding(v) => walk(v, name, None, visitor),
            ExtensionValue::CodeableConcept(v) => walk(v, name, None, visitor),
            ExtensionValue::Quantity(v) => walk(v, name, None, visitor),
            ExtensionValue::Period(v) => walk(v, name, None, visitor),
            ExtensionValue::Reference(v) => walk(v, name, None, visitor),
        }
    }
}

impl From<bool> for ExtensionValue {
    fn from(value: bool) -> Self {
        ExtensionValue::Boolean(Boolean::new(value))
    }
}

impl From<i32> for ExtensionValue {
    fn from(value: i32) -> Self {
        ExtensionValue::Integer(Integer::new(value))
    }
}

impl From<&str> for ExtensionValue {
    fn from(value: &str) -> Self {
        ExtensionValue::String(FhirString::from(value))
    }
}

impl From<String> for ExtensionValue {
    fn from(value: String) -> Self {
        ExtensionValue::String(FhirString::new(value))
    }
}

impl From<Coding> for ExtensionValue {
    fn from(value: Coding) -> Self {
        ExtensionValue::Coding(value)
    }
}

impl From<CodeableConcept> for ExtensionValue {
    fn from(value: CodeableConcept) -> Self {
        ExtensionValue::CodeableConcept(value)
    }
}

impl From<Quantity> for ExtensionValue {
    fn from(value: Quantity) -> Self {
        ExtensionValue::Quantity(value)
    }
}

impl From<Period> for ExtensionValue {
    fn from(value: Period) -> Self {
        ExtensionValue::Period(value)
    }
}

impl From<Reference> for ExtensionValue {
    fn from(value: Reference) -> Self {
        ExtensionValue::Reference(value)
    }
}

/// Additional content attached to an element, keyed by a defining URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    id: Option<String>,
    url: Option<Uri>,
    value: Option<ExtensionValue>,
    extension: Vec<Extension>,
}

impl Extension {
    pub fn builder() -> ExtensionBuilder {
        ExtensionBuilder::default()
    }

    /// A simple `url = value` extension.
    pub fn new(url: impl Into<Uri>, value: impl Into<ExtensionValue>) -> Result<Self> {
        Extension::builder().url(url).value(value).build()
    }

    pub fn url(&self) -> Option<&Uri> {
        self.url.as_ref()
    }

    pub fn value(&self) -> Option<&ExtensionValue> {
        self.value.as_ref()
    }

    pub fn nested(&self) -> &[Extension] {
        &self.extension
    }

    pub fn to_builder(&self) -> ExtensionBuilder {
        ExtensionBuilder {
            id: self.id.clone(),
            url: self.url.clone(),
            value: self.value.clone(),
            extension: self.extension.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.url, "url")?;
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Extension {
    fn type_name(&self) -> &'static str {
        "Extension"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    // url is an attribute of the extension, not a child
    fn has_children(&self) -> bool {
        self.value.is_some() || !self.extension.is_empty()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        crate::visitor::visit_field(visitor, "url", self.url.as_ref());
        visit_list(visitor, "extension", &self.extension);
        if let Some(value) = &self.value {
            value.visit(visitor);
        }
    }
}

impl Element for Extension {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

/// Staged construction for [`Extension`].
#[derive(Debug, Clone, Default)]
pub struct ExtensionBuilder {
    id: Option<String>,
    url: Option<Uri>,
    value: Option<ExtensionValue>,
    extension: Vec<Extension>,
}

impl ExtensionBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn url(mut self, url: impl Into<Uri>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn value(mut self, value: impl Into<ExtensionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends a nested extension.
    pub fn extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    /// Replaces all nested extensions.
    pub fn set_extension(mut self, extension: Vec<Extension>) -> Self {
        self.extension = extension;
        self
    }
}

impl Build for ExtensionBuilder {
    type Target = Extension;

    fn build_with(self, mode: ValidationMode) -> Result<Extension> {
        let extension = Extension {
            id: self.id,
            url: self.url,
            value: self.value,
            extension: self.extension,
        };
        if mode.is_strict() {
            extension.validate()?;
        }
        Ok(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn url_is_required() {
        let err = Extension::builder().value(true).build().unwrap_err();
        assert_eq!(err, Error::MissingField("url"));
    }

    #[test]
    fn url_alone_is_vacuous() {
        let err = Extension::builder()
            .url("http://example.org/fhir/flag")
            .build()
            .unwrap_err();
        assert_eq!(err, Error::EmptyElement("Extension"));
    }

    #[test]
    fn value_extension_builds() {
        let ext = Extension::new("http://example.org/fhir/flag", true).unwrap();
        assert_eq!(ext.value().map(ExtensionValue::field_name), Some("valueBoolean"));
    }

    #[test]
    fn nested_extensions_count_as_children() {
        let inner = Extension::new("http://example.org/fhir/part", 2).unwrap();
        let outer = Extension::builder()
            .url("http://example.org/fhir/composite")
            .extension(inner)
            .build()
            .unwrap();
        assert!(outer.has_children());
        assert_eq!(outer.nested().len(), 1);
    }

    #[test]
    fn unchecked_mode_permits_missing_url() {
        let ext = Extension::builder()
            .value(false)
            .build_with(ValidationMode::Unchecked)
            .unwrap();
        assert!(ext.url().is_none());
    }
}
