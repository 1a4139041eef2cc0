//! Typed, non-owning pointers between resources
//!
//! A [`Reference`] points at another resource by logical identity. This
//! layer validates the *declared* target type against per-field allow-lists
//! and never dereferences; resolution belongs to an external repository.

use crate::datatype::Identifier;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::extension::Extension;
use crate::primitive::{FhirString, Uri};
use crate::validation::{self, Build, ValidationMode};
use crate::visitor::{visit_field, visit_list, NodeKind, Visitable, Visitor};
use std::fmt;
use std::str::FromStr;

/// The closed set of resource type names used by reference allow-lists in
/// this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    CareTeam,
    Consent,
    Contract,
    Device,
    DeviceDefinition,
    DocumentReference,
    Group,
    HealthcareService,
    Organization,
    Patient,
    Practitioner,
    PractitionerRole,
    QuestionnaireResponse,
    RelatedPerson,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::CareTeam => "CareTeam",
            ResourceType::Consent => "Consent",
            ResourceType::Contract => "Contract",
            ResourceType::Device => "Device",
            ResourceType::DeviceDefinition => "DeviceDefinition",
            ResourceType::DocumentReference => "DocumentReference",
            ResourceType::Group => "Group",
            ResourceType::HealthcareService => "HealthcareService",
            ResourceType::Organization => "Organization",
            ResourceType::Patient => "Patient",
            ResourceType::Practitioner => "Practitioner",
            ResourceType::PractitionerRole => "PractitionerRole",
            ResourceType::QuestionnaireResponse => "QuestionnaireResponse",
            ResourceType::RelatedPerson => "RelatedPerson",
        }
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CareTeam" => Ok(ResourceType::CareTeam),
            "Consent" => Ok(ResourceType::Consent),
            "Contract" => Ok(ResourceType::Contract),
            "Device" => Ok(ResourceType::Device),
            "DeviceDefinition" => Ok(ResourceType::DeviceDefinition),
            "DocumentReference" => Ok(ResourceType::DocumentReference),
            "Group" => Ok(ResourceType::Group),
            "HealthcareService" => Ok(ResourceType::HealthcareService),
            "Organization" => Ok(ResourceType::Organization),
            "Patient" => Ok(ResourceType::Patient),
            "Practitioner" => Ok(ResourceType::Practitioner),
            "PractitionerRole" => Ok(ResourceType::PractitionerRole),
            "QuestionnaireResponse" => Ok(ResourceType::QuestionnaireResponse),
            "RelatedPerson" => Ok(ResourceType::RelatedPerson),
            _ => Err(Error::UnknownResourceType(s.to_string())),
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference from one resource to another.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reference {
    id: Option<String>,
    extension: Vec<Extension>,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl Reference {
    pub fn builder() -> ReferenceBuilder {
        ReferenceBuilder::default()
    }

    /// A `Type/id` literal reference.
    pub fn to(target: ResourceType, id: &str) -> Self {
        Reference {
            id: None,
            extension: Vec::new(),
            reference: Some(FhirString::from(format!("{}/{}", target.as_str(), id))),
            type_: None,
            identifier: None,
            display: None,
        }
    }

    pub fn reference(&self) -> Option<&FhirString> {
        self.reference.as_ref()
    }

    pub fn type_(&self) -> Option<&Uri> {
        self.type_.as_ref()
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    /// The declared target type, if one can be determined.
    ///
    /// The explicit `type` wins; otherwise the `Type/id` form of the
    /// reference literal is parsed, tolerating an absolute URL prefix.
    /// Contained (`#fragment`) and unparseable references yield `None`.
    pub fn target_type(&self) -> Option<ResourceType> {
        if let Some(type_) = self.type_.as_ref().and_then(|t| t.value()) {
            if let Ok(parsed) = type_.parse() {
                return Some(parsed);
            }
        }
        let literal = self.reference.as_ref().and_then(|r| r.value())?;
        if literal.starts_with('#') {
            return None;
        }
        let mut segments = literal.rsplit('/');
        let _id = segments.next()?;
        segments.next().and_then(|s| s.parse().ok())
    }

    pub fn to_builder(&self) -> ReferenceBuilder {
        ReferenceBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            reference: self.reference.clone(),
            type_: self.type_.clone(),
            identifier: self.identifier.clone(),
            display: self.display.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Reference {
    fn type_name(&self) -> &'static str {
        "Reference"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || self.reference.is_some()
            || self.type_.is_some()
            || self.identifier.is_some()
            || self.display.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "reference", self.reference.as_ref());
        visit_field(visitor, "type", self.type_.as_ref());
        visit_field(visitor, "identifier", self.identifier.as_ref());
        visit_field(visitor, "display", self.display.as_ref());
    }
}

impl Element for Reference {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    reference: Option<FhirString>,
    type_: Option<Uri>,
    identifier: Option<Identifier>,
    display: Option<FhirString>,
}

impl ReferenceBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    pub fn set_extension(mut self, extension: Vec<Extension>) -> Self {
        self.extension = extension;
        self
    }

    pub fn reference(mut self, reference: impl Into<FhirString>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn type_(mut self, type_: impl Into<Uri>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }
}

impl Build for ReferenceBuilder {
    type Target = Reference;

    fn build_with(self, mode: ValidationMode) -> Result<Reference> {
        let reference = Reference {
            id: self.id,
            extension: self.extension,
            reference: self.reference,
            type_: self.type_,
            identifier: self.identifier,
            display: self.display,
        };
        if mode.is_strict() {
            reference.validate()?;
        }
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_reference_resolves_its_target() {
        let subject = Reference::to(ResourceType::Patient, "123");
        assert_eq!(subject.target_type(), Some(ResourceType::Patient));
    }

    #[test]
    fn absolute_url_reference_resolves_its_target() {
        let subject = Reference::builder()
            .reference("https://fhir.example.org/r5/Practitioner/9")
            .build()
            .unwrap();
        assert_eq!(subject.target_type(), Some(ResourceType::Practitioner));
    }

    #[test]
    fn explicit_type_wins_over_the_literal() {
        let subject = Reference::builder()
            .reference("urn:uuid:0000-0000")
            .type_("Group")
            .build()
            .unwrap();
        assert_eq!(subject.target_type(), Some(ResourceType::Group));
    }

    #[test]
    fn contained_fragment_has_no_target_type() {
        let subject = Reference::builder().reference("#inner").build().unwrap();
        assert_eq!(subject.target_type(), None);
    }

    #[test]
    fn display_only_reference_is_valid_but_untyped() {
        let subject = Reference::builder().display("Dr. Example").build().unwrap();
        assert_eq!(subject.target_type(), None);
    }

    #[test]
    fn empty_reference_is_vacuous() {
        let err = Reference::builder().build().unwrap_err();
        assert_eq!(err, Error::EmptyElement("Reference"));
    }

    #[test]
    fn builder_round_trip_preserves_equality() {
        let subject = Reference::to(ResourceType::Patient, "123");
        let rebuilt = subject.to_builder().build().unwrap();
        assert_eq!(subject, rebuilt);
    }
}
