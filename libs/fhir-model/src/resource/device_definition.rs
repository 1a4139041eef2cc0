//! The DeviceDefinition resource
//!
//! The characteristics, operational status and capabilities of a
//! medical-related component of a medical device, defined as a kind
//! rather than an instance.

use std::sync::OnceLock;

use crate::code::DeviceRegulatoryIdentifierType;
use crate::datatype::{
    Attachment, CodeableConcept, Identifier, Meta, Narrative, Quantity, Range,
};
use crate::element::{BackboneElement, Element};
use crate::error::Result;
use crate::extension::Extension;
use crate::primitive::{Boolean, Code, Coded, FhirString, Integer, Markdown, UnsignedInt, Uri};
use crate::reference::{Reference, ResourceType};
use crate::resource::Resource;
use crate::validation::{self, Build, ValidationMode};
use crate::visitor::{visit_field, visit_list, walk, Fingerprint, NodeKind, Visitable, Visitor};

const MANUFACTURER_TYPES: &[ResourceType] = &[ResourceType::Organization];

const HAS_PART_TYPES: &[ResourceType] = &[ResourceType::DeviceDefinition];

/// A kind of device, described by identifiers, regulatory registrations
/// and inherent properties.
#[derive(Debug, Clone)]
pub struct DeviceDefinition {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    identifier: Vec<Identifier>,
    description: Option<Markdown>,
    udi_device_identifier: Vec<UdiDeviceIdentifier>,
    regulatory_identifier: Vec<RegulatoryIdentifier>,
    part_number: Option<FhirString>,
    manufacturer: Option<Reference>,
    model_number: Option<FhirString>,
    classification: Vec<DeviceClassification>,
    safety: Vec<CodeableConcept>,
    property: Vec<DeviceProperty>,
    has_part: Vec<HasPart>,
    fingerprint: OnceLock<u64>,
}

impl DeviceDefinition {
    pub fn builder() -> DeviceDefinitionBuilder {
        DeviceDefinitionBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn implicit_rules(&self) -> Option<&Uri> {
        self.implicit_rules.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn text(&self) -> Option<&Narrative> {
        self.text.as_ref()
    }

    pub fn contained(&self) -> &[Resource] {
        &self.contained
    }

    pub fn identifier(&self) -> &[Identifier] {
        &self.identifier
    }

    pub fn description(&self) -> Option<&Markdown> {
        self.description.as_ref()
    }

    pub fn udi_device_identifier(&self) -> &[UdiDeviceIdentifier] {
        &self.udi_device_identifier
    }

    pub fn regulatory_identifier(&self) -> &[RegulatoryIdentifier] {
        &self.regulatory_identifier
    }

    pub fn part_number(&self) -> Option<&FhirString> {
        self.part_number.as_ref()
    }

    pub fn manufacturer(&self) -> Option<&Reference> {
        self.manufacturer.as_ref()
    }

    pub fn model_number(&self) -> Option<&FhirString> {
        self.model_number.as_ref()
    }

    pub fn classification(&self) -> &[DeviceClassification] {
        &self.classification
    }

    pub fn safety(&self) -> &[CodeableConcept] {
        &self.safety
    }

    pub fn property(&self) -> &[DeviceProperty] {
        &self.property
    }

    pub fn has_part(&self) -> &[HasPart] {
        &self.has_part
    }

    /// Structural digest of the whole instance, computed once.
    pub fn fingerprint(&self) -> u64 {
        *self.fingerprint.get_or_init(|| {
            let mut hasher = Fingerprint::new();
            walk(self, "DeviceDefinition", None, &mut hasher);
            hasher.finish()
        })
    }

    pub fn to_builder(&self) -> DeviceDefinitionBuilder {
        DeviceDefinitionBuilder {
            id: self.id.clone(),
            meta: self.meta.clone(),
            implicit_rules: self.implicit_rules.clone(),
            language: self.language.clone(),
            text: self.text.clone(),
            contained: self.contained.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            identifier: self.identifier.clone(),
            description: self.description.clone(),
            udi_device_identifier: self.udi_device_identifier.clone(),
            regulatory_identifier: self.regulatory_identifier.clone(),
            part_number: self.part_number.clone(),
            manufacturer: self.manufacturer.clone(),
            model_number: self.model_number.clone(),
            classification: self.classification.clone(),
            safety: self.safety.clone(),
            property: self.property.clone(),
            has_part: self.has_part.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::check_list(&self.identifier, "identifier")?;
        validation::check_list(&self.udi_device_identifier, "udiDeviceIdentifier")?;
        validation::check_list(&self.regulatory_identifier, "regulatoryIdentifier")?;
        validation::check_list(&self.classification, "classification")?;
        validation::check_list(&self.safety, "safety")?;
        validation::check_list(&self.property, "property")?;
        validation::check_list(&self.has_part, "hasPart")?;
        validation::check_reference_type(&self.manufacturer, "manufacturer", MANUFACTURER_TYPES)?;
        Ok(())
    }
}

// The memoized fingerprint is derived state and never part of equality.
impl PartialEq for DeviceDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.meta == other.meta
            && self.implicit_rules == other.implicit_rules
            && self.language == other.language
            && self.text == other.text
            && self.contained == other.contained
            && self.extension == other.extension
            && self.modifier_extension == other.modifier_extension
            && self.identifier == other.identifier
            && self.description == other.description
            && self.udi_device_identifier == other.udi_device_identifier
            && self.regulatory_identifier == other.regulatory_identifier
            && self.part_number == other.part_number
            && self.manufacturer == other.manufacturer
            && self.model_number == other.model_number
            && self.classification == other.classification
            && self.safety == other.safety
            && self.property == other.property
            && self.has_part == other.has_part
    }
}

impl Visitable for DeviceDefinition {
    fn type_name(&self) -> &'static str {
        "DeviceDefinition"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Resource
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        self.id.is_some()
            || self.meta.is_some()
            || self.implicit_rules.is_some()
            || self.language.is_some()
            || self.text.is_some()
            || !self.contained.is_empty()
            || !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
            || !self.identifier.is_empty()
            || self.description.is_some()
            || !self.udi_device_identifier.is_empty()
            || !self.regulatory_identifier.is_empty()
            || self.part_number.is_some()
            || self.manufacturer.is_some()
            || self.model_number.is_some()
            || !self.classification.is_empty()
            || !self.safety.is_empty()
            || !self.property.is_empty()
            || !self.has_part.is_empty()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_field(visitor, "meta", self.meta.as_ref());
        visit_field(visitor, "implicitRules", self.implicit_rules.as_ref());
        visit_field(visitor, "language", self.language.as_ref());
        visit_field(visitor, "text", self.text.as_ref());
        visit_list(visitor, "contained", &self.contained);
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_list(visitor, "identifier", &self.identifier);
        visit_field(visitor, "description", self.description.as_ref());
        visit_list(visitor, "udiDeviceIdentifier", &self.udi_device_identifier);
        visit_list(visitor, "regulatoryIdentifier", &self.regulatory_identifier);
        visit_field(visitor, "partNumber", self.part_number.as_ref());
        visit_field(visitor, "manufacturer", self.manufacturer.as_ref());
        visit_field(visitor, "modelNumber", self.model_number.as_ref());
        visit_list(visitor, "classification", &self.classification);
        visit_list(visitor, "safety", &self.safety);
        visit_list(visitor, "property", &self.property);
        visit_list(visitor, "hasPart", &self.has_part);
    }
}

impl Element for DeviceDefinition {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for DeviceDefinition {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceDefinitionBuilder {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    identifier: Vec<Identifier>,
    description: Option<Markdown>,
    udi_device_identifier: Vec<UdiDeviceIdentifier>,
    regulatory_identifier: Vec<RegulatoryIdentifier>,
    part_number: Option<FhirString>,
    manufacturer: Option<Reference>,
    model_number: Option<FhirString>,
    classification: Vec<DeviceClassification>,
    safety: Vec<CodeableConcept>,
    property: Vec<DeviceProperty>,
    has_part: Vec<HasPart>,
}

impl DeviceDefinitionBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn implicit_rules(mut self, implicit_rules: impl Into<Uri>) -> Self {
        self.implicit_rules = Some(implicit_rules.into());
        self
    }

    pub fn language(mut self, language: impl Into<Code>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn text(mut self, text: Narrative) -> Self {
        self.text = Some(text);
        self
    }

    pub fn contained(mut self, contained: impl Into<Resource>) -> Self {
        self.contained.push(contained.into());
        self
    }

    pub fn set_contained(mut self, contained: Vec<Resource>) -> Self {
        self.contained = contained;
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

    pub fn modifier_extension(mut self, extension: Extension) -> Self {
        self.modifier_extension.push(extension);
        self
    }

    pub fn set_modifier_extension(mut self, extension: Vec<Extension>) -> Self {
        self.modifier_extension = extension;
        self
    }

    pub fn identifier(mut self, identifier: Identifier) -> Self {
        self.identifier.push(identifier);
        self
    }

    pub fn set_identifier(mut self, identifier: Vec<Identifier>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn description(mut self, description: impl Into<Markdown>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn udi_device_identifier(mut self, entry: UdiDeviceIdentifier) -> Self {
        self.udi_device_identifier.push(entry);
        self
    }

    pub fn set_udi_device_identifier(mut self, entries: Vec<UdiDeviceIdentifier>) -> Self {
        self.udi_device_identifier = entries;
        self
    }

    pub fn regulatory_identifier(mut self, entry: RegulatoryIdentifier) -> Self {
        self.regulatory_identifier.push(entry);
        self
    }

    pub fn set_regulatory_identifier(mut self, entries: Vec<RegulatoryIdentifier>) -> Self {
        self.regulatory_identifier = entries;
        self
    }

    pub fn part_number(mut self, part_number: impl Into<FhirString>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }

    pub fn manufacturer(mut self, manufacturer: Reference) -> Self {
        self.manufacturer = Some(manufacturer);
        self
    }

    pub fn model_number(mut self, model_number: impl Into<FhirString>) -> Self {
        self.model_number = Some(model_number.into());
        self
    }

    pub fn classification(mut self, classification: DeviceClassification) -> Self {
        self.classification.push(classification);
        self
    }

    pub fn set_classification(mut self, classification: Vec<DeviceClassification>) -> Self {
        self.classification = classification;
        self
    }

    pub fn safety(mut self, safety: CodeableConcept) -> Self {
        self.safety.push(safety);
        self
    }

    pub fn set_safety(mut self, safety: Vec<CodeableConcept>) -> Self {
        self.safety = safety;
        self
    }

    pub fn property(mut self, property: DeviceProperty) -> Self {
        self.property.push(property);
        self
    }

    pub fn set_property(mut self, property: Vec<DeviceProperty>) -> Self {
        self.property = property;
        self
    }

    pub fn has_part(mut self, has_part: HasPart) -> Self {
        self.has_part.push(has_part);
        self
    }

    pub fn set_has_part(mut self, has_part: Vec<HasPart>) -> Self {
        self.has_part = has_part;
        self
    }
}

impl Build for DeviceDefinitionBuilder {
    type Target = DeviceDefinition;

    fn build_with(self, mode: ValidationMode) -> Result<DeviceDefinition> {
        let definition = DeviceDefinition {
            id: self.id,
            meta: self.meta,
            implicit_rules: self.implicit_rules,
            language: self.language,
            text: self.text,
            contained: self.contained,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            identifier: self.identifier,
            description: self.description,
            udi_device_identifier: self.udi_device_identifier,
            regulatory_identifier: self.regulatory_identifier,
            part_number: self.part_number,
            manufacturer: self.manufacturer,
            model_number: self.model_number,
            classification: self.classification,
            safety: self.safety,
            property: self.property,
            has_part: self.has_part,
            fingerprint: OnceLock::new(),
        };
        if mode.is_strict() {
            definition.validate()?;
        }
        Ok(definition)
    }
}

/// A UDI assigned to the device by a UDI issuer, within a jurisdiction.
#[derive(Debug, Clone, PartialEq)]
pub struct UdiDeviceIdentifier {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    device_identifier: Option<FhirString>,
    issuer: Option<Uri>,
    jurisdiction: Option<Uri>,
}

impl UdiDeviceIdentifier {
    pub fn builder() -> UdiDeviceIdentifierBuilder {
        UdiDeviceIdentifierBuilder::default()
    }

    pub fn device_identifier(&self) -> Option<&FhirString> {
        self.device_identifier.as_ref()
    }

    pub fn issuer(&self) -> Option<&Uri> {
        self.issuer.as_ref()
    }

    pub fn jurisdiction(&self) -> Option<&Uri> {
        self.jurisdiction.as_ref()
    }

    pub fn to_builder(&self) -> UdiDeviceIdentifierBuilder {
        UdiDeviceIdentifierBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            device_identifier: self.device_identifier.clone(),
            issuer: self.issuer.clone(),
            jurisdiction: self.jurisdiction.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.device_identifier, "deviceIdentifier")?;
        validation::require_non_null(&self.issuer, "issuer")?;
        validation::require_non_null(&self.jurisdiction, "jurisdiction")?;
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for UdiDeviceIdentifier {
    fn type_name(&self) -> &'static str {
        "DeviceDefinition.UdiDeviceIdentifier"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Backbone
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
            || self.device_identifier.is_some()
            || self.issuer.is_some()
            || self.jurisdiction.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "deviceIdentifier", self.device_identifier.as_ref());
        visit_field(visitor, "issuer", self.issuer.as_ref());
        visit_field(visitor, "jurisdiction", self.jurisdiction.as_ref());
    }
}

impl Element for UdiDeviceIdentifier {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for UdiDeviceIdentifier {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct UdiDeviceIdentifierBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    device_identifier: Option<FhirString>,
    issuer: Option<Uri>,
    jurisdiction: Option<Uri>,
}

impl UdiDeviceIdentifierBuilder {
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

    pub fn modifier_extension(mut self, extension: Extension) -> Self {
        self.modifier_extension.push(extension);
        self
    }

    pub fn set_modifier_extension(mut self, extension: Vec<Extension>) -> Self {
        self.modifier_extension = extension;
        self
    }

    pub fn device_identifier(mut self, device_identifier: impl Into<FhirString>) -> Self {
        self.device_identifier = Some(device_identifier.into());
        self
    }

    pub fn issuer(mut self, issuer: impl Into<Uri>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<Uri>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }
}

impl Build for UdiDeviceIdentifierBuilder {
    type Target = UdiDeviceIdentifier;

    fn build_with(self, mode: ValidationMode) -> Result<UdiDeviceIdentifier> {
        let entry = UdiDeviceIdentifier {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            device_identifier: self.device_identifier,
            issuer: self.issuer,
            jurisdiction: self.jurisdiction,
        };
        if mode.is_strict() {
            entry.validate()?;
        }
        Ok(entry)
    }
}

/// An identifier assigned by a regulatory body other than a UDI issuer.
#[derive(Debug, Clone, PartialEq)]
pub struct RegulatoryIdentifier {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    type_: Option<Coded<DeviceRegulatoryIdentifierType>>,
    device_identifier: Option<FhirString>,
    issuer: Option<Uri>,
    jurisdiction: Option<Uri>,
}

impl RegulatoryIdentifier {
    pub fn builder() -> RegulatoryIdentifierBuilder {
        RegulatoryIdentifierBuilder::default()
    }

    pub fn type_(&self) -> Option<&Coded<DeviceRegulatoryIdentifierType>> {
        self.type_.as_ref()
    }

    pub fn device_identifier(&self) -> Option<&FhirString> {
        self.device_identifier.as_ref()
    }

    pub fn issuer(&self) -> Option<&Uri> {
        self.issuer.as_ref()
    }

    pub fn jurisdiction(&self) -> Option<&Uri> {
        self.jurisdiction.as_ref()
    }

    pub fn to_builder(&self) -> RegulatoryIdentifierBuilder {
        RegulatoryIdentifierBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            type_: self.type_.clone(),
            device_identifier: self.device_identifier.clone(),
            issuer: self.issuer.clone(),
            jurisdiction: self.jurisdiction.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.type_, "type")?;
        validation::require_non_null(&self.device_identifier, "deviceIdentifier")?;
        validation::require_non_null(&self.issuer, "issuer")?;
        validation::require_non_null(&self.jurisdiction, "jurisdiction")?;
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for RegulatoryIdentifier {
    fn type_name(&self) -> &'static str {
        "DeviceDefinition.RegulatoryIdentifier"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Backbone
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
            || self.type_.is_some()
            || self.device_identifier.is_some()
            || self.issuer.is_some()
            || self.jurisdiction.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "type", self.type_.as_ref());
        visit_field(visitor, "deviceIdentifier", self.device_identifier.as_ref());
        visit_field(visitor, "issuer", self.issuer.as_ref());
        visit_field(visitor, "jurisdiction", self.jurisdiction.as_ref());
    }
}

impl Element for RegulatoryIdentifier {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for RegulatoryIdentifier {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegulatoryIdentifierBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    type_: Option<Coded<DeviceRegulatoryIdentifierType>>,
    device_identifier: Option<FhirString>,
    issuer: Option<Uri>,
    jurisdiction: Option<Uri>,
}

impl RegulatoryIdentifierBuilder {
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

    pub fn modifier_extension(mut self, extension: Extension) -> Self {
        self.modifier_extension.push(extension);
        self
    }

    pub fn set_modifier_extension(mut self, extension: Vec<Extension>) -> Self {
        self.modifier_extension = extension;
        self
    }

    pub fn type_(mut self, type_: impl Into<Coded<DeviceRegulatoryIdentifierType>>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn device_identifier(mut self, device_identifier: impl Into<FhirString>) -> Self {
        self.device_identifier = Some(device_identifier.into());
        self
    }

    pub fn issuer(mut self, issuer: impl Into<Uri>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn jurisdiction(mut self, jurisdiction: impl Into<Uri>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }
}

impl Build for RegulatoryIdentifierBuilder {
    type Target = RegulatoryIdentifier;

    fn build_with(self, mode: ValidationMode) -> Result<RegulatoryIdentifier> {
        let entry = RegulatoryIdentifier {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            type_: self.type_,
            device_identifier: self.device_identifier,
            issuer: self.issuer,
            jurisdiction: self.jurisdiction,
        };
        if mode.is_strict() {
            entry.validate()?;
        }
        Ok(entry)
    }
}

/// A classification of the device under a scheme such as GMDN.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceClassification {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    type_: Option<CodeableConcept>,
}

impl DeviceClassification {
    pub fn builder() -> DeviceClassificationBuilder {
        DeviceClassificationBuilder::default()
    }

    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    pub fn to_builder(&self) -> DeviceClassificationBuilder {
        DeviceClassificationBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            type_: self.type_.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.type_, "type")?;
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for DeviceClassification {
    fn type_name(&self) -> &'static str {
        "DeviceDefinition.Classification"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Backbone
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty() || !self.modifier_extension.is_empty() || self.type_.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "type", self.type_.as_ref());
    }
}

impl Element for DeviceClassification {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for DeviceClassification {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceClassificationBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    type_: Option<CodeableConcept>,
}

impl DeviceClassificationBuilder {
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

    pub fn modifier_extension(mut self, extension: Extension) -> Self {
        self.modifier_extension.push(extension);
        self
    }

    pub fn set_modifier_extension(mut self, extension: Vec<Extension>) -> Self {
        self.modifier_extension = extension;
        self
    }

    pub fn type_(mut self, type_: CodeableConcept) -> Self {
        self.type_ = Some(type_);
        self
    }
}

impl Build for DeviceClassificationBuilder {
    type Target = DeviceClassification;

    fn build_with(self, mode: ValidationMode) -> Result<DeviceClassification> {
        let classification = DeviceClassification {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            type_: self.type_,
        };
        if mode.is_strict() {
            classification.validate()?;
        }
        Ok(classification)
    }
}

/// The value of a device property: exactly one of a fixed set of types.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Quantity(Quantity),
    CodeableConcept(CodeableConcept),
    String(FhirString),
    Boolean(Boolean),
    Integer(Integer),
    Range(Range),
    Attachment(Attachment),
}

impl PropertyValue {
    /// The wire name of the populated alternative.
    pub fn field_name(&self) -> &'static str {
        match self {
            PropertyValue::Quantity(_) => "valueQuantity",
            PropertyValue::CodeableConcept(_) => "valueCodeableConcept",
            PropertyValue::String(_) => "valueString",
            PropertyValue::Boolean(_) => "valueBoolean",
            PropertyValue::Integer(_) => "valueInteger",
            PropertyValue::Range(_) => "valueRange",
            PropertyValue::Attachment(_) => "valueAttachment",
        }
    }

    fn visit(&self, visitor: &mut dyn Visitor) {
        let name = self.field_name();
        match self {
            PropertyValue::Quantity(v) => walk(v, name, None, visitor),
            PropertyValue::CodeableConcept(v) => walk(v, name, None, visitor),
            PropertyValue::String(v) => walk(v, name, None, visitor),
            PropertyValue::Boolean(v) => walk(v, name, None, visitor),
            PropertyValue::Integer(v) => walk(v, name, None, visitor),
            PropertyValue::Range(v) => walk(v, name, None, visitor),
            PropertyValue::Attachment(v) => walk(v, name, None, visitor),
        }
    }
}

impl From<Quantity> for PropertyValue {
    fn from(value: Quantity) -> Self {
        PropertyValue::Quantity(value)
    }
}

impl From<CodeableConcept> for PropertyValue {
    fn from(value: CodeableConcept) -> Self {
        PropertyValue::CodeableConcept(value)
    }
}

impl From<Range> for PropertyValue {
    fn from(value: Range) -> Self {
        PropertyValue::Range(value)
    }
}

impl From<Attachment> for PropertyValue {
    fn from(value: Attachment) -> Self {
        PropertyValue::Attachment(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(Boolean::new(value))
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(Integer::new(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(FhirString::from(value))
    }
}

/// An inherent, essentially fixed characteristic of this kind of device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProperty {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    type_: Option<CodeableConcept>,
    value: Option<PropertyValue>,
}

impl DeviceProperty {
    pub fn builder() -> DevicePropertyBuilder {
        DevicePropertyBuilder::default()
    }

    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    pub fn value(&self) -> Option<&PropertyValue> {
        self.value.as_ref()
    }

    pub fn to_builder(&self) -> DevicePropertyBuilder {
        DevicePropertyBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            type_: self.type_.clone(),
            value: self.value.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.type_, "type")?;
        validation::require_choice(&self.value, "value")?;
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for DeviceProperty {
    fn type_name(&self) -> &'static str {
        "DeviceDefinition.Property"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Backbone
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
            || self.type_.is_some()
            || self.value.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "type", self.type_.as_ref());
        if let Some(value) = &self.value {
            value.visit(visitor);
        }
    }
}

impl Element for DeviceProperty {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for DeviceProperty {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct DevicePropertyBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    type_: Option<CodeableConcept>,
    value: Option<PropertyValue>,
}

impl DevicePropertyBuilder {
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

    pub fn modifier_extension(mut self, extension: Extension) -> Self {
        self.modifier_extension.push(extension);
        self
    }

    pub fn set_modifier_extension(mut self, extension: Vec<Extension>) -> Self {
        self.modifier_extension = extension;
        self
    }

    pub fn type_(mut self, type_: CodeableConcept) -> Self {
        self.type_ = Some(type_);
        self
    }

    /// Stages the choice value; a later call overwrites the alternative.
    pub fn value(mut self, value: impl Into<PropertyValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl Build for DevicePropertyBuilder {
    type Target = DeviceProperty;

    fn build_with(self, mode: ValidationMode) -> Result<DeviceProperty> {
        let property = DeviceProperty {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            type_: self.type_,
            value: self.value,
        };
        if mode.is_strict() {
            property.validate()?;
        }
        Ok(property)
    }
}

/// A device that is part of this one.
#[derive(Debug, Clone, PartialEq)]
pub struct HasPart {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    reference: Option<Reference>,
    count: Option<UnsignedInt>,
}

impl HasPart {
    pub fn builder() -> HasPartBuilder {
        HasPartBuilder::default()
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    pub fn count(&self) -> Option<&UnsignedInt> {
        self.count.as_ref()
    }

    pub fn to_builder(&self) -> HasPartBuilder {
        HasPartBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            reference: self.reference.clone(),
            count: self.count.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.reference, "reference")?;
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::check_reference_type(&self.reference, "reference", HAS_PART_TYPES)?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for HasPart {
    fn type_name(&self) -> &'static str {
        "DeviceDefinition.HasPart"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Backbone
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || !self.modifier_extension.is_empty()
            || self.reference.is_some()
            || self.count.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "reference", self.reference.as_ref());
        visit_field(visitor, "count", self.count.as_ref());
    }
}

impl Element for HasPart {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for HasPart {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct HasPartBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    reference: Option<Reference>,
    count: Option<UnsignedInt>,
}

impl HasPartBuilder {
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

    pub fn modifier_extension(mut self, extension: Extension) -> Self {
        self.modifier_extension.push(extension);
        self
    }

    pub fn set_modifier_extension(mut self, extension: Vec<Extension>) -> Self {
        self.modifier_extension = extension;
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn count(mut self, count: impl Into<UnsignedInt>) -> Self {
        self.count = Some(count.into());
        self
    }
}

impl Build for HasPartBuilder {
    type Target = HasPart;

    fn build_with(self, mode: ValidationMode) -> Result<HasPart> {
        let has_part = HasPart {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            reference: self.reference,
            count: self.count,
        };
        if mode.is_strict() {
            has_part.validate()?;
        }
        Ok(has_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn gmdn() -> CodeableConcept {
        CodeableConcept::of("https://www.gmdnagency.org", "47069").unwrap()
    }

    #[test]
    fn udi_entry_requires_all_three_fields() {
        let err = UdiDeviceIdentifier::builder()
            .device_identifier("00844588003288")
            .issuer("http://hl7.org/fhir/NamingSystem/gs1")
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingField("jurisdiction"));

        let entry = UdiDeviceIdentifier::builder()
            .device_identifier("00844588003288")
            .issuer("http://hl7.org/fhir/NamingSystem/gs1")
            .jurisdiction("http://hl7.org/fhir/NamingSystem/fda-udi")
            .build()
            .unwrap();
        assert!(entry.has_children());
    }

    #[test]
    fn regulatory_identifier_requires_a_type() {
        let err = RegulatoryIdentifier::builder()
            .device_identifier("DE-1234")
            .issuer("https://ec.europa.eu/tools/eudamed")
            .jurisdiction("https://ec.europa.eu/tools/eudamed")
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingField("type"));
    }

    #[test]
    fn property_requires_type_then_choice_value() {
        let err = DeviceProperty::builder().build().unwrap_err();
        assert_eq!(err, Error::MissingField("type"));

        let err = DeviceProperty::builder().type_(gmdn()).build().unwrap_err();
        assert_eq!(err, Error::MissingChoice("value"));
    }

    #[test]
    fn each_property_alternative_keeps_its_variant() {
        let boolean = DeviceProperty::builder()
            .type_(gmdn())
            .value(true)
            .build()
            .unwrap();
        assert!(matches!(boolean.value(), Some(PropertyValue::Boolean(_))));
        assert_eq!(
            boolean.value().map(PropertyValue::field_name),
            Some("valueBoolean")
        );

        let quantity = DeviceProperty::builder()
            .type_(gmdn())
            .value(
                Quantity::builder()
                    .value(rust_decimal::Decimal::new(125, 1))
                    .unit("mm")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert!(matches!(quantity.value(), Some(PropertyValue::Quantity(_))));
    }

    #[test]
    fn later_choice_value_overwrites_the_earlier_one() {
        let property = DeviceProperty::builder()
            .type_(gmdn())
            .value(7)
            .value("replaced")
            .build()
            .unwrap();
        assert!(matches!(property.value(), Some(PropertyValue::String(_))));
    }

    #[test]
    fn has_part_must_point_at_a_device_definition() {
        let err = HasPart::builder()
            .reference(Reference::to(ResourceType::Patient, "p1"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DisallowedReferenceTarget { field: "reference", .. }
        ));

        let part = HasPart::builder()
            .reference(Reference::to(ResourceType::DeviceDefinition, "dd2"))
            .count(4u32)
            .build()
            .unwrap();
        assert_eq!(part.count().and_then(UnsignedInt::value), Some(&4));
    }

    #[test]
    fn empty_definition_has_no_children() {
        let definition = DeviceDefinition::builder()
            .build_with(ValidationMode::Unchecked)
            .unwrap();
        assert!(!definition.has_children());
    }

    #[test]
    fn manufacturer_must_be_an_organization() {
        let err = DeviceDefinition::builder()
            .manufacturer(Reference::to(ResourceType::Patient, "p1"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DisallowedReferenceTarget { field: "manufacturer", .. }
        ));
    }

    #[test]
    fn builder_round_trip_preserves_equality() {
        let definition = DeviceDefinition::builder()
            .id("dd1")
            .model_number("T-1000")
            .classification(DeviceClassification::builder().type_(gmdn()).build().unwrap())
            .build()
            .unwrap();
        assert_eq!(definition.to_builder().build().unwrap(), definition);
    }
}
