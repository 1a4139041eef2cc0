//! Resource types
//!
//! A [`Resource`] is the root of an instance tree: it has a standalone
//! identity, carries versioning metadata, and owns everything below it.
//! The set of resource types is closed, so dispatch is an enum match
//! rather than downcasting.

mod consent;
mod device_definition;

pub use consent::{
    Consent, ConsentBuilder, ConsentProvision, ConsentProvisionBuilder, ConsentVerification,
    ConsentVerificationBuilder, ProvisionActor, ProvisionActorBuilder,
};
pub use device_definition::{
    DeviceClassification, DeviceClassificationBuilder, DeviceDefinition, DeviceDefinitionBuilder,
    DeviceProperty, DevicePropertyBuilder, HasPart, HasPartBuilder, PropertyValue,
    RegulatoryIdentifier, RegulatoryIdentifierBuilder, UdiDeviceIdentifier,
    UdiDeviceIdentifierBuilder,
};

use crate::reference::ResourceType;
use crate::visitor::{NodeKind, ValueRef, Visitable, Visitor};

/// A complete resource instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Consent(Consent),
    DeviceDefinition(DeviceDefinition),
}

impl Resource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Consent(_) => ResourceType::Consent,
            Resource::DeviceDefinition(_) => ResourceType::DeviceDefinition,
        }
    }

    /// The logical id, if assigned.
    pub fn id(&self) -> Option<&str> {
        match self {
            Resource::Consent(consent) => consent.id(),
            Resource::DeviceDefinition(definition) => definition.id(),
        }
    }

    /// Structural digest of the whole tree, memoized per instance.
    pub fn fingerprint(&self) -> u64 {
        match self {
            Resource::Consent(consent) => consent.fingerprint(),
            Resource::DeviceDefinition(definition) => definition.fingerprint(),
        }
    }
}

impl From<Consent> for Resource {
    fn from(consent: Consent) -> Self {
        Resource::Consent(consent)
    }
}

impl From<DeviceDefinition> for Resource {
    fn from(definition: DeviceDefinition) -> Self {
        Resource::DeviceDefinition(definition)
    }
}

impl Visitable for Resource {
    fn type_name(&self) -> &'static str {
        match self {
            Resource::Consent(consent) => consent.type_name(),
            Resource::DeviceDefinition(definition) => definition.type_name(),
        }
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Resource
    }

    fn element_id(&self) -> Option<&str> {
        self.id()
    }

    fn value(&self) -> Option<ValueRef<'_>> {
        None
    }

    fn has_children(&self) -> bool {
        match self {
            Resource::Consent(consent) => consent.has_children(),
            Resource::DeviceDefinition(definition) => definition.has_children(),
        }
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        match self {
            Resource::Consent(consent) => consent.visit_children(visitor),
            Resource::DeviceDefinition(definition) => definition.visit_children(visitor),
        }
    }
}
