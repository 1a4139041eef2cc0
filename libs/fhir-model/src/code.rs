//! Bound code enums and terminology binding metadata
//!
//! Coded fields whose value set is fixed by the specification are carried as
//! enums. The [`Binding`] attached to each enum is declarative only: this
//! layer never validates codes against the value set itself, it carries the
//! metadata for an external terminology validator.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// How strongly a coded field is bound to its value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingStrength {
    /// The value must come from the value set.
    Required,
    /// The value should come from the value set; other codes are allowed
    /// where no suitable concept exists.
    Extensible,
    /// Use of the value set is encouraged but not mandated.
    Preferred,
    /// The value set illustrates the kind of expected content.
    Example,
}

/// Declarative terminology binding for a coded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub strength: BindingStrength,
    pub value_set: &'static str,
}

/// Indicates the state of a consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Draft,
    Active,
    Inactive,
    NotDone,
    EnteredInError,
    Unknown,
}

impl ConsentState {
    pub const BINDING: Binding = Binding {
        strength: BindingStrength::Required,
        value_set: "http://hl7.org/fhir/ValueSet/consent-state-codes|5.0.0",
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentState::Draft => "draft",
            ConsentState::Active => "active",
            ConsentState::Inactive => "inactive",
            ConsentState::NotDone => "not-done",
            ConsentState::EnteredInError => "entered-in-error",
            ConsentState::Unknown => "unknown",
        }
    }
}

impl FromStr for ConsentState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ConsentState::Draft),
            "active" => Ok(ConsentState::Active),
            "inactive" => Ok(ConsentState::Inactive),
            "not-done" => Ok(ConsentState::NotDone),
            "entered-in-error" => Ok(ConsentState::EnteredInError),
            "unknown" => Ok(ConsentState::Unknown),
            _ => Err(Error::UnknownCode {
                kind: "ConsentState",
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a consent provision grants or withholds access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentProvisionType {
    Deny,
    Permit,
}

impl ConsentProvisionType {
    pub const BINDING: Binding = Binding {
        strength: BindingStrength::Required,
        value_set: "http://hl7.org/fhir/ValueSet/consent-provision-type|5.0.0",
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentProvisionType::Deny => "deny",
            ConsentProvisionType::Permit => "permit",
        }
    }
}

impl FromStr for ConsentProvisionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deny" => Ok(ConsentProvisionType::Deny),
            "permit" => Ok(ConsentProvisionType::Permit),
            _ => Err(Error::UnknownCode {
                kind: "ConsentProvisionType",
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConsentProvisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a narrative's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeStatus {
    Generated,
    Extensions,
    Additional,
    Empty,
}

impl NarrativeStatus {
    pub const BINDING: Binding = Binding {
        strength: BindingStrength::Required,
        value_set: "http://hl7.org/fhir/ValueSet/narrative-status|5.0.0",
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativeStatus::Generated => "generated",
            NarrativeStatus::Extensions => "extensions",
            NarrativeStatus::Additional => "additional",
            NarrativeStatus::Empty => "empty",
        }
    }
}

impl FromStr for NarrativeStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generated" => Ok(NarrativeStatus::Generated),
            "extensions" => Ok(NarrativeStatus::Extensions),
            "additional" => Ok(NarrativeStatus::Additional),
            "empty" => Ok(NarrativeStatus::Empty),
            _ => Err(Error::UnknownCode {
                kind: "NarrativeStatus",
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for NarrativeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purpose of an identifier within its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierUse {
    Usual,
    Official,
    Temp,
    Secondary,
    Old,
}

impl IdentifierUse {
    pub const BINDING: Binding = Binding {
        strength: BindingStrength::Required,
        value_set: "http://hl7.org/fhir/ValueSet/identifier-use|5.0.0",
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierUse::Usual => "usual",
            IdentifierUse::Official => "official",
            IdentifierUse::Temp => "temp",
            IdentifierUse::Secondary => "secondary",
            IdentifierUse::Old => "old",
        }
    }
}

impl FromStr for IdentifierUse {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usual" => Ok(IdentifierUse::Usual),
            "official" => Ok(IdentifierUse::Official),
            "temp" => Ok(IdentifierUse::Temp),
            "secondary" => Ok(IdentifierUse::Secondary),
            "old" => Ok(IdentifierUse::Old),
            _ => Err(Error::UnknownCode {
                kind: "IdentifierUse",
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for IdentifierUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a quantity value should be understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityComparator {
    LessThan,
    LessOrEqual,
    GreaterOrEqual,
    GreaterThan,
    StartsAfter,
    EndsBefore,
}

impl QuantityComparator {
    pub const BINDING: Binding = Binding {
        strength: BindingStrength::Required,
        value_set: "http://hl7.org/fhir/ValueSet/quantity-comparator|5.0.0",
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityComparator::LessThan => "<",
            QuantityComparator::LessOrEqual => "<=",
            QuantityComparator::GreaterOrEqual => ">=",
            QuantityComparator::GreaterThan => ">",
            QuantityComparator::StartsAfter => "sa",
            QuantityComparator::EndsBefore => "eb",
        }
    }
}

impl FromStr for QuantityComparator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(QuantityComparator::LessThan),
            "<=" => Ok(QuantityComparator::LessOrEqual),
            ">=" => Ok(QuantityComparator::GreaterOrEqual),
            ">" => Ok(QuantityComparator::GreaterThan),
            "sa" => Ok(QuantityComparator::StartsAfter),
            "eb" => Ok(QuantityComparator::EndsBefore),
            _ => Err(Error::UnknownCode {
                kind: "QuantityComparator",
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for QuantityComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of regulatory identifier carried by a device definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceRegulatoryIdentifierType {
    Basic,
    Master,
    License,
}

impl DeviceRegulatoryIdentifierType {
    pub const BINDING: Binding = Binding {
        strength: BindingStrength::Required,
        value_set:
            "http://hl7.org/fhir/ValueSet/devicedefinition-regulatory-identifier-type|5.0.0",
    };

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceRegulatoryIdentifierType::Basic => "basic",
            DeviceRegulatoryIdentifierType::Master => "master",
            DeviceRegulatoryIdentifierType::License => "license",
        }
    }
}

impl FromStr for DeviceRegulatoryIdentifierType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(DeviceRegulatoryIdentifierType::Basic),
            "master" => Ok(DeviceRegulatoryIdentifierType::Master),
            "license" => Ok(DeviceRegulatoryIdentifierType::License),
            _ => Err(Error::UnknownCode {
                kind: "DeviceRegulatoryIdentifierType",
                code: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeviceRegulatoryIdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_state_round_trips_through_str() {
        for state in [
            ConsentState::Draft,
            ConsentState::Active,
            ConsentState::Inactive,
            ConsentState::NotDone,
            ConsentState::EnteredInError,
            ConsentState::Unknown,
        ] {
            assert_eq!(state.as_str().parse::<ConsentState>().unwrap(), state);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "frozen".parse::<ConsentState>().unwrap_err();
        assert!(matches!(err, Error::UnknownCode { kind: "ConsentState", .. }));
    }

    #[test]
    fn bindings_declare_required_strength() {
        assert_eq!(ConsentState::BINDING.strength, BindingStrength::Required);
        assert!(ConsentState::BINDING.value_set.contains("consent-state"));
    }

    #[test]
    fn comparator_uses_symbol_codes() {
        assert_eq!(QuantityComparator::LessThan.as_str(), "<");
        assert_eq!("sa".parse::<QuantityComparator>().unwrap(), QuantityComparator::StartsAfter);
    }
}
