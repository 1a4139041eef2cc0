//! End-to-end exercises of the construction and traversal contract,
//! using fully populated instances rather than the per-module minimal
//! cases covered by unit tests.

use stannum_model::code::{ConsentProvisionType, ConsentState, DeviceRegulatoryIdentifierType};
use stannum_model::datatype::{CodeableConcept, Coding, Identifier, Meta, Period};
use stannum_model::primitive::DateTime;
use stannum_model::resource::{
    Consent, ConsentProvision, ConsentVerification, DeviceDefinition, DeviceProperty, HasPart,
    ProvisionActor, RegulatoryIdentifier, Resource, UdiDeviceIdentifier,
};
use stannum_model::{
    Build, Error, Extension, Reference, ResourceType, ValidationMode, Visitable, Visitor,
};

fn privacy_category() -> CodeableConcept {
    CodeableConcept::builder()
        .coding(
            Coding::builder()
                .system("http://loinc.org")
                .code("59284-0")
                .display("Consent Document")
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn full_consent() -> Consent {
    Consent::builder()
        .id("consent-example")
        .meta(
            Meta::builder()
                .version_id("3")
                .last_updated("2024-05-01T12:00:00Z")
                .build()
                .unwrap(),
        )
        .identifier(
            Identifier::builder()
                .system("urn:ietf:rfc:3986")
                .value("Local eCMS identifier")
                .build()
                .unwrap(),
        )
        .status(ConsentState::Active)
        .category(privacy_category())
        .subject(Reference::to(ResourceType::Patient, "p1"))
        .date("2024-05-01")
        .period(
            Period::builder()
                .start("2024-05-01T00:00:00Z")
                .end("2025-05-01T00:00:00Z")
                .build()
                .unwrap(),
        )
        .grantor(Reference::to(ResourceType::Patient, "p1"))
        .grantee(Reference::to(ResourceType::Organization, "hl7"))
        .verification(
            ConsentVerification::builder()
                .verified(true)
                .verified_with(Reference::to(ResourceType::RelatedPerson, "mother"))
                .verification_date(DateTime::new("2024-04-21".to_string()))
                .build()
                .unwrap(),
        )
        .decision(ConsentProvisionType::Permit)
        .provision(
            ConsentProvision::builder()
                .period(
                    Period::builder()
                        .start("2024-05-01T00:00:00Z")
                        .build()
                        .unwrap(),
                )
                .actor(
                    ProvisionActor::builder()
                        .role(CodeableConcept::of(
                            "http://terminology.hl7.org/CodeSystem/v3-ParticipationType",
                            "PRCP",
                        )
                        .unwrap())
                        .reference(Reference::to(ResourceType::Practitioner, "xcda-author"))
                        .build()
                        .unwrap(),
                )
                .provision(
                    ConsentProvision::builder()
                        .action(CodeableConcept::of(
                            "http://terminology.hl7.org/CodeSystem/consentaction",
                            "access",
                        )
                        .unwrap())
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

fn full_device_definition() -> DeviceDefinition {
    DeviceDefinition::builder()
        .id("dd-example")
        .description("An implantable pump")
        .udi_device_identifier(
            UdiDeviceIdentifier::builder()
                .device_identifier("00844588003288")
                .issuer("http://hl7.org/fhir/NamingSystem/gs1")
                .jurisdiction("http://hl7.org/fhir/NamingSystem/fda-udi")
                .build()
                .unwrap(),
        )
        .regulatory_identifier(
            RegulatoryIdentifier::builder()
                .type_(DeviceRegulatoryIdentifierType::Basic)
                .device_identifier("EUDAMED-77")
                .issuer("https://ec.europa.eu/tools/eudamed")
                .jurisdiction("https://ec.europa.eu/tools/eudamed")
                .build()
                .unwrap(),
        )
        .part_number("51534-5555")
        .manufacturer(Reference::to(ResourceType::Organization, "acme"))
        .model_number("A.1.1")
        .property(
            DeviceProperty::builder()
                .type_(CodeableConcept::of("https://www.gmdnagency.org", "47069").unwrap())
                .value(true)
                .build()
                .unwrap(),
        )
        .has_part(
            HasPart::builder()
                .reference(Reference::to(ResourceType::DeviceDefinition, "dd-motor"))
                .count(2u32)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

#[test]
fn round_trip_preserves_every_field() {
    let consent = full_consent();
    assert_eq!(consent.to_builder().build().unwrap(), consent);

    let definition = full_device_definition();
    assert_eq!(definition.to_builder().build().unwrap(), definition);
}

#[test]
fn derived_instance_differs_only_where_changed() {
    let consent = full_consent();
    let revoked = consent
        .to_builder()
        .status(ConsentState::Inactive)
        .build()
        .unwrap();
    assert_ne!(consent, revoked);
    assert_eq!(consent.identifier(), revoked.identifier());
    assert_eq!(consent.provision(), revoked.provision());
    // the source instance is untouched
    assert_eq!(
        consent.status().and_then(|s| s.value()),
        Some(&ConsentState::Active)
    );
}

#[test]
fn append_setters_accumulate_in_call_order() {
    let consent = Consent::builder()
        .status(ConsentState::Active)
        .grantee(Reference::to(ResourceType::Organization, "first"))
        .grantee(Reference::to(ResourceType::CareTeam, "second"))
        .build()
        .unwrap();
    let literals: Vec<_> = consent
        .grantee()
        .iter()
        .filter_map(|r| r.reference().and_then(|s| s.value()).map(String::as_str))
        .collect();
    assert_eq!(literals, ["Organization/first", "CareTeam/second"]);
}

#[test]
fn replace_setter_discards_staged_entries() {
    let consent = Consent::builder()
        .status(ConsentState::Active)
        .grantee(Reference::to(ResourceType::Organization, "first"))
        .set_grantee(vec![Reference::to(ResourceType::Patient, "only")])
        .build()
        .unwrap();
    assert_eq!(consent.grantee().len(), 1);
}

#[test]
fn singular_setter_overwrites() {
    let consent = Consent::builder()
        .status(ConsentState::Draft)
        .status(ConsentState::Active)
        .build()
        .unwrap();
    assert_eq!(
        consent.status().and_then(|s| s.value()),
        Some(&ConsentState::Active)
    );
}

#[test]
fn unchecked_instances_read_back_as_absent() {
    let verification = ConsentVerification::builder()
        .verified_with(Reference::to(ResourceType::Patient, "p1"))
        .build_with(ValidationMode::Unchecked)
        .unwrap();
    assert!(verification.verified().is_none());

    let consent = Consent::builder()
        .verification(verification)
        .build_with(ValidationMode::Unchecked)
        .unwrap();
    assert!(consent.status().is_none());
    assert!(consent.identifier().is_empty());

    // strict rebuild of the same tree reports the innermost gap
    let err = consent.to_builder().status(ConsentState::Active).build();
    assert!(err.is_ok(), "outer strict build does not re-validate entries");
}

#[test]
fn strict_build_reports_the_first_violation_in_declared_order() {
    let err = Consent::builder()
        .subject(Reference::to(ResourceType::Device, "d1"))
        .build()
        .unwrap_err();
    // missing status is reported before the bad subject target
    assert_eq!(err, Error::MissingField("status"));
}

#[test]
fn contained_resources_traverse_with_their_parent() {
    let inner = full_device_definition();
    let consent = Consent::builder()
        .status(ConsentState::Active)
        .contained(inner)
        .build()
        .unwrap();

    #[derive(Default)]
    struct TypeCollector(Vec<&'static str>);

    impl Visitor for TypeCollector {
        fn visit_start(&mut self, _name: &str, _index: Option<usize>, node: &dyn Visitable) {
            self.0.push(node.type_name());
        }
    }

    let mut collector = TypeCollector::default();
    consent.visit_children(&mut collector);
    assert!(collector.0.contains(&"DeviceDefinition"));
    assert!(collector.0.contains(&"DeviceDefinition.UdiDeviceIdentifier"));
}

#[test]
fn fingerprints_agree_for_equal_instances_across_resources() {
    let a = Resource::from(full_consent());
    let b = Resource::from(full_consent());
    assert_eq!(a.fingerprint(), b.fingerprint());

    let c = Resource::from(full_device_definition());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_eq!(c.resource_type(), ResourceType::DeviceDefinition);
}

#[test]
fn modifier_extensions_are_observable_before_processing() {
    use stannum_model::BackboneElement;

    let provision = ConsentProvision::builder()
        .modifier_extension(
            Extension::new("http://example.org/fhir/retracted", true).unwrap(),
        )
        .build()
        .unwrap();
    assert!(provision.has_modifier_extensions());

    let plain = ConsentProvision::builder()
        .action(CodeableConcept::text_only("read").unwrap())
        .build()
        .unwrap();
    assert!(!plain.has_modifier_extensions());
}
