//! Whole-document serialization checks against hand-written expected JSON.

use serde_json::{json, Value};
use stannum_format::{to_json, to_json_string_pretty};
use stannum_model::code::{ConsentProvisionType, ConsentState, NarrativeStatus};
use stannum_model::datatype::{CodeableConcept, Coding, Identifier, Narrative, Period};
use stannum_model::resource::{Consent, ConsentProvision, ConsentVerification, ProvisionActor};
use stannum_model::{Build, Reference, Resource, ResourceType};

fn example_consent() -> Resource {
    Consent::builder()
        .id("consent-example-basic")
        .text(
            Narrative::builder()
                .status(NarrativeStatus::Generated)
                .div("<div xmlns=\"http://www.w3.org/1999/xhtml\">Withhold from family</div>")
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
        .category(
            CodeableConcept::builder()
                .coding(
                    Coding::builder()
                        .system("http://loinc.org")
                        .code("59284-0")
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .subject(Reference::to(ResourceType::Patient, "pat2"))
        .date("2016-05-11")
        .period(
            Period::builder()
                .start("2016-05-11T00:00:00Z")
                .end("2017-05-11T00:00:00Z")
                .build()
                .unwrap(),
        )
        .verification(
            ConsentVerification::builder()
                .verified(true)
                .verified_with(Reference::to(ResourceType::RelatedPerson, "mother"))
                .build()
                .unwrap(),
        )
        .decision(ConsentProvisionType::Deny)
        .provision(
            ConsentProvision::builder()
                .actor(
                    ProvisionActor::builder()
                        .role(
                            CodeableConcept::of(
                                "http://terminology.hl7.org/CodeSystem/v3-RoleCode",
                                "PRCP",
                            )
                            .unwrap(),
                        )
                        .reference(Reference::to(ResourceType::RelatedPerson, "sister"))
                        .build()
                        .unwrap(),
                )
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
        .into()
}

#[test]
fn full_consent_document_matches_the_expected_shape() {
    let value = to_json(&example_consent());
    assert_eq!(
        value,
        json!({
            "resourceType": "Consent",
            "id": "consent-example-basic",
            "text": {
                "status": "generated",
                "div": "<div xmlns=\"http://www.w3.org/1999/xhtml\">Withhold from family</div>"
            },
            "identifier": [{
                "system": "urn:ietf:rfc:3986",
                "value": "Local eCMS identifier"
            }],
            "status": "active",
            "category": [{
                "coding": [{"system": "http://loinc.org", "code": "59284-0"}]
            }],
            "subject": {"reference": "Patient/pat2"},
            "date": "2016-05-11",
            "period": {
                "start": "2016-05-11T00:00:00Z",
                "end": "2017-05-11T00:00:00Z"
            },
            "verification": [{
                "verified": true,
                "verifiedWith": {"reference": "RelatedPerson/mother"}
            }],
            "decision": "deny",
            "provision": [{
                "actor": [{
                    "role": {
                        "coding": [{
                            "system": "http://terminology.hl7.org/CodeSystem/v3-RoleCode",
                            "code": "PRCP"
                        }]
                    },
                    "reference": {"reference": "RelatedPerson/sister"}
                }]
            }]
        })
    );
}

#[test]
fn pretty_output_parses_back_to_the_same_value() {
    let resource = example_consent();
    let pretty = to_json_string_pretty(&resource).unwrap();
    let parsed: Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(parsed, to_json(&resource));
}

#[test]
fn equal_instances_serialize_identically() {
    let a = to_json(&example_consent());
    let b = to_json(&example_consent());
    assert_eq!(a, b);
}
