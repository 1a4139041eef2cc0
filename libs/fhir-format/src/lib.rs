//! FHIR JSON serialization.
//! The writer is schema-agnostic: it drives the model's visitor traversal
//! and follows the official JSON mapping rules used by HL7 FHIR:
//! - Root object carries `resourceType`.
//! - Primitive values are encoded as bare JSON values.
//! - Primitive metadata (`id`, `extension`) is carried through `_field` entries.
//! - Repeated primitives keep value and metadata arrays aligned with nulls.

use serde_json::{Map, Number, Value};
use stannum_model::visitor::{walk, NodeKind, ValueRef, Visitable, Visitor};
use stannum_model::Resource;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize a resource to a JSON value.
///
/// Output field order follows the model's declared field order, so the
/// same instance always produces the same document.
pub fn to_json(resource: &Resource) -> Value {
    let mut writer = JsonWriter::new();
    walk(resource, resource.type_name(), None, &mut writer);
    writer.into_root()
}

/// Serialize a resource to a compact JSON string.
pub fn to_json_string(resource: &Resource) -> Result<String, FormatError> {
    Ok(serde_json::to_string(&to_json(resource))?)
}

/// Serialize a resource to a pretty-printed JSON string.
pub fn to_json_string_pretty(resource: &Resource) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&to_json(resource))?)
}

enum Frame {
    /// A composite object, or a primitive's `_field` companion.
    Object(Map<String, Value>),
    /// A repeated field, collecting aligned value and companion arrays.
    List {
        values: Vec<Value>,
        companions: Vec<Value>,
        has_companion: bool,
    },
}

/// Visitor that builds the JSON document bottom-up on a frame stack.
struct JsonWriter {
    stack: Vec<Frame>,
    root: Value,
}

impl JsonWriter {
    fn new() -> Self {
        JsonWriter {
            stack: Vec::new(),
            root: Value::Null,
        }
    }

    fn into_root(self) -> Value {
        self.root
    }

    fn attach(&mut self, name: &str, value: Value, companion: Value) {
        match self.stack.last_mut() {
            Some(Frame::List {
                values,
                companions,
                has_companion,
            }) => {
                if !companion.is_null() {
                    *has_companion = true;
                }
                values.push(value);
                companions.push(companion);
            }
            Some(Frame::Object(map)) => {
                if !value.is_null() {
                    map.insert(name.to_string(), value);
                }
                if !companion.is_null() {
                    map.insert(format!("_{name}"), companion);
                }
            }
            None => self.root = value,
        }
    }
}

impl Visitor for JsonWriter {
    fn visit_start(&mut self, _name: &str, _index: Option<usize>, node: &dyn Visitable) {
        let mut map = Map::new();
        if node.kind() == NodeKind::Resource {
            map.insert(
                "resourceType".to_string(),
                Value::String(node.type_name().to_string()),
            );
        }
        // On a primitive this frame is the `_field` companion; the bare
        // value is attached separately at visit_end.
        if let Some(id) = node.element_id() {
            map.insert("id".to_string(), Value::String(id.to_string()));
        }
        self.stack.push(Frame::Object(map));
    }

    fn visit_end(&mut self, name: &str, _index: Option<usize>, node: &dyn Visitable) {
        let map = match self.stack.pop() {
            Some(Frame::Object(map)) => map,
            _ => return,
        };
        if node.kind() == NodeKind::Primitive {
            let value = node.value().map(value_to_json).unwrap_or(Value::Null);
            let companion = if map.is_empty() {
                Value::Null
            } else {
                Value::Object(map)
            };
            self.attach(name, value, companion);
        } else {
            let value = if map.is_empty() {
                Value::Null
            } else {
                Value::Object(map)
            };
            self.attach(name, value, Value::Null);
        }
    }

    fn visit_list_start(&mut self, _name: &str, _len: usize) {
        self.stack.push(Frame::List {
            values: Vec::new(),
            companions: Vec::new(),
            has_companion: false,
        });
    }

    fn visit_list_end(&mut self, name: &str, _len: usize) {
        let (values, companions, has_companion) = match self.stack.pop() {
            Some(Frame::List {
                values,
                companions,
                has_companion,
            }) => (values, companions, has_companion),
            _ => return,
        };
        if let Some(Frame::Object(map)) = self.stack.last_mut() {
            if values.iter().any(|v| !v.is_null()) {
                map.insert(name.to_string(), Value::Array(values));
            }
            if has_companion {
                map.insert(format!("_{name}"), Value::Array(companions));
            }
        }
    }
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Boolean(b) => Value::Bool(b),
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::UnsignedInt(u) => Value::Number(u.into()),
        // Decimals keep their textual form when it parses as a JSON number.
        ValueRef::Decimal(d) => d
            .to_string()
            .parse::<Number>()
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(d.to_string())),
        ValueRef::Str(s) => Value::String(s.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stannum_model::code::{ConsentProvisionType, ConsentState};
    use stannum_model::datatype::{CodeableConcept, Coding, Period, Quantity};
    use stannum_model::primitive::DateTime;
    use stannum_model::resource::{
        Consent, ConsentProvision, ConsentVerification, DeviceDefinition, DeviceProperty,
    };
    use stannum_model::{Build, Extension, Reference, ResourceType};

    #[test]
    fn minimal_consent_serializes_with_resource_type_first() {
        let consent = Consent::builder()
            .id("c1")
            .status(ConsentState::Active)
            .build()
            .unwrap();
        let value = to_json(&consent.into());
        assert_eq!(
            value,
            json!({
                "resourceType": "Consent",
                "id": "c1",
                "status": "active"
            })
        );
    }

    #[test]
    fn field_order_is_deterministic() {
        let consent = Consent::builder()
            .id("c1")
            .status(ConsentState::Active)
            .decision(ConsentProvisionType::Permit)
            .build()
            .unwrap();
        let resource: Resource = consent.into();
        let rendered = to_json_string(&resource).unwrap();
        assert_eq!(
            rendered,
            r#"{"resourceType":"Consent","id":"c1","status":"active","decision":"permit"}"#
        );
        assert_eq!(to_json_string(&resource).unwrap(), rendered);
    }

    #[test]
    fn primitive_extension_produces_a_companion_field() {
        let note = Extension::new("http://example.org/fhir/note", "delegated").unwrap();
        let consent = Consent::builder()
            .status(ConsentState::Active)
            .date(DateTime::new("2024-05-01".to_string()).with_extension(note))
            .build()
            .unwrap();
        let value = to_json(&consent.into());
        assert_eq!(
            value,
            json!({
                "resourceType": "Consent",
                "status": "active",
                "date": "2024-05-01",
                "_date": {
                    "extension": [{
                        "url": "http://example.org/fhir/note",
                        "valueString": "delegated"
                    }]
                }
            })
        );
    }

    #[test]
    fn extension_only_primitive_emits_only_the_companion() {
        let note = Extension::new("http://example.org/fhir/unknown", true).unwrap();
        let consent = Consent::builder()
            .status(ConsentState::Active)
            .date(DateTime::extension_only(vec![note]))
            .build()
            .unwrap();
        let value = to_json(&consent.into());
        assert!(value.get("date").is_none());
        assert!(value.get("_date").is_some());
    }

    #[test]
    fn repeated_primitives_align_value_and_companion_arrays() {
        let note = Extension::new("http://example.org/fhir/witnessed", true).unwrap();
        let verification = ConsentVerification::builder()
            .verified(true)
            .verification_date(DateTime::new("2024-01-01".to_string()))
            .verification_date(DateTime::new("2024-02-01".to_string()).with_extension(note))
            .build()
            .unwrap();
        let consent = Consent::builder()
            .status(ConsentState::Active)
            .verification(verification)
            .build()
            .unwrap();
        let value = to_json(&consent.into());
        assert_eq!(
            value["verification"][0]["verificationDate"],
            json!(["2024-01-01", "2024-02-01"])
        );
        assert_eq!(
            value["verification"][0]["_verificationDate"],
            json!([
                null,
                {
                    "extension": [{
                        "url": "http://example.org/fhir/witnessed",
                        "valueBoolean": true
                    }]
                }
            ])
        );
    }

    #[test]
    fn composites_nest_in_declared_order() {
        let consent = Consent::builder()
            .status(ConsentState::Inactive)
            .category(CodeableConcept::of("http://loinc.org", "59284-0").unwrap())
            .subject(Reference::to(ResourceType::Patient, "p7"))
            .period(
                Period::builder()
                    .start("2023-01-01T00:00:00Z")
                    .end("2023-12-31T23:59:59Z")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let value = to_json(&consent.into());
        assert_eq!(
            value,
            json!({
                "resourceType": "Consent",
                "status": "inactive",
                "category": [{
                    "coding": [{"system": "http://loinc.org", "code": "59284-0"}]
                }],
                "subject": {"reference": "Patient/p7"},
                "period": {
                    "start": "2023-01-01T00:00:00Z",
                    "end": "2023-12-31T23:59:59Z"
                }
            })
        );
    }

    #[test]
    fn element_id_is_emitted_inline_on_composites() {
        let coding = Coding::builder()
            .id("elem-9")
            .system("http://snomed.info/sct")
            .code("371537001")
            .build()
            .unwrap();
        let consent = Consent::builder()
            .status(ConsentState::Active)
            .provision(
                ConsentProvision::builder()
                    .security_label(coding)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let value = to_json(&consent.into());
        assert_eq!(
            value["provision"][0]["securityLabel"][0]["id"],
            json!("elem-9")
        );
    }

    #[test]
    fn primitive_id_lands_in_the_companion() {
        let consent = Consent::builder()
            .status(ConsentState::Active)
            .date(DateTime::new("2024-05-01".to_string()).with_id("d1"))
            .build()
            .unwrap();
        let value = to_json(&consent.into());
        assert_eq!(value["date"], json!("2024-05-01"));
        assert_eq!(value["_date"], json!({"id": "d1"}));
    }

    #[test]
    fn string_output_round_trips_through_serde() {
        let consent = Consent::builder()
            .status(ConsentState::Active)
            .build()
            .unwrap();
        let resource: Resource = consent.into();
        let text = to_json_string(&resource).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, to_json(&resource));
    }

    #[test]
    fn choice_value_uses_its_wire_name() {
        let property = DeviceProperty::builder()
            .type_(CodeableConcept::of("https://www.gmdnagency.org", "47069").unwrap())
            .value(
                Quantity::builder()
                    .value(rust_decimal::Decimal::new(125, 1))
                    .unit("mm")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let definition = DeviceDefinition::builder()
            .id("dd1")
            .model_number("T-1000")
            .property(property)
            .build()
            .unwrap();
        let value = to_json(&definition.into());
        assert_eq!(
            value["property"][0]["valueQuantity"],
            json!({"value": 12.5, "unit": "mm"})
        );
        assert!(value["property"][0].get("value").is_none());
    }
}
