//! Structural validation support
//!
//! Stateless precondition checks shared by every builder, so generated and
//! hand-written types report identically-worded failures. Each check is
//! pure, runs exactly once at build time, and fails fast on the first
//! violation: required-field checks come before list checks, which come
//! before reference-type checks, in every type.

use crate::error::{Error, Result};
use crate::reference::{Reference, ResourceType};
use crate::visitor::Visitable;

/// Whether `build` enforces structural invariants.
///
/// The mode is passed explicitly to [`Build::build_with`] instead of living
/// in process-global state. [`Unchecked`](ValidationMode::Unchecked) is an
/// explicit trust boundary: it constructs instances that may violate their
/// own declared invariants (required fields unset, vacuous elements), which
/// partial-data pipelines rely on. Getters on such instances return
/// `None`/empty rather than panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    #[default]
    Strict,
    Unchecked,
}

impl ValidationMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

/// Staged construction protocol implemented by every builder.
///
/// `build` either returns a fully valid instance or the first violation in
/// declaration order; no partially-validated instance is ever observable.
pub trait Build {
    type Target;

    fn build_with(self, mode: ValidationMode) -> Result<Self::Target>;

    fn build(self) -> Result<Self::Target>
    where
        Self: Sized,
    {
        self.build_with(ValidationMode::Strict)
    }
}

/// Fails when a required singular field is absent.
pub fn require_non_null<T>(value: &Option<T>, field: &'static str) -> Result<()> {
    if value.is_none() {
        return Err(Error::MissingField(field));
    }
    Ok(())
}

/// Fails when a required choice field is unpopulated.
///
/// Choice fields are enums, so a populated choice cannot hold a type outside
/// its declared alternatives; presence is the only check left to make.
pub fn require_choice<T>(value: &Option<T>, field: &'static str) -> Result<()> {
    if value.is_none() {
        return Err(Error::MissingChoice(field));
    }
    Ok(())
}

/// Fails if a repeated field contains a vacuous entry.
///
/// Vectors cannot hold nulls, so the null-entry failure of the original
/// contract is unrepresentable here; what remains observable is an entry
/// with no value, no children and no id.
pub fn check_list<T: Visitable>(list: &[T], field: &'static str) -> Result<()> {
    for (index, entry) in list.iter().enumerate() {
        if is_vacuous(entry) {
            return Err(Error::EmptyListEntry { field, index });
        }
    }
    Ok(())
}

/// Fails if a reference declares a target type outside the allowed set.
///
/// The check is advisory and pre-dereference: a reference with no
/// resolvable target type passes, and nothing is ever dereferenced here.
pub fn check_reference_type(
    reference: &Option<Reference>,
    field: &'static str,
    allowed: &'static [ResourceType],
) -> Result<()> {
    if let Some(reference) = reference {
        check_one_reference(reference, field, allowed)?;
    }
    Ok(())
}

/// [`check_reference_type`] over every entry of a repeated field.
pub fn check_reference_types(
    references: &[Reference],
    field: &'static str,
    allowed: &'static [ResourceType],
) -> Result<()> {
    for reference in references {
        check_one_reference(reference, field, allowed)?;
    }
    Ok(())
}

fn check_one_reference(
    reference: &Reference,
    field: &'static str,
    allowed: &'static [ResourceType],
) -> Result<()> {
    if let Some(target) = reference.target_type() {
        if !allowed.contains(&target) {
            return Err(Error::DisallowedReferenceTarget {
                field,
                target,
                allowed,
            });
        }
    }
    Ok(())
}

/// Fails if an element carries neither a value nor any children.
pub fn require_value_or_children(node: &dyn Visitable) -> Result<()> {
    if is_vacuous(node) {
        return Err(Error::EmptyElement(node.type_name()));
    }
    Ok(())
}

fn is_vacuous(node: &dyn Visitable) -> bool {
    node.value().is_none() && !node.has_children() && node.element_id().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Boolean, FhirString};

    #[test]
    fn require_non_null_names_the_field() {
        let missing: Option<Boolean> = None;
        assert_eq!(
            require_non_null(&missing, "verified").unwrap_err(),
            Error::MissingField("verified")
        );
        assert!(require_non_null(&Some(Boolean::new(true)), "verified").is_ok());
    }

    #[test]
    fn check_list_rejects_vacuous_entries() {
        let list = vec![FhirString::from("a"), FhirString::default()];
        assert_eq!(
            check_list(&list, "alias").unwrap_err(),
            Error::EmptyListEntry { field: "alias", index: 1 }
        );
    }

    #[test]
    fn check_list_accepts_extension_only_entries() {
        let entry = FhirString::default().with_id("anchor");
        assert!(check_list(&[entry], "alias").is_ok());
    }

    #[test]
    fn untyped_reference_passes_the_target_check() {
        let reference = Reference::builder()
            .display("someone")
            .build_with(ValidationMode::Unchecked)
            .unwrap();
        assert!(check_reference_type(
            &Some(reference),
            "subject",
            &[ResourceType::Patient]
        )
        .is_ok());
    }

    #[test]
    fn disallowed_target_is_reported_with_the_allowed_set() {
        let reference = Reference::to(ResourceType::Device, "d1");
        let err = check_reference_type(&Some(reference), "subject", &[ResourceType::Patient])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DisallowedReferenceTarget {
                field: "subject",
                target: ResourceType::Device,
                ..
            }
        ));
        assert!(err.to_string().contains("Patient"));
    }

    #[test]
    fn vacuous_element_is_rejected() {
        let empty = FhirString::default();
        assert_eq!(
            require_value_or_children(&empty).unwrap_err(),
            Error::EmptyElement("string")
        );
    }
}
