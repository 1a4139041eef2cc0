//! The Consent resource
//!
//! A record of a healthcare consumer's choices, permitting or denying
//! identified recipients to perform actions within a given policy context.

use std::sync::OnceLock;

use crate::code::{ConsentProvisionType, ConsentState};
use crate::datatype::{CodeableConcept, Coding, Identifier, Meta, Narrative, Period};
use crate::element::{BackboneElement, Element};
use crate::error::Result;
use crate::extension::Extension;
use crate::primitive::{Boolean, Code, Coded, Date, DateTime, Uri};
use crate::reference::{Reference, ResourceType};
use crate::resource::Resource;
use crate::validation::{self, Build, ValidationMode};
use crate::visitor::{visit_field, visit_list, walk, Fingerprint, NodeKind, Visitable, Visitor};

const SUBJECT_TYPES: &[ResourceType] = &[
    ResourceType::Patient,
    ResourceType::Practitioner,
    ResourceType::Group,
];

const GRANT_PARTY_TYPES: &[ResourceType] = &[
    ResourceType::CareTeam,
    ResourceType::HealthcareService,
    ResourceType::Organization,
    ResourceType::Patient,
    ResourceType::Practitioner,
    ResourceType::RelatedPerson,
    ResourceType::PractitionerRole,
];

const VERIFIED_BY_TYPES: &[ResourceType] = &[
    ResourceType::Organization,
    ResourceType::Practitioner,
    ResourceType::PractitionerRole,
];

const VERIFIED_WITH_TYPES: &[ResourceType] =
    &[ResourceType::Patient, ResourceType::RelatedPerson];

const ACTOR_REFERENCE_TYPES: &[ResourceType] = &[
    ResourceType::Device,
    ResourceType::Group,
    ResourceType::CareTeam,
    ResourceType::Organization,
    ResourceType::Patient,
    ResourceType::Practitioner,
    ResourceType::RelatedPerson,
    ResourceType::PractitionerRole,
];

/// A consent record: who consented, to what, verified how, with which
/// provisions.
#[derive(Debug, Clone)]
pub struct Consent {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    identifier: Vec<Identifier>,
    status: Option<Coded<ConsentState>>,
    category: Vec<CodeableConcept>,
    subject: Option<Reference>,
    date: Option<Date>,
    period: Option<Period>,
    grantor: Vec<Reference>,
    grantee: Vec<Reference>,
    verification: Vec<ConsentVerification>,
    decision: Option<Coded<ConsentProvisionType>>,
    provision: Vec<ConsentProvision>,
    fingerprint: OnceLock<u64>,
}

impl Consent {
    pub fn builder() -> ConsentBuilder {
        ConsentBuilder::default()
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

    /// The state of the consent. Present on every strictly-built instance.
    pub fn status(&self) -> Option<&Coded<ConsentState>> {
        self.status.as_ref()
    }

    pub fn category(&self) -> &[CodeableConcept] {
        &self.category
    }

    pub fn subject(&self) -> Option<&Reference> {
        self.subject.as_ref()
    }

    pub fn date(&self) -> Option<&Date> {
        self.date.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn grantor(&self) -> &[Reference] {
        &self.grantor
    }

    pub fn grantee(&self) -> &[Reference] {
        &self.grantee
    }

    pub fn verification(&self) -> &[ConsentVerification] {
        &self.verification
    }

    pub fn decision(&self) -> Option<&Coded<ConsentProvisionType>> {
        self.decision.as_ref()
    }

    pub fn provision(&self) -> &[ConsentProvision] {
        &self.provision
    }

    /// Structural digest of the whole instance, computed once.
    pub fn fingerprint(&self) -> u64 {
        *self.fingerprint.get_or_init(|| {
            let mut hasher = Fingerprint::new();
            walk(self, "Consent", None, &mut hasher);
            hasher.finish()
        })
    }

    pub fn to_builder(&self) -> ConsentBuilder {
        ConsentBuilder {
            id: self.id.clone(),
            meta: self.meta.clone(),
            implicit_rules: self.implicit_rules.clone(),
            language: self.language.clone(),
            text: self.text.clone(),
            contained: self.contained.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            identifier: self.identifier.clone(),
            status: self.status.clone(),
            category: self.category.clone(),
            subject: self.subject.clone(),
            date: self.date.clone(),
            period: self.period.clone(),
            grantor: self.grantor.clone(),
            grantee: self.grantee.clone(),
            verification: self.verification.clone(),
            decision: self.decision.clone(),
            provision: self.provision.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.status, "status")?;
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::check_list(&self.identifier, "identifier")?;
        validation::check_list(&self.category, "category")?;
        validation::check_list(&self.grantor, "grantor")?;
        validation::check_list(&self.grantee, "grantee")?;
        validation::check_list(&self.verification, "verification")?;
        validation::check_list(&self.provision, "provision")?;
        validation::check_reference_type(&self.subject, "subject", SUBJECT_TYPES)?;
        validation::check_reference_types(&self.grantor, "grantor", GRANT_PARTY_TYPES)?;
        validation::check_reference_types(&self.grantee, "grantee", GRANT_PARTY_TYPES)?;
        Ok(())
    }
}

// The memoized fingerprint is derived state and never part of equality.
impl PartialEq for Consent {
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
            && self.status == other.status
            && self.category == other.category
            && self.subject == other.subject
            && self.date == other.date
            && self.period == other.period
            && self.grantor == other.grantor
            && self.grantee == other.grantee
            && self.verification == other.verification
            && self.decision == other.decision
            && self.provision == other.provision
    }
}

impl Visitable for Consent {
    fn type_name(&self) -> &'static str {
        "Consent"
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
            || self.status.is_some()
            || !self.category.is_empty()
            || self.subject.is_some()
            || self.date.is_some()
            || self.period.is_some()
            || !self.grantor.is_empty()
            || !self.grantee.is_empty()
            || !self.verification.is_empty()
            || self.decision.is_some()
            || !self.provision.is_empty()
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
        visit_field(visitor, "status", self.status.as_ref());
        visit_list(visitor, "category", &self.category);
        visit_field(visitor, "subject", self.subject.as_ref());
        visit_field(visitor, "date", self.date.as_ref());
        visit_field(visitor, "period", self.period.as_ref());
        visit_list(visitor, "grantor", &self.grantor);
        visit_list(visitor, "grantee", &self.grantee);
        visit_list(visitor, "verification", &self.verification);
        visit_field(visitor, "decision", self.decision.as_ref());
        visit_list(visitor, "provision", &self.provision);
    }
}

impl Element for Consent {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for Consent {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentBuilder {
    id: Option<String>,
    meta: Option<Meta>,
    implicit_rules: Option<Uri>,
    language: Option<Code>,
    text: Option<Narrative>,
    contained: Vec<Resource>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    identifier: Vec<Identifier>,
    status: Option<Coded<ConsentState>>,
    category: Vec<CodeableConcept>,
    subject: Option<Reference>,
    date: Option<Date>,
    period: Option<Period>,
    grantor: Vec<Reference>,
    grantee: Vec<Reference>,
    verification: Vec<ConsentVerification>,
    decision: Option<Coded<ConsentProvisionType>>,
    provision: Vec<ConsentProvision>,
}

impl ConsentBuilder {
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

    pub fn status(mut self, status: impl Into<Coded<ConsentState>>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn category(mut self, category: CodeableConcept) -> Self {
        self.category.push(category);
        self
    }

    pub fn set_category(mut self, category: Vec<CodeableConcept>) -> Self {
        self.category = category;
        self
    }

    pub fn subject(mut self, subject: Reference) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn date(mut self, date: impl Into<Date>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn grantor(mut self, grantor: Reference) -> Self {
        self.grantor.push(grantor);
        self
    }

    pub fn set_grantor(mut self, grantor: Vec<Reference>) -> Self {
        self.grantor = grantor;
        self
    }

    pub fn grantee(mut self, grantee: Reference) -> Self {
        self.grantee.push(grantee);
        self
    }

    pub fn set_grantee(mut self, grantee: Vec<Reference>) -> Self {
        self.grantee = grantee;
        self
    }

    pub fn verification(mut self, verification: ConsentVerification) -> Self {
        self.verification.push(verification);
        self
    }

    pub fn set_verification(mut self, verification: Vec<ConsentVerification>) -> Self {
        self.verification = verification;
        self
    }

    pub fn decision(mut self, decision: impl Into<Coded<ConsentProvisionType>>) -> Self {
        self.decision = Some(decision.into());
        self
    }

    pub fn provision(mut self, provision: ConsentProvision) -> Self {
        self.provision.push(provision);
        self
    }

    pub fn set_provision(mut self, provision: Vec<ConsentProvision>) -> Self {
        self.provision = provision;
        self
    }
}

impl Build for ConsentBuilder {
    type Target = Consent;

    fn build_with(self, mode: ValidationMode) -> Result<Consent> {
        let consent = Consent {
            id: self.id,
            meta: self.meta,
            implicit_rules: self.implicit_rules,
            language: self.language,
            text: self.text,
            contained: self.contained,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            identifier: self.identifier,
            status: self.status,
            category: self.category,
            subject: self.subject,
            date: self.date,
            period: self.period,
            grantor: self.grantor,
            grantee: self.grantee,
            verification: self.verification,
            decision: self.decision,
            provision: self.provision,
            fingerprint: OnceLock::new(),
        };
        if mode.is_strict() {
            consent.validate()?;
        }
        Ok(consent)
    }
}

/// Who attested that the consent reflects the grantor's wishes.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentVerification {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    verified: Option<Boolean>,
    verified_by: Option<Reference>,
    verified_with: Option<Reference>,
    verification_date: Vec<DateTime>,
}

impl ConsentVerification {
    pub fn builder() -> ConsentVerificationBuilder {
        ConsentVerificationBuilder::default()
    }

    /// Required on every strictly-built instance.
    pub fn verified(&self) -> Option<&Boolean> {
        self.verified.as_ref()
    }

    pub fn verified_by(&self) -> Option<&Reference> {
        self.verified_by.as_ref()
    }

    pub fn verified_with(&self) -> Option<&Reference> {
        self.verified_with.as_ref()
    }

    pub fn verification_date(&self) -> &[DateTime] {
        &self.verification_date
    }

    pub fn to_builder(&self) -> ConsentVerificationBuilder {
        ConsentVerificationBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            verified: self.verified.clone(),
            verified_by: self.verified_by.clone(),
            verified_with: self.verified_with.clone(),
            verification_date: self.verification_date.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.verified, "verified")?;
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::check_list(&self.verification_date, "verificationDate")?;
        validation::check_reference_type(&self.verified_by, "verifiedBy", VERIFIED_BY_TYPES)?;
        validation::check_reference_type(
            &self.verified_with,
            "verifiedWith",
            VERIFIED_WITH_TYPES,
        )?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for ConsentVerification {
    fn type_name(&self) -> &'static str {
        "Consent.Verification"
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
            || self.verified.is_some()
            || self.verified_by.is_some()
            || self.verified_with.is_some()
            || !self.verification_date.is_empty()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "verified", self.verified.as_ref());
        visit_field(visitor, "verifiedBy", self.verified_by.as_ref());
        visit_field(visitor, "verifiedWith", self.verified_with.as_ref());
        visit_list(visitor, "verificationDate", &self.verification_date);
    }
}

impl Element for ConsentVerification {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for ConsentVerification {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentVerificationBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    verified: Option<Boolean>,
    verified_by: Option<Reference>,
    verified_with: Option<Reference>,
    verification_date: Vec<DateTime>,
}

impl ConsentVerificationBuilder {
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

    pub fn verified(mut self, verified: impl Into<Boolean>) -> Self {
        self.verified = Some(verified.into());
        self
    }

    pub fn verified_by(mut self, verified_by: Reference) -> Self {
        self.verified_by = Some(verified_by);
        self
    }

    pub fn verified_with(mut self, verified_with: Reference) -> Self {
        self.verified_with = Some(verified_with);
        self
    }

    pub fn verification_date(mut self, date: impl Into<DateTime>) -> Self {
        self.verification_date.push(date.into());
        self
    }

    pub fn set_verification_date(mut self, dates: Vec<DateTime>) -> Self {
        self.verification_date = dates;
        self
    }
}

impl Build for ConsentVerificationBuilder {
    type Target = ConsentVerification;

    fn build_with(self, mode: ValidationMode) -> Result<ConsentVerification> {
        let verification = ConsentVerification {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            verified: self.verified,
            verified_by: self.verified_by,
            verified_with: self.verified_with,
            verification_date: self.verification_date,
        };
        if mode.is_strict() {
            verification.validate()?;
        }
        Ok(verification)
    }
}

/// A constraint on one or more actions, possibly nested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsentProvision {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    period: Option<Period>,
    actor: Vec<ProvisionActor>,
    action: Vec<CodeableConcept>,
    security_label: Vec<Coding>,
    purpose: Vec<Coding>,
    code: Vec<CodeableConcept>,
    provision: Vec<ConsentProvision>,
}

impl ConsentProvision {
    pub fn builder() -> ConsentProvisionBuilder {
        ConsentProvisionBuilder::default()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn actor(&self) -> &[ProvisionActor] {
        &self.actor
    }

    pub fn action(&self) -> &[CodeableConcept] {
        &self.action
    }

    pub fn security_label(&self) -> &[Coding] {
        &self.security_label
    }

    pub fn purpose(&self) -> &[Coding] {
        &self.purpose
    }

    pub fn code(&self) -> &[CodeableConcept] {
        &self.code
    }

    /// Nested provisions, refined relative to this one.
    pub fn provision(&self) -> &[ConsentProvision] {
        &self.provision
    }

    pub fn to_builder(&self) -> ConsentProvisionBuilder {
        ConsentProvisionBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            period: self.period.clone(),
            actor: self.actor.clone(),
            action: self.action.clone(),
            security_label: self.security_label.clone(),
            purpose: self.purpose.clone(),
            code: self.code.clone(),
            provision: self.provision.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::check_list(&self.actor, "actor")?;
        validation::check_list(&self.action, "action")?;
        validation::check_list(&self.security_label, "securityLabel")?;
        validation::check_list(&self.purpose, "purpose")?;
        validation::check_list(&self.code, "code")?;
        validation::check_list(&self.provision, "provision")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for ConsentProvision {
    fn type_name(&self) -> &'static str {
        "Consent.Provision"
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
            || self.period.is_some()
            || !self.actor.is_empty()
            || !self.action.is_empty()
            || !self.security_label.is_empty()
            || !self.purpose.is_empty()
            || !self.code.is_empty()
            || !self.provision.is_empty()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "period", self.period.as_ref());
        visit_list(visitor, "actor", &self.actor);
        visit_list(visitor, "action", &self.action);
        visit_list(visitor, "securityLabel", &self.security_label);
        visit_list(visitor, "purpose", &self.purpose);
        visit_list(visitor, "code", &self.code);
        visit_list(visitor, "provision", &self.provision);
    }
}

impl Element for ConsentProvision {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for ConsentProvision {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsentProvisionBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    period: Option<Period>,
    actor: Vec<ProvisionActor>,
    action: Vec<CodeableConcept>,
    security_label: Vec<Coding>,
    purpose: Vec<Coding>,
    code: Vec<CodeableConcept>,
    provision: Vec<ConsentProvision>,
}

impl ConsentProvisionBuilder {
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

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn actor(mut self, actor: ProvisionActor) -> Self {
        self.actor.push(actor);
        self
    }

    pub fn set_actor(mut self, actor: Vec<ProvisionActor>) -> Self {
        self.actor = actor;
        self
    }

    pub fn action(mut self, action: CodeableConcept) -> Self {
        self.action.push(action);
        self
    }

    pub fn set_action(mut self, action: Vec<CodeableConcept>) -> Self {
        self.action = action;
        self
    }

    pub fn security_label(mut self, label: Coding) -> Self {
        self.security_label.push(label);
        self
    }

    pub fn set_security_label(mut self, labels: Vec<Coding>) -> Self {
        self.security_label = labels;
        self
    }

    pub fn purpose(mut self, purpose: Coding) -> Self {
        self.purpose.push(purpose);
        self
    }

    pub fn set_purpose(mut self, purpose: Vec<Coding>) -> Self {
        self.purpose = purpose;
        self
    }

    pub fn code(mut self, code: CodeableConcept) -> Self {
        self.code.push(code);
        self
    }

    pub fn set_code(mut self, code: Vec<CodeableConcept>) -> Self {
        self.code = code;
        self
    }

    pub fn provision(mut self, provision: ConsentProvision) -> Self {
        self.provision.push(provision);
        self
    }

    pub fn set_provision(mut self, provision: Vec<ConsentProvision>) -> Self {
        self.provision = provision;
        self
    }
}

impl Build for ConsentProvisionBuilder {
    type Target = ConsentProvision;

    fn build_with(self, mode: ValidationMode) -> Result<ConsentProvision> {
        let provision = ConsentProvision {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            period: self.period,
            actor: self.actor,
            action: self.action,
            security_label: self.security_label,
            purpose: self.purpose,
            code: self.code,
            provision: self.provision,
        };
        if mode.is_strict() {
            provision.validate()?;
        }
        Ok(provision)
    }
}

/// Who or what is controlled by a provision, in a given role.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProvisionActor {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    role: Option<CodeableConcept>,
    reference: Option<Reference>,
}

impl ProvisionActor {
    pub fn builder() -> ProvisionActorBuilder {
        ProvisionActorBuilder::default()
    }

    pub fn role(&self) -> Option<&CodeableConcept> {
        self.role.as_ref()
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    pub fn to_builder(&self) -> ProvisionActorBuilder {
        ProvisionActorBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            modifier_extension: self.modifier_extension.clone(),
            role: self.role.clone(),
            reference: self.reference.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.modifier_extension, "modifierExtension")?;
        validation::check_reference_type(&self.reference, "reference", ACTOR_REFERENCE_TYPES)?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for ProvisionActor {
    fn type_name(&self) -> &'static str {
        "Consent.Provision.Actor"
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
            || self.role.is_some()
            || self.reference.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "modifierExtension", &self.modifier_extension);
        visit_field(visitor, "role", self.role.as_ref());
        visit_field(visitor, "reference", self.reference.as_ref());
    }
}

impl Element for ProvisionActor {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

impl BackboneElement for ProvisionActor {
    fn modifier_extension(&self) -> &[Extension] {
        &self.modifier_extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProvisionActorBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    modifier_extension: Vec<Extension>,
    role: Option<CodeableConcept>,
    reference: Option<Reference>,
}

impl ProvisionActorBuilder {
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

    pub fn role(mut self, role: CodeableConcept) -> Self {
        self.role = Some(role);
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }
}

impl Build for ProvisionActorBuilder {
    type Target = ProvisionActor;

    fn build_with(self, mode: ValidationMode) -> Result<ProvisionActor> {
        let actor = ProvisionActor {
            id: self.id,
            extension: self.extension,
            modifier_extension: self.modifier_extension,
            role: self.role,
            reference: self.reference,
        };
        if mode.is_strict() {
            actor.validate()?;
        }
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn status_only_consent_builds() {
        let consent = Consent::builder().status(ConsentState::Active).build().unwrap();
        assert!(consent.identifier().is_empty());
        assert!(consent.has_children());
    }

    #[test]
    fn missing_status_names_the_field() {
        let err = Consent::builder().build().unwrap_err();
        assert_eq!(err, Error::MissingField("status"));
    }

    #[test]
    fn subject_target_type_is_restricted() {
        let err = Consent::builder()
            .status(ConsentState::Active)
            .subject(Reference::to(ResourceType::Device, "d1"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DisallowedReferenceTarget { field: "subject", .. }
        ));

        let consent = Consent::builder()
            .status(ConsentState::Active)
            .subject(Reference::to(ResourceType::Patient, "p1"))
            .build()
            .unwrap();
        assert_eq!(
            consent.subject().and_then(Reference::target_type),
            Some(ResourceType::Patient)
        );
    }

    #[test]
    fn verification_requires_verified() {
        let err = ConsentVerification::builder().build().unwrap_err();
        assert_eq!(err, Error::MissingField("verified"));

        let verification = ConsentVerification::builder()
            .verified(true)
            .verified_with(Reference::to(ResourceType::RelatedPerson, "r1"))
            .build()
            .unwrap();
        assert_eq!(verification.verified().and_then(Boolean::value), Some(&true));
    }

    #[test]
    fn verification_rejects_bad_verifier_target() {
        let err = ConsentVerification::builder()
            .verified(true)
            .verified_by(Reference::to(ResourceType::Device, "d9"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DisallowedReferenceTarget { field: "verifiedBy", .. }
        ));
    }

    #[test]
    fn provisions_nest() {
        let inner = ConsentProvision::builder()
            .actor(
                ProvisionActor::builder()
                    .reference(Reference::to(ResourceType::Practitioner, "p2"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let outer = ConsentProvision::builder().provision(inner).build().unwrap();
        assert_eq!(outer.provision().len(), 1);
        assert_eq!(outer.provision()[0].actor().len(), 1);
    }

    #[test]
    fn unchecked_build_skips_required_fields() {
        let consent = Consent::builder()
            .build_with(ValidationMode::Unchecked)
            .unwrap();
        assert!(consent.status().is_none());
        assert!(!consent.has_children());
    }

    #[test]
    fn fingerprint_is_stable_and_structural() {
        let a = Consent::builder()
            .id("c1")
            .status(ConsentState::Active)
            .build()
            .unwrap();
        let b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), a.fingerprint());

        let c = a.to_builder().status(ConsentState::Inactive).build().unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn equality_ignores_the_memoized_fingerprint() {
        let a = Consent::builder().status(ConsentState::Active).build().unwrap();
        let b = Consent::builder().status(ConsentState::Active).build().unwrap();
        let _ = a.fingerprint();
        assert_eq!(a, b);
    }
}
