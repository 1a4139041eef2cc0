//! General-purpose datatypes
//!
//! Reusable complex elements shared by every resource. Each type is an
//! immutable composite: construction goes through its builder, validation
//! runs once at build time, and traversal goes through [`Visitable`].

use crate::code::{IdentifierUse, NarrativeStatus, QuantityComparator};
use crate::element::Element;
use crate::error::Result;
use crate::extension::Extension;
use crate::primitive::{
    Boolean, Code, Coded, DateTime, Decimal, FhirString, Instant, UnsignedInt, Uri, Url,
};
use crate::validation::{self, Build, ValidationMode};
use crate::visitor::{visit_field, visit_list, NodeKind, Visitable, Visitor};

/// A reference to a code defined by a terminology system.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coding {
    id: Option<String>,
    extension: Vec<Extension>,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl Coding {
    pub fn builder() -> CodingBuilder {
        CodingBuilder::default()
    }

    /// A plain `system`+`code` coding.
    pub fn new(system: impl Into<Uri>, code: impl Into<Code>) -> Result<Self> {
        Coding::builder().system(system).code(code).build()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn version(&self) -> Option<&FhirString> {
        self.version.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn display(&self) -> Option<&FhirString> {
        self.display.as_ref()
    }

    pub fn user_selected(&self) -> Option<&Boolean> {
        self.user_selected.as_ref()
    }

    pub fn to_builder(&self) -> CodingBuilder {
        CodingBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            system: self.system.clone(),
            version: self.version.clone(),
            code: self.code.clone(),
            display: self.display.clone(),
            user_selected: self.user_selected.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Coding {
    fn type_name(&self) -> &'static str {
        "Coding"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || self.system.is_some()
            || self.version.is_some()
            || self.code.is_some()
            || self.display.is_some()
            || self.user_selected.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "system", self.system.as_ref());
        visit_field(visitor, "version", self.version.as_ref());
        visit_field(visitor, "code", self.code.as_ref());
        visit_field(visitor, "display", self.display.as_ref());
        visit_field(visitor, "userSelected", self.user_selected.as_ref());
    }
}

impl Element for Coding {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodingBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    system: Option<Uri>,
    version: Option<FhirString>,
    code: Option<Code>,
    display: Option<FhirString>,
    user_selected: Option<Boolean>,
}

impl CodingBuilder {
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

    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn version(mut self, version: impl Into<FhirString>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn display(mut self, display: impl Into<FhirString>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn user_selected(mut self, user_selected: impl Into<Boolean>) -> Self {
        self.user_selected = Some(user_selected.into());
        self
    }
}

impl Build for CodingBuilder {
    type Target = Coding;

    fn build_with(self, mode: ValidationMode) -> Result<Coding> {
        let coding = Coding {
            id: self.id,
            extension: self.extension,
            system: self.system,
            version: self.version,
            code: self.code,
            display: self.display,
            user_selected: self.user_selected,
        };
        if mode.is_strict() {
            coding.validate()?;
        }
        Ok(coding)
    }
}

/// A concept, possibly coded in one or more terminologies, with free text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeableConcept {
    id: Option<String>,
    extension: Vec<Extension>,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConcept {
    pub fn builder() -> CodeableConceptBuilder {
        CodeableConceptBuilder::default()
    }

    /// A concept with a single `system`+`code` coding.
    pub fn of(system: impl Into<Uri>, code: impl Into<Code>) -> Result<Self> {
        Ok(CodeableConcept::builder()
            .coding(Coding::new(system, code)?)
            .build()?)
    }

    /// A text-only concept.
    pub fn text_only(text: impl Into<FhirString>) -> Result<Self> {
        CodeableConcept::builder().text(text).build()
    }

    pub fn coding(&self) -> &[Coding] {
        &self.coding
    }

    pub fn text(&self) -> Option<&FhirString> {
        self.text.as_ref()
    }

    pub fn to_builder(&self) -> CodeableConceptBuilder {
        CodeableConceptBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            coding: self.coding.clone(),
            text: self.text.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.coding, "coding")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for CodeableConcept {
    fn type_name(&self) -> &'static str {
        "CodeableConcept"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty() || !self.coding.is_empty() || self.text.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_list(visitor, "coding", &self.coding);
        visit_field(visitor, "text", self.text.as_ref());
    }
}

impl Element for CodeableConcept {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeableConceptBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    coding: Vec<Coding>,
    text: Option<FhirString>,
}

impl CodeableConceptBuilder {
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

    /// Appends a coding.
    pub fn coding(mut self, coding: Coding) -> Self {
        self.coding.push(coding);
        self
    }

    /// Replaces all codings.
    pub fn set_coding(mut self, coding: Vec<Coding>) -> Self {
        self.coding = coding;
        self
    }

    pub fn text(mut self, text: impl Into<FhirString>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl Build for CodeableConceptBuilder {
    type Target = CodeableConcept;

    fn build_with(self, mode: ValidationMode) -> Result<CodeableConcept> {
        let concept = CodeableConcept {
            id: self.id,
            extension: self.extension,
            coding: self.coding,
            text: self.text,
        };
        if mode.is_strict() {
            concept.validate()?;
        }
        Ok(concept)
    }
}

/// A business identifier for an object within a given system.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Identifier {
    id: Option<String>,
    extension: Vec<Extension>,
    use_: Option<Coded<IdentifierUse>>,
    type_: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
}

impl Identifier {
    pub fn builder() -> IdentifierBuilder {
        IdentifierBuilder::default()
    }

    pub fn use_(&self) -> Option<&Coded<IdentifierUse>> {
        self.use_.as_ref()
    }

    pub fn type_(&self) -> Option<&CodeableConcept> {
        self.type_.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn value(&self) -> Option<&FhirString> {
        self.value.as_ref()
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    pub fn to_builder(&self) -> IdentifierBuilder {
        IdentifierBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            use_: self.use_.clone(),
            type_: self.type_.clone(),
            system: self.system.clone(),
            value: self.value.clone(),
            period: self.period.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Identifier {
    fn type_name(&self) -> &'static str {
        "Identifier"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || self.use_.is_some()
            || self.type_.is_some()
            || self.system.is_some()
            || self.value.is_some()
            || self.period.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "use", self.use_.as_ref());
        visit_field(visitor, "type", self.type_.as_ref());
        visit_field(visitor, "system", self.system.as_ref());
        visit_field(visitor, "value", self.value.as_ref());
        visit_field(visitor, "period", self.period.as_ref());
    }
}

impl Element for Identifier {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    use_: Option<Coded<IdentifierUse>>,
    type_: Option<CodeableConcept>,
    system: Option<Uri>,
    value: Option<FhirString>,
    period: Option<Period>,
}

impl IdentifierBuilder {
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

    pub fn use_(mut self, use_: impl Into<Coded<IdentifierUse>>) -> Self {
        self.use_ = Some(use_.into());
        self
    }

    pub fn type_(mut self, type_: CodeableConcept) -> Self {
        self.type_ = Some(type_);
        self
    }

    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn value(mut self, value: impl Into<FhirString>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }
}

impl Build for IdentifierBuilder {
    type Target = Identifier;

    fn build_with(self, mode: ValidationMode) -> Result<Identifier> {
        let identifier = Identifier {
            id: self.id,
            extension: self.extension,
            use_: self.use_,
            type_: self.type_,
            system: self.system,
            value: self.value,
            period: self.period,
        };
        if mode.is_strict() {
            identifier.validate()?;
        }
        Ok(identifier)
    }
}

/// A time range defined by start and end instants.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Period {
    id: Option<String>,
    extension: Vec<Extension>,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl Period {
    pub fn builder() -> PeriodBuilder {
        PeriodBuilder::default()
    }

    pub fn start(&self) -> Option<&DateTime> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&DateTime> {
        self.end.as_ref()
    }

    pub fn to_builder(&self) -> PeriodBuilder {
        PeriodBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Period {
    fn type_name(&self) -> &'static str {
        "Period"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty() || self.start.is_some() || self.end.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "start", self.start.as_ref());
        visit_field(visitor, "end", self.end.as_ref());
    }
}

impl Element for Period {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl PeriodBuilder {
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

    pub fn start(mut self, start: impl Into<DateTime>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<DateTime>) -> Self {
        self.end = Some(end.into());
        self
    }
}

impl Build for PeriodBuilder {
    type Target = Period;

    fn build_with(self, mode: ValidationMode) -> Result<Period> {
        let period = Period {
            id: self.id,
            extension: self.extension,
            start: self.start,
            end: self.end,
        };
        if mode.is_strict() {
            period.validate()?;
        }
        Ok(period)
    }
}

/// A measured amount.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Quantity {
    id: Option<String>,
    extension: Vec<Extension>,
    value: Option<Decimal>,
    comparator: Option<Coded<QuantityComparator>>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl Quantity {
    pub fn builder() -> QuantityBuilder {
        QuantityBuilder::default()
    }

    pub fn value(&self) -> Option<&Decimal> {
        self.value.as_ref()
    }

    pub fn comparator(&self) -> Option<&Coded<QuantityComparator>> {
        self.comparator.as_ref()
    }

    pub fn unit(&self) -> Option<&FhirString> {
        self.unit.as_ref()
    }

    pub fn system(&self) -> Option<&Uri> {
        self.system.as_ref()
    }

    pub fn code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    pub fn to_builder(&self) -> QuantityBuilder {
        QuantityBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            value: self.value.clone(),
            comparator: self.comparator.clone(),
            unit: self.unit.clone(),
            system: self.system.clone(),
            code: self.code.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Quantity {
    fn type_name(&self) -> &'static str {
        "Quantity"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || self.value.is_some()
            || self.comparator.is_some()
            || self.unit.is_some()
            || self.system.is_some()
            || self.code.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "value", self.value.as_ref());
        visit_field(visitor, "comparator", self.comparator.as_ref());
        visit_field(visitor, "unit", self.unit.as_ref());
        visit_field(visitor, "system", self.system.as_ref());
        visit_field(visitor, "code", self.code.as_ref());
    }
}

impl Element for Quantity {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuantityBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    value: Option<Decimal>,
    comparator: Option<Coded<QuantityComparator>>,
    unit: Option<FhirString>,
    system: Option<Uri>,
    code: Option<Code>,
}

impl QuantityBuilder {
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

    pub fn value(mut self, value: impl Into<Decimal>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn comparator(mut self, comparator: impl Into<Coded<QuantityComparator>>) -> Self {
        self.comparator = Some(comparator.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<FhirString>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn system(mut self, system: impl Into<Uri>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn code(mut self, code: impl Into<Code>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl Build for QuantityBuilder {
    type Target = Quantity;

    fn build_with(self, mode: ValidationMode) -> Result<Quantity> {
        let quantity = Quantity {
            id: self.id,
            extension: self.extension,
            value: self.value,
            comparator: self.comparator,
            unit: self.unit,
            system: self.system,
            code: self.code,
        };
        if mode.is_strict() {
            quantity.validate()?;
        }
        Ok(quantity)
    }
}

/// A low/high bounded set of quantities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Range {
    id: Option<String>,
    extension: Vec<Extension>,
    low: Option<Quantity>,
    high: Option<Quantity>,
}

impl Range {
    pub fn builder() -> RangeBuilder {
        RangeBuilder::default()
    }

    pub fn low(&self) -> Option<&Quantity> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&Quantity> {
        self.high.as_ref()
    }

    pub fn to_builder(&self) -> RangeBuilder {
        RangeBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            low: self.low.clone(),
            high: self.high.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Range {
    fn type_name(&self) -> &'static str {
        "Range"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty() || self.low.is_some() || self.high.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "low", self.low.as_ref());
        visit_field(visitor, "high", self.high.as_ref());
    }
}

impl Element for Range {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct RangeBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    low: Option<Quantity>,
    high: Option<Quantity>,
}

impl RangeBuilder {
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

    pub fn low(mut self, low: Quantity) -> Self {
        self.low = Some(low);
        self
    }

    pub fn high(mut self, high: Quantity) -> Self {
        self.high = Some(high);
        self
    }
}

impl Build for RangeBuilder {
    type Target = Range;

    fn build_with(self, mode: ValidationMode) -> Result<Range> {
        let range = Range {
            id: self.id,
            extension: self.extension,
            low: self.low,
            high: self.high,
        };
        if mode.is_strict() {
            range.validate()?;
        }
        Ok(range)
    }
}

/// Content referred to by URL or carried inline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attachment {
    id: Option<String>,
    extension: Vec<Extension>,
    content_type: Option<Code>,
    language: Option<Code>,
    data: Option<FhirString>,
    url: Option<Url>,
    size: Option<UnsignedInt>,
    title: Option<FhirString>,
    creation: Option<DateTime>,
}

impl Attachment {
    pub fn builder() -> AttachmentBuilder {
        AttachmentBuilder::default()
    }

    pub fn content_type(&self) -> Option<&Code> {
        self.content_type.as_ref()
    }

    pub fn language(&self) -> Option<&Code> {
        self.language.as_ref()
    }

    pub fn data(&self) -> Option<&FhirString> {
        self.data.as_ref()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn size(&self) -> Option<&UnsignedInt> {
        self.size.as_ref()
    }

    pub fn title(&self) -> Option<&FhirString> {
        self.title.as_ref()
    }

    pub fn creation(&self) -> Option<&DateTime> {
        self.creation.as_ref()
    }

    pub fn to_builder(&self) -> AttachmentBuilder {
        AttachmentBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            content_type: self.content_type.clone(),
            language: self.language.clone(),
            data: self.data.clone(),
            url: self.url.clone(),
            size: self.size.clone(),
            title: self.title.clone(),
            creation: self.creation.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Attachment {
    fn type_name(&self) -> &'static str {
        "Attachment"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || self.content_type.is_some()
            || self.language.is_some()
            || self.data.is_some()
            || self.url.is_some()
            || self.size.is_some()
            || self.title.is_some()
            || self.creation.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "contentType", self.content_type.as_ref());
        visit_field(visitor, "language", self.language.as_ref());
        visit_field(visitor, "data", self.data.as_ref());
        visit_field(visitor, "url", self.url.as_ref());
        visit_field(visitor, "size", self.size.as_ref());
        visit_field(visitor, "title", self.title.as_ref());
        visit_field(visitor, "creation", self.creation.as_ref());
    }
}

impl Element for Attachment {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttachmentBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    content_type: Option<Code>,
    language: Option<Code>,
    data: Option<FhirString>,
    url: Option<Url>,
    size: Option<UnsignedInt>,
    title: Option<FhirString>,
    creation: Option<DateTime>,
}

impl AttachmentBuilder {
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

    pub fn content_type(mut self, content_type: impl Into<Code>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn language(mut self, language: impl Into<Code>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn data(mut self, data: impl Into<FhirString>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn url(mut self, url: impl Into<Url>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn size(mut self, size: impl Into<UnsignedInt>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn title(mut self, title: impl Into<FhirString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn creation(mut self, creation: impl Into<DateTime>) -> Self {
        self.creation = Some(creation.into());
        self
    }
}

impl Build for AttachmentBuilder {
    type Target = Attachment;

    fn build_with(self, mode: ValidationMode) -> Result<Attachment> {
        let attachment = Attachment {
            id: self.id,
            extension: self.extension,
            content_type: self.content_type,
            language: self.language,
            data: self.data,
            url: self.url,
            size: self.size,
            title: self.title,
            creation: self.creation,
        };
        if mode.is_strict() {
            attachment.validate()?;
        }
        Ok(attachment)
    }
}

/// Versioning and provenance metadata attached to a resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Meta {
    id: Option<String>,
    extension: Vec<Extension>,
    version_id: Option<FhirString>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Uri>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl Meta {
    pub fn builder() -> MetaBuilder {
        MetaBuilder::default()
    }

    pub fn version_id(&self) -> Option<&FhirString> {
        self.version_id.as_ref()
    }

    pub fn last_updated(&self) -> Option<&Instant> {
        self.last_updated.as_ref()
    }

    pub fn source(&self) -> Option<&Uri> {
        self.source.as_ref()
    }

    pub fn profile(&self) -> &[Uri] {
        &self.profile
    }

    pub fn security(&self) -> &[Coding] {
        &self.security
    }

    pub fn tag(&self) -> &[Coding] {
        &self.tag
    }

    pub fn to_builder(&self) -> MetaBuilder {
        MetaBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            version_id: self.version_id.clone(),
            last_updated: self.last_updated.clone(),
            source: self.source.clone(),
            profile: self.profile.clone(),
            security: self.security.clone(),
            tag: self.tag.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::check_list(&self.extension, "extension")?;
        validation::check_list(&self.profile, "profile")?;
        validation::check_list(&self.security, "security")?;
        validation::check_list(&self.tag, "tag")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Meta {
    fn type_name(&self) -> &'static str {
        "Meta"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty()
            || self.version_id.is_some()
            || self.last_updated.is_some()
            || self.source.is_some()
            || !self.profile.is_empty()
            || !self.security.is_empty()
            || !self.tag.is_empty()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "versionId", self.version_id.as_ref());
        visit_field(visitor, "lastUpdated", self.last_updated.as_ref());
        visit_field(visitor, "source", self.source.as_ref());
        visit_list(visitor, "profile", &self.profile);
        visit_list(visitor, "security", &self.security);
        visit_list(visitor, "tag", &self.tag);
    }
}

impl Element for Meta {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetaBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    version_id: Option<FhirString>,
    last_updated: Option<Instant>,
    source: Option<Uri>,
    profile: Vec<Uri>,
    security: Vec<Coding>,
    tag: Vec<Coding>,
}

impl MetaBuilder {
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

    pub fn version_id(mut self, version_id: impl Into<FhirString>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    pub fn last_updated(mut self, last_updated: impl Into<Instant>) -> Self {
        self.last_updated = Some(last_updated.into());
        self
    }

    pub fn source(mut self, source: impl Into<Uri>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn profile(mut self, profile: impl Into<Uri>) -> Self {
        self.profile.push(profile.into());
        self
    }

    pub fn set_profile(mut self, profile: Vec<Uri>) -> Self {
        self.profile = profile;
        self
    }

    pub fn security(mut self, security: Coding) -> Self {
        self.security.push(security);
        self
    }

    pub fn set_security(mut self, security: Vec<Coding>) -> Self {
        self.security = security;
        self
    }

    pub fn tag(mut self, tag: Coding) -> Self {
        self.tag.push(tag);
        self
    }

    pub fn set_tag(mut self, tag: Vec<Coding>) -> Self {
        self.tag = tag;
        self
    }
}

impl Build for MetaBuilder {
    type Target = Meta;

    fn build_with(self, mode: ValidationMode) -> Result<Meta> {
        let meta = Meta {
            id: self.id,
            extension: self.extension,
            version_id: self.version_id,
            last_updated: self.last_updated,
            source: self.source,
            profile: self.profile,
            security: self.security,
            tag: self.tag,
        };
        if mode.is_strict() {
            meta.validate()?;
        }
        Ok(meta)
    }
}

/// Human-readable narrative for a resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Narrative {
    id: Option<String>,
    extension: Vec<Extension>,
    status: Option<Coded<NarrativeStatus>>,
    div: Option<FhirString>,
}

impl Narrative {
    pub fn builder() -> NarrativeBuilder {
        NarrativeBuilder::default()
    }

    pub fn status(&self) -> Option<&Coded<NarrativeStatus>> {
        self.status.as_ref()
    }

    pub fn div(&self) -> Option<&FhirString> {
        self.div.as_ref()
    }

    pub fn to_builder(&self) -> NarrativeBuilder {
        NarrativeBuilder {
            id: self.id.clone(),
            extension: self.extension.clone(),
            status: self.status.clone(),
            div: self.div.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        validation::require_non_null(&self.status, "status")?;
        validation::require_non_null(&self.div, "div")?;
        validation::check_list(&self.extension, "extension")?;
        validation::require_value_or_children(self)?;
        Ok(())
    }
}

impl Visitable for Narrative {
    fn type_name(&self) -> &'static str {
        "Narrative"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Element
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_children(&self) -> bool {
        !self.extension.is_empty() || self.status.is_some() || self.div.is_some()
    }

    fn visit_children(&self, visitor: &mut dyn Visitor) {
        visit_list(visitor, "extension", &self.extension);
        visit_field(visitor, "status", self.status.as_ref());
        visit_field(visitor, "div", self.div.as_ref());
    }
}

impl Element for Narrative {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeBuilder {
    id: Option<String>,
    extension: Vec<Extension>,
    status: Option<Coded<NarrativeStatus>>,
    div: Option<FhirString>,
}

impl NarrativeBuilder {
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

    pub fn status(mut self, status: impl Into<Coded<NarrativeStatus>>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn div(mut self, div: impl Into<FhirString>) -> Self {
        self.div = Some(div.into());
        self
    }
}

impl Build for NarrativeBuilder {
    type Target = Narrative;

    fn build_with(self, mode: ValidationMode) -> Result<Narrative> {
        let narrative = Narrative {
            id: self.id,
            extension: self.extension,
            status: self.status,
            div: self.div,
        };
        if mode.is_strict() {
            narrative.validate()?;
        }
        Ok(narrative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::NarrativeStatus;
    use crate::error::Error;
    use rust_decimal::Decimal as Dec;

    #[test]
    fn empty_coding_is_rejected() {
        assert_eq!(
            Coding::builder().build().unwrap_err(),
            Error::EmptyElement("Coding")
        );
    }

    #[test]
    fn codeable_concept_append_and_replace() {
        let a = Coding::new("http://loinc.org", "1234-5").unwrap();
        let b = Coding::new("http://snomed.info/sct", "271649006").unwrap();

        let appended = CodeableConcept::builder()
            .coding(a.clone())
            .coding(b.clone())
            .build()
            .unwrap();
        assert_eq!(appended.coding(), &[a.clone(), b.clone()]);

        let replaced = appended
            .to_builder()
            .set_coding(vec![b.clone()])
            .build()
            .unwrap();
        assert_eq!(replaced.coding(), &[b]);
    }

    #[test]
    fn narrative_requires_status_then_div() {
        let err = Narrative::builder().build().unwrap_err();
        assert_eq!(err, Error::MissingField("status"));

        let err = Narrative::builder()
            .status(NarrativeStatus::Generated)
            .build()
            .unwrap_err();
        assert_eq!(err, Error::MissingField("div"));

        let narrative = Narrative::builder()
            .status(NarrativeStatus::Generated)
            .div("<div xmlns=\"http://www.w3.org/1999/xhtml\">ok</div>")
            .build()
            .unwrap();
        assert!(narrative.has_children());
    }

    #[test]
    fn quantity_round_trips_through_builder() {
        let quantity = Quantity::builder()
            .value(Dec::new(185, 1))
            .unit("kg")
            .system("http://unitsofmeasure.org")
            .code("kg")
            .build()
            .unwrap();
        assert_eq!(quantity.to_builder().build().unwrap(), quantity);
    }

    #[test]
    fn meta_lists_reject_vacuous_entries() {
        let err = Meta::builder()
            .set_profile(vec![Uri::default()])
            .build()
            .unwrap_err();
        assert_eq!(err, Error::EmptyListEntry { field: "profile", index: 0 });
    }
}
