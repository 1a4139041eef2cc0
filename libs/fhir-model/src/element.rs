//! Common contracts shared by all structural nodes

use crate::extension::Extension;
use crate::visitor::Visitable;

/// The common shape of every value-bearing or structural node: an optional
/// element id plus ordered extensions. Mutation never happens through this
/// interface; instances are built once and read-only thereafter.
pub trait Element: Visitable {
    fn id(&self) -> Option<&str>;

    fn extension(&self) -> &[Extension];
}

/// A composite element that additionally carries modifier extensions.
///
/// Unlike ordinary extensions, modifier extensions must not be silently
/// ignored: a consumer that does not recognize one of them cannot safely
/// process the containing element. [`has_modifier_extensions`] is the
/// check consumers gate on before naive processing.
///
/// [`has_modifier_extensions`]: BackboneElement::has_modifier_extensions
pub trait BackboneElement: Element {
    fn modifier_extension(&self) -> &[Extension];

    fn has_modifier_extensions(&self) -> bool {
        !self.modifier_extension().is_empty()
    }
}
