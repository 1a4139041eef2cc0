//! Tree traversal contract for model instances
//!
//! Every structural node implements [`Visitable`]; external consumers
//! (serializers, profile validators, index extractors) implement [`Visitor`]
//! and receive a four-phase handshake per node:
//!
//! ```text
//! if visitor.pre_visit(node) {
//!     visitor.visit_start(name, index, node);
//!     if visitor.visit(name, index, node) {
//!         // children, in declared field order
//!     }
//!     visitor.visit_end(name, index, node);
//!     visitor.post_visit(node);
//! }
//! ```
//!
//! `pre_visit` prunes whole subtrees, `visit` gates descent while still
//! letting `visit_end`/`post_visit` fire, so a single visitor can both
//! extract partial data and observe every node uniformly. Children are
//! always visited in declared field order; consumers may rely on that
//! order for deterministic output.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;

/// Category of a structural node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A root resource (standalone identity, `resourceType` on the wire).
    Resource,
    /// A general-purpose datatype or extension.
    Element,
    /// A structured sub-part carrying modifier extensions.
    Backbone,
    /// A value-bearing leaf.
    Primitive,
}

/// Borrowed view of a primitive leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Boolean(bool),
    Integer(i32),
    UnsignedInt(u32),
    Decimal(&'a Decimal),
    Str(&'a str),
}

impl ValueRef<'_> {
    fn hash_into(&self, hasher: &mut impl Hasher) {
        match self {
            ValueRef::Boolean(b) => {
                hasher.write_u8(0);
                b.hash(hasher);
            }
            ValueRef::Integer(i) => {
                hasher.write_u8(1);
                i.hash(hasher);
            }
            ValueRef::UnsignedInt(u) => {
                hasher.write_u8(2);
                u.hash(hasher);
            }
            ValueRef::Decimal(d) => {
                hasher.write_u8(3);
                d.hash(hasher);
            }
            ValueRef::Str(s) => {
                hasher.write_u8(4);
                s.hash(hasher);
            }
        }
    }
}

/// A node in the resource tree that can be traversed by a [`Visitor`].
pub trait Visitable {
    /// The FHIR type name of this node (e.g. `"Consent"`, `"Coding"`).
    fn type_name(&self) -> &'static str;

    /// Which category of node this is.
    fn kind(&self) -> NodeKind;

    /// The element id (or resource logical id) if present.
    fn element_id(&self) -> Option<&str> {
        None
    }

    /// The primitive payload, if this node is a value-bearing leaf.
    fn value(&self) -> Option<ValueRef<'_>> {
        None
    }

    /// True iff this node or any descendant carries an actual value or a
    /// non-empty collection.
    fn has_children(&self) -> bool;

    /// Visit each child in declared field order.
    fn visit_children(&self, visitor: &mut dyn Visitor);

    /// Run the traversal handshake for this node.
    fn accept(&self, name: &str, index: Option<usize>, visitor: &mut dyn Visitor)
    where
        Self: Sized,
    {
        walk(self, name, index, visitor);
    }
}

/// The traversal callback contract.
///
/// All methods default to "proceed and do nothing", so a visitor only
/// overrides the phases it cares about.
pub trait Visitor {
    /// Return false to skip this node entirely (no phases fire).
    fn pre_visit(&mut self, _node: &dyn Visitable) -> bool {
        true
    }

    /// Unconditional "entering node" notification.
    ///
    /// `index` is `Some` when the node sits in a repeated field.
    fn visit_start(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {}

    /// Return false to skip this node's children; `visit_end` and
    /// `post_visit` still fire.
    fn visit(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) -> bool {
        true
    }

    fn visit_end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Visitable) {}

    fn post_visit(&mut self, _node: &dyn Visitable) {}

    /// Brackets around a non-empty repeated field.
    fn visit_list_start(&mut self, _name: &str, _len: usize) {}

    fn visit_list_end(&mut self, _name: &str, _len: usize) {}
}

/// Drive the four-phase handshake for a single node.
pub fn walk(node: &dyn Visitable, name: &str, index: Option<usize>, visitor: &mut dyn Visitor) {
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.visit_start(name, index, node);
    if visitor.visit(name, index, node) {
        node.visit_children(visitor);
    }
    visitor.visit_end(name, index, node);
    visitor.post_visit(node);
}

/// Visit an optional singular field.
pub fn visit_field<T: Visitable>(visitor: &mut dyn Visitor, name: &str, node: Option<&T>) {
    if let Some(node) = node {
        walk(node, name, None, visitor);
    }
}

/// Visit a repeated field, passing each entry's position.
///
/// Empty lists produce no callbacks at all: an absent collection and an
/// empty one are indistinguishable to consumers.
pub fn visit_list<T: Visitable>(visitor: &mut dyn Visitor, name: &str, items: &[T]) {
    if items.is_empty() {
        return;
    }
    visitor.visit_list_start(name, items.len());
    for (index, item) in items.iter().enumerate() {
        walk(item, name, Some(index), visitor);
    }
    visitor.visit_list_end(name, items.len());
}

/// Hashing visitor producing a structural digest of a subtree.
///
/// Two structurally equal trees hash identically because the digest is a
/// pure function of names, positions, types, ids and leaf values in
/// declared order. Resources memoize the result.
pub struct Fingerprint {
    hasher: DefaultHasher,
}

impl Fingerprint {
    pub fn new() -> Self {
        Fingerprint {
            hasher: DefaultHasher::new(),
        }
    }

    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Fingerprint::new()
    }
}

impl Visitor for Fingerprint {
    fn visit_start(&mut self, name: &str, index: Option<usize>, node: &dyn Visitable) {
        name.hash(&mut self.hasher);
        index.hash(&mut self.hasher);
        node.type_name().hash(&mut self.hasher);
        node.element_id().hash(&mut self.hasher);
        match node.value() {
            Some(value) => value.hash_into(&mut self.hasher),
            None => self.hasher.write_u8(0xff),
        }
    }

    fn visit_list_start(&mut self, name: &str, len: usize) {
        name.hash(&mut self.hasher);
        len.hash(&mut self.hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{Boolean, FhirString};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        descend: bool,
        prune: bool,
    }

    impl Visitor for Recorder {
        fn pre_visit(&mut self, node: &dyn Visitable) -> bool {
            if self.prune {
                return false;
            }
            self.events.push(format!("pre:{}", node.type_name()));
            true
        }

        fn visit_start(&mut self, name: &str, index: Option<usize>, _node: &dyn Visitable) {
            self.events.push(format!("start:{name}:{index:?}"));
        }

        fn visit(&mut self, name: &str, _index: Option<usize>, _node: &dyn Visitable) -> bool {
            self.events.push(format!("visit:{name}"));
            self.descend
        }

        fn visit_end(&mut self, name: &str, _index: Option<usize>, _node: &dyn Visitable) {
            self.events.push(format!("end:{name}"));
        }

        fn post_visit(&mut self, node: &dyn Visitable) {
            self.events.push(format!("post:{}", node.type_name()));
        }
    }

    #[test]
    fn handshake_fires_all_phases_in_order() {
        let node = Boolean::from(true);
        let mut recorder = Recorder {
            descend: true,
            ..Recorder::default()
        };
        node.accept("verified", None, &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                "pre:boolean",
                "start:verified:None",
                "visit:verified",
                "end:verified",
                "post:boolean",
            ]
        );
    }

    #[test]
    fn pre_visit_false_skips_every_phase() {
        let node = FhirString::from("x");
        let mut recorder = Recorder {
            prune: true,
            ..Recorder::default()
        };
        node.accept("name", None, &mut recorder);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn visit_false_still_closes_the_node() {
        let node = Boolean::from(false);
        let mut recorder = Recorder::default();
        node.accept("flag", None, &mut recorder);
        assert_eq!(
            recorder.events,
            vec![
                "pre:boolean",
                "start:flag:None",
                "visit:flag",
                "end:flag",
                "post:boolean",
            ]
        );
    }

    #[test]
    fn empty_list_produces_no_callbacks() {
        let items: Vec<Boolean> = Vec::new();
        let mut recorder = Recorder::default();
        visit_list(&mut recorder, "flags", &items);
        assert!(recorder.events.is_empty());
    }

    #[test]
    fn list_entries_carry_their_index() {
        let items = vec![Boolean::from(true), Boolean::from(false)];
        let mut recorder = Recorder {
            descend: true,
            ..Recorder::default()
        };
        visit_list(&mut recorder, "flags", &items);
        assert!(recorder.events.contains(&"start:flags:Some(0)".to_string()));
        assert!(recorder.events.contains(&"start:flags:Some(1)".to_string()));
    }

    #[test]
    fn fingerprint_distinguishes_values() {
        let mut a = Fingerprint::new();
        Boolean::from(true).accept("flag", None, &mut a);
        let mut b = Fingerprint::new();
        Boolean::from(false).accept("flag", None, &mut b);
        assert_ne!(a.finish(), b.finish());
    }
}
