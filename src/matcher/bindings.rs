//! Per-attempt binding store.
//!
//! A [`Bindings`] value records, for every slot a pattern declared, which
//! tree node and which of its readings the slot matched. It is created
//! empty for each top-level attempt, threaded by value through the
//! combinators, and dropped on failure, so a failed branch can never leave
//! bindings behind.

use crate::tree::{
    AdjectiveCharacteristics, Characteristics, DependencyTree, Feature, FeatureKind,
    LemmaVersion, NodeId, NounCharacteristics, VerbCharacteristics,
};

/// Identity of one element matcher, assigned when the pattern is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The occurrence a slot matched: node plus chosen reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub node: NodeId,
    pub reading: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    slots: Vec<Option<Binding>>,
}

impl Bindings {
    /// An empty store sized for `slot_count` slots.
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<Binding> {
        self.slots.get(slot.0).copied().flatten()
    }

    pub(crate) fn bind(&mut self, slot: SlotId, binding: Binding) {
        if slot.0 >= self.slots.len() {
            self.slots.resize(slot.0 + 1, None);
        }
        self.slots[slot.0] = Some(binding);
    }

    /// Number of slots that hold a binding.
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|b| b.is_some()).count()
    }

    /// Whether some slot matched `node`.
    pub fn is_node_bound(&self, node: NodeId) -> bool {
        self.slots.iter().flatten().any(|b| b.node == node)
    }

    /// Nodes reachable from the root that no slot accounts for, in pre-order.
    ///
    /// A binding that points outside `tree` accounts for nothing.
    pub fn unbound_nodes(&self, tree: &DependencyTree) -> Vec<NodeId> {
        let mut bound = vec![false; tree.len()];
        for binding in self.slots.iter().flatten() {
            let Some(node) = tree.get(binding.node) else {
                continue;
            };
            if binding.reading < node.readings.len() {
                bound[binding.node.index()] = true;
            }
        }
        let mut missing = Vec::new();
        collect_unbound(tree, tree.root(), &bound, &mut missing);
        missing
    }

    /// Completeness: every node of `tree` has one of its readings bound.
    pub fn covers(&self, tree: &DependencyTree) -> bool {
        self.unbound_nodes(tree).is_empty()
    }

    /// Read access to bound values against the tree they were matched on.
    pub fn view<'a>(&'a self, tree: &'a DependencyTree) -> BoundView<'a> {
        BoundView {
            tree,
            bindings: self,
        }
    }
}

fn collect_unbound(tree: &DependencyTree, id: NodeId, bound: &[bool], missing: &mut Vec<NodeId>) {
    if !bound[id.index()] {
        missing.push(id);
    }
    for &child in &tree.node(id).children {
        collect_unbound(tree, child, bound, missing);
    }
}

/// Accessors over a [`Bindings`] store and the tree it refers to.
///
/// Every accessor returns `None` for a slot that is not bound, so
/// formula producers can use `?` and turn a missing slot into a non-match.
#[derive(Debug, Clone, Copy)]
pub struct BoundView<'a> {
    tree: &'a DependencyTree,
    bindings: &'a Bindings,
}

impl<'a> BoundView<'a> {
    pub fn tree(&self) -> &'a DependencyTree {
        self.tree
    }

    pub fn bindings(&self) -> &'a Bindings {
        self.bindings
    }

    pub fn is_bound(&self, slot: SlotId) -> bool {
        self.bindings.get(slot).is_some()
    }

    /// Matched surface text.
    pub fn content(&self, slot: SlotId) -> Option<&'a str> {
        let binding = self.bindings.get(slot)?;
        Some(self.tree.get(binding.node)?.content.as_str())
    }

    /// The chosen reading.
    pub fn reading(&self, slot: SlotId) -> Option<&'a LemmaVersion> {
        let binding = self.bindings.get(slot)?;
        self.tree.get(binding.node)?.readings.get(binding.reading)
    }

    /// Lemma of the chosen reading, lowercased.
    pub fn lemma(&self, slot: SlotId) -> Option<String> {
        self.reading(slot).map(|r| r.lemma.to_lowercase())
    }

    pub fn characteristics(&self, slot: SlotId) -> Option<&'a Characteristics> {
        self.reading(slot).map(|r| &r.characteristics)
    }

    pub fn noun(&self, slot: SlotId) -> Option<&'a NounCharacteristics> {
        match self.characteristics(slot)? {
            Characteristics::Noun(n) => Some(n),
            _ => None,
        }
    }

    pub fn verb(&self, slot: SlotId) -> Option<&'a VerbCharacteristics> {
        match self.characteristics(slot)? {
            Characteristics::Verb(v) => Some(v),
            _ => None,
        }
    }

    pub fn adjective(&self, slot: SlotId) -> Option<&'a AdjectiveCharacteristics> {
        match self.characteristics(slot)? {
            Characteristics::Adjective(a) => Some(a),
            _ => None,
        }
    }

    pub fn feature(&self, slot: SlotId, kind: FeatureKind) -> Option<Feature> {
        self.characteristics(slot)?.feature(kind)
    }

    /// Both slots are bound and carry the same value of `kind`.
    pub fn agree(&self, a: SlotId, b: SlotId, kind: FeatureKind) -> bool {
        match (self.feature(a, kind), self.feature(b, kind)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}
