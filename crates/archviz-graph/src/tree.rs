use crate::name_match::NamePattern;
use crate::vector::Vec2;
use archviz_core::{GraphBuildError, NodeKind, RawNode};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Index of a node in its [`Tree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration of the node type filter.
///
/// Packages are excluded from the class/interface test; a package survives
/// iff `eliminate_empty_packages` is off or its subtree still contains a
/// class or interface passing the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilterConfig {
    pub show_interfaces: bool,
    pub show_classes: bool,
    pub eliminate_empty_packages: bool,
}

impl Default for TypeFilterConfig {
    fn default() -> Self {
        Self {
            show_interfaces: true,
            show_classes: true,
            eliminate_empty_packages: true,
        }
    }
}

#[derive(Debug, Clone)]
struct NameFilter {
    pattern: NamePattern,
    exclude: bool,
}

/// A node of the class/package hierarchy.
///
/// Original children are fixed at construction; filtered children are derived
/// from the active filters; current children are empty while folded. The
/// offset is relative to the parent's center (the root carries its canvas
/// anchor), so moving a node implicitly moves its whole subtree.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    full_name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    original_children: Vec<NodeId>,
    filtered_children: Vec<NodeId>,
    folded: bool,
    pub(crate) folded_radius: Option<f64>,
    pub(crate) offset: Vec2,
    pub(crate) radius: f64,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    /// A node is a leaf iff it has no children left after filtering.
    pub fn is_leaf(&self) -> bool {
        self.filtered_children.is_empty()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Center offset relative to the parent's center; canvas anchor for root.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn original_children(&self) -> &[NodeId] {
        &self.original_children
    }

    pub fn filtered_children(&self) -> &[NodeId] {
        &self.filtered_children
    }

    pub fn css_class(&self) -> String {
        let foldable = if self.is_leaf() { "not-foldable" } else { "foldable" };
        format!("node {} {}", self.kind, foldable)
    }
}

/// The node hierarchy with its fold and filter state.
///
/// Owns an instance-scoped `fullName -> NodeId` lookup table; independent
/// trees share nothing.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    by_full_name: HashMap<String, NodeId>,
    name_filter: Option<NameFilter>,
    type_filter: Option<TypeFilterConfig>,
}

impl Tree {
    pub fn from_raw(raw: &RawNode) -> Result<Self, GraphBuildError> {
        let mut tree = Tree {
            nodes: Vec::new(),
            root: NodeId(0),
            by_full_name: HashMap::new(),
            name_filter: None,
            type_filter: None,
        };
        tree.add_subtree(raw, None)?;
        Ok(tree)
    }

    fn add_subtree(&mut self, raw: &RawNode, parent: Option<NodeId>) -> Result<NodeId, GraphBuildError> {
        let id = NodeId(self.nodes.len());
        if self.by_full_name.insert(raw.full_name.clone(), id).is_some() {
            return Err(GraphBuildError::DuplicateFullName {
                full_name: raw.full_name.clone(),
            });
        }
        self.nodes.push(Node {
            name: raw.name.clone(),
            full_name: raw.full_name.clone(),
            kind: raw.kind,
            parent,
            original_children: Vec::new(),
            filtered_children: Vec::new(),
            folded: false,
            folded_radius: None,
            offset: Vec2::ZERO,
            radius: 0.0,
        });
        let mut children = Vec::with_capacity(raw.children.len());
        for child in &raw.children {
            children.push(self.add_subtree(child, Some(id))?);
        }
        self.nodes[id.0].original_children = children.clone();
        self.nodes[id.0].filtered_children = children;
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, full_name: &str) -> Option<NodeId> {
        self.by_full_name.get(full_name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children visible under the current fold state: none while folded, the
    /// filtered children otherwise.
    pub fn current_children(&self, id: NodeId) -> &[NodeId] {
        let node = &self.nodes[id.0];
        if node.folded { &[] } else { &node.filtered_children }
    }

    pub fn is_currently_leaf(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        node.folded || node.filtered_children.is_empty()
    }

    /// The node and every descendant reachable through current children, in
    /// pre-order.
    pub fn visible_descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_visible(id, &mut out);
        out
    }

    fn collect_visible(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        for &child in self.current_children(id) {
            self.collect_visible(child, out);
        }
    }

    /// Whether `id` is `ancestor` itself or visible beneath it.
    pub fn is_child_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        id == ancestor
            || self
                .current_children(ancestor)
                .iter()
                .any(|&child| self.is_child_of(id, child))
    }

    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Absolute canvas position of the node's center.
    pub fn absolute_position(&self, id: NodeId) -> Vec2 {
        let node = &self.nodes[id.0];
        match node.parent {
            Some(parent) => self.absolute_position(parent) + node.offset,
            None => node.offset,
        }
    }

    /// Folds or unfolds a node. Leaves and the root never fold; returns
    /// whether the state changed.
    pub fn set_folded(&mut self, id: NodeId, folded: bool) -> bool {
        let node = &self.nodes[id.0];
        let Some(parent) = node.parent else {
            return false;
        };
        if node.filtered_children.is_empty() || node.folded == folded {
            return false;
        }
        if folded {
            // Captured at fold time: the smallest original-sibling radius,
            // the compact size the collapsed circle shrinks to.
            let min_sibling = self.nodes[parent.0]
                .original_children
                .iter()
                .map(|&sibling| self.nodes[sibling.0].radius)
                .fold(self.nodes[id.0].radius, f64::min);
            let node = &mut self.nodes[id.0];
            node.folded = true;
            node.folded_radius = Some(min_sibling);
        } else {
            let node = &mut self.nodes[id.0];
            node.folded = false;
            node.folded_radius = None;
        }
        true
    }

    pub fn toggle_fold(&mut self, id: NodeId) -> bool {
        let target = !self.nodes[id.0].folded;
        self.set_folded(id, target)
    }

    /// Inner non-root nodes in post-order over current children: the order
    /// in which "fold everything" collapses the tree bottom-up.
    pub fn inner_nodes_post_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_inner_post_order(self.root, &mut out);
        out
    }

    fn collect_inner_post_order(&self, id: NodeId, out: &mut Vec<NodeId>) {
        if self.nodes[id.0].filtered_children.is_empty() {
            return;
        }
        for &child in self.current_children(id) {
            self.collect_inner_post_order(child, out);
        }
        if self.nodes[id.0].parent.is_some() {
            out.push(id);
        }
    }

    pub fn filter_by_name(&mut self, pattern: &str, exclude: bool) {
        self.name_filter = Some(NameFilter {
            pattern: NamePattern::new(pattern),
            exclude,
        });
        self.reapply_filters();
    }

    pub fn filter_by_type(&mut self, config: TypeFilterConfig) {
        self.type_filter = Some(config);
        self.reapply_filters();
    }

    pub fn reset_name_filter(&mut self) {
        self.name_filter = None;
        self.reapply_filters();
    }

    pub fn reset_type_filter(&mut self) {
        self.type_filter = None;
        self.reapply_filters();
    }

    pub fn has_active_filters(&self) -> bool {
        self.name_filter.is_some() || self.type_filter.is_some()
    }

    /// Full names of every node passing the active filters, regardless of
    /// fold state. The dependency collection drops edges whose endpoints are
    /// missing from this set.
    pub fn filter_visible_names(&self) -> HashSet<String> {
        let mut names = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            names.insert(node.full_name.clone());
            stack.extend(node.filtered_children.iter().copied());
        }
        names
    }

    /// Filters are idempotent predicates over the original tree: reset every
    /// filtered-children list, then apply the type and name passes in turn.
    fn reapply_filters(&mut self) {
        for node in &mut self.nodes {
            node.filtered_children = node.original_children.clone();
        }
        if let Some(config) = self.type_filter {
            self.prune(self.root, &|tree, id| tree.passes_type_filter(id, &config));
        }
        if let Some(filter) = self.name_filter.clone() {
            self.prune(self.root, &|tree, id| {
                tree.matches_or_has_matching_descendant(id, &filter)
            });
        }
    }

    /// Prunes top-down: a node's filtered children are narrowed before the
    /// pass descends into the kept ones.
    fn prune(&mut self, id: NodeId, keep: &dyn Fn(&Tree, NodeId) -> bool) {
        let kept: Vec<NodeId> = self.nodes[id.0]
            .filtered_children
            .clone()
            .into_iter()
            .filter(|&child| keep(self, child))
            .collect();
        self.nodes[id.0].filtered_children = kept.clone();
        for child in kept {
            self.prune(child, keep);
        }
    }

    fn passes_class_filter(&self, id: NodeId, config: &TypeFilterConfig) -> bool {
        let kind = self.nodes[id.0].kind;
        !kind.is_package()
            && (!kind.is_interface() || config.show_interfaces)
            && (!kind.is_class_like() || config.show_classes)
    }

    fn subtree_has_matching_class(&self, id: NodeId, config: &TypeFilterConfig) -> bool {
        self.passes_class_filter(id, config)
            || self.nodes[id.0]
                .filtered_children
                .iter()
                .any(|&child| self.subtree_has_matching_class(child, config))
    }

    fn passes_type_filter(&self, id: NodeId, config: &TypeFilterConfig) -> bool {
        if self.nodes[id.0].kind.is_package() {
            !config.eliminate_empty_packages || self.subtree_has_matching_class(id, config)
        } else {
            self.passes_class_filter(id, config)
        }
    }

    /// Ancestor-inclusive name matching: a node passes if it matches or any
    /// filtered descendant does.
    fn matches_or_has_matching_descendant(&self, id: NodeId, filter: &NameFilter) -> bool {
        let node = &self.nodes[id.0];
        (filter.pattern.matches(&node.full_name) != filter.exclude)
            || node
                .filtered_children
                .iter()
                .any(|&child| self.matches_or_has_matching_descendant(child, filter))
    }

    pub(crate) fn set_radius(&mut self, id: NodeId, radius: f64) {
        self.nodes[id.0].radius = radius;
    }

    pub(crate) fn set_offset(&mut self, id: NodeId, offset: Vec2) {
        self.nodes[id.0].offset = offset;
    }

    /// Moves a node (and implicitly its subtree) by `(dx, dy)`.
    ///
    /// The displacement is truncated along its direction so the node circle
    /// stays within the parent circle; children of the root move freely.
    pub fn drag(&mut self, id: NodeId, dx: f64, dy: f64) {
        let displacement = Vec2::new(dx, dy);
        let parent = self.nodes[id.0].parent;
        match parent {
            None => self.nodes[id.0].offset += displacement,
            Some(parent) if parent == self.root => self.nodes[id.0].offset += displacement,
            Some(parent) => {
                let limit = self.nodes[parent.0].radius - self.nodes[id.0].radius;
                let applied = truncate_displacement(self.nodes[id.0].offset, displacement, limit);
                self.nodes[id.0].offset += applied;
            }
        }
    }
}

/// Largest prefix of `displacement` keeping `|offset + t * displacement| <=
/// limit`.
fn truncate_displacement(offset: Vec2, displacement: Vec2, limit: f64) -> Vec2 {
    if limit <= 0.0 {
        return Vec2::ZERO;
    }
    let target = offset + displacement;
    if target.length() <= limit {
        return displacement;
    }
    let a = displacement.length_sq();
    if a == 0.0 {
        return Vec2::ZERO;
    }
    let b = 2.0 * offset.dot(displacement);
    let c = offset.length_sq() - limit * limit;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec2::ZERO;
    }
    let t = ((-b + discriminant.sqrt()) / (2.0 * a)).clamp(0.0, 1.0);
    displacement * t
}
