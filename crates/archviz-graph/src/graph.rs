use crate::dependencies::{Dependencies, DetailedDependency, KindFilterConfig};
use crate::dependency::Dependency;
use crate::layout::LayoutEngine;
use crate::tree::{Node, Tree, TypeFilterConfig};
use archviz_core::{GraphBuildError, RawNode};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error(transparent)]
    Build(#[from] GraphBuildError),
    #[error("invalid raw graph description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Registered by the external view layer; the core never reaches into
/// rendering code directly. All notifications are synchronous and arrive
/// after the triggering mutation has fully recomputed.
pub trait GraphListener {
    fn on_fold(&mut self, _full_name: &str, _folded: bool) {}
    fn on_filter_changed(&mut self) {}
    fn on_layout_changed(&mut self) {}
    fn on_drag(&mut self, _full_name: &str, _dx: f64, _dy: f64) {}
}

/// Thin coordinator composing the node tree and the dependency collection.
///
/// Owns no state beyond its parts; every mutation runs tree update ->
/// dependency recompute -> relayout -> listener notification, synchronously.
pub struct Graph {
    tree: Tree,
    dependencies: Dependencies,
    layout: LayoutEngine,
    listeners: Vec<Box<dyn GraphListener>>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("tree", &self.tree)
            .field("dependencies", &self.dependencies)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Graph {
    pub fn from_raw(raw: &RawNode) -> Result<Self, GraphBuildError> {
        Self::with_layout(raw, LayoutEngine::default())
    }

    pub fn with_layout(raw: &RawNode, layout: LayoutEngine) -> Result<Self, GraphBuildError> {
        let tree = Tree::from_raw(raw)?;
        let dependencies = Dependencies::build(raw, &tree)?;
        let mut graph = Self {
            tree,
            dependencies,
            layout,
            listeners: Vec::new(),
        };
        graph.relayout();
        Ok(graph)
    }

    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let raw: RawNode = serde_json::from_str(json)?;
        Ok(Self::from_raw(&raw)?)
    }

    pub fn add_listener(&mut self, listener: Box<dyn GraphListener>) {
        self.listeners.push(listener);
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutEngine {
        &mut self.layout
    }

    /// Currently visible nodes, pre-order from the root.
    pub fn visible_nodes(&self) -> Vec<&Node> {
        self.tree
            .visible_descendants(self.tree.root())
            .into_iter()
            .map(|id| self.tree.node(id))
            .collect()
    }

    pub fn visible_dependencies(&self) -> &[Dependency] {
        self.dependencies.visible()
    }

    pub fn detailed_dependencies_of(&self, from: &str, to: &str) -> Vec<DetailedDependency> {
        self.dependencies.detailed_dependencies_of(&self.tree, from, to)
    }

    /// Flips the fold state of a node; leaves and the root stay unchanged.
    /// Returns whether anything changed.
    pub fn toggle_fold(&mut self, full_name: &str) -> bool {
        let Some(id) = self.tree.get(full_name) else {
            warn!(node = full_name, "fold toggled on unknown node");
            return false;
        };
        if !self.tree.toggle_fold(id) {
            return false;
        }
        let folded = self.tree.node(id).is_folded();
        self.dependencies.change_fold(&self.tree, full_name, folded);
        self.relayout();
        self.notify(|listener| listener.on_fold(full_name, folded));
        true
    }

    /// Collapses every inner non-root node bottom-up, the initial
    /// presentation state of a freshly loaded report.
    pub fn fold_all_nodes(&mut self) {
        let mut folded = Vec::new();
        for id in self.tree.inner_nodes_post_order() {
            if self.tree.set_folded(id, true) {
                let full_name = self.tree.node(id).full_name().to_string();
                self.dependencies.change_fold(&self.tree, &full_name, true);
                folded.push(full_name);
            }
        }
        self.relayout();
        for full_name in folded {
            self.notify(|listener| listener.on_fold(&full_name, true));
        }
    }

    pub fn filter_by_name(&mut self, pattern: &str, exclude: bool) {
        self.tree.filter_by_name(pattern, exclude);
        self.after_node_filter_change();
    }

    pub fn filter_by_type(&mut self, config: TypeFilterConfig) {
        self.tree.filter_by_type(config);
        self.after_node_filter_change();
    }

    pub fn reset_name_filter(&mut self) {
        self.tree.reset_name_filter();
        self.after_node_filter_change();
    }

    pub fn reset_type_filter(&mut self) {
        self.tree.reset_type_filter();
        self.after_node_filter_change();
    }

    fn after_node_filter_change(&mut self) {
        let names = self
            .tree
            .has_active_filters()
            .then(|| self.tree.filter_visible_names());
        self.dependencies.set_node_filter(names);
        self.relayout();
        self.notify(|listener| listener.on_filter_changed());
    }

    pub fn filter_dependencies_by_kind(&mut self, config: KindFilterConfig) {
        self.dependencies.filter_by_kind(config);
        self.notify(|listener| listener.on_filter_changed());
    }

    pub fn reset_dependency_kind_filter(&mut self) {
        self.dependencies.reset_kind_filter();
        self.notify(|listener| listener.on_filter_changed());
    }

    /// Drags a node (clamped into its parent) without disturbing the rest of
    /// the layout. Returns whether the node exists.
    pub fn drag(&mut self, full_name: &str, dx: f64, dy: f64) -> bool {
        let Some(id) = self.tree.get(full_name) else {
            warn!(node = full_name, "drag on unknown node");
            return false;
        };
        self.tree.drag(id, dx, dy);
        self.notify(|listener| listener.on_drag(full_name, dx, dy));
        true
    }

    /// Recomputes the visual geometry of every visible node against the
    /// currently visible dependency links.
    pub fn relayout(&mut self) {
        let links: Vec<(String, String)> = self
            .dependencies
            .visible()
            .iter()
            .map(|d| (d.from.clone(), d.to.clone()))
            .collect();
        self.layout.relayout(&mut self.tree, &links);
        self.notify(|listener| listener.on_layout_changed());
    }

    fn notify(&mut self, f: impl Fn(&mut dyn GraphListener)) {
        for listener in &mut self.listeners {
            f(listener.as_mut());
        }
    }
}
