use crate::dependency::{fold_boundary, Dependency, Endpoint, TransformRule};
use crate::tree::Tree;
use archviz_core::{
    full_name, AccessKind, CodeElement, DependencyDescription, GraphBuildError, InheritanceKind,
    RawNode,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Configuration of the dependency kind filter. Filtering happens on the
/// elementary level, so a merged edge keeps exactly the kinds that survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindFilterConfig {
    pub show_implements: bool,
    pub show_extends: bool,
    pub show_implements_anonymous: bool,
    pub show_method_call: bool,
    pub show_constructor_call: bool,
    pub show_field_access: bool,
    /// Edges between a class and its own inner class are governed by this
    /// switch alone, regardless of the per-kind switches.
    pub show_between_class_and_inner: bool,
}

impl Default for KindFilterConfig {
    fn default() -> Self {
        Self {
            show_implements: true,
            show_extends: true,
            show_implements_anonymous: true,
            show_method_call: true,
            show_constructor_call: true,
            show_field_access: true,
            show_between_class_and_inner: true,
        }
    }
}

impl KindFilterConfig {
    fn allows(&self, dependency: &Dependency) -> bool {
        if is_inner_class_edge(&dependency.from, &dependency.to) {
            return self.show_between_class_and_inner;
        }
        match (dependency.description.inheritance, dependency.description.access) {
            (Some(InheritanceKind::Extends), _) => self.show_extends,
            (Some(InheritanceKind::Implements), _) => self.show_implements,
            (Some(InheritanceKind::ImplementsAnonymous), _) => self.show_implements_anonymous,
            (_, Some(AccessKind::MethodCall)) => self.show_method_call,
            (_, Some(AccessKind::ConstructorCall)) => self.show_constructor_call,
            (_, Some(AccessKind::FieldAccess)) => self.show_field_access,
            _ => true,
        }
    }
}

fn is_inner_class_edge(from: &str, to: &str) -> bool {
    full_name::parent(from) == Some(to) || full_name::parent(to) == Some(from)
}

/// One rendered line of the detailed dependency view of an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailedDependency {
    pub description: String,
    pub css_class: String,
}

/// One registered fold: rewrites both edge ends onto the folded node.
#[derive(Debug, Clone)]
struct FoldTransformer {
    full_name: String,
    class_like: bool,
}

impl FoldTransformer {
    /// Target side first (self-loops kept so the source side still sees
    /// them), then source side with self-loop elimination: folding a package
    /// must not draw an edge from the package to itself.
    fn apply(&self, dependencies: Vec<Dependency>) -> Vec<Dependency> {
        let target_rule = TransformRule {
            endpoint: Endpoint::Target,
            prefix: self.full_name.clone(),
            eliminate_self_deps: false,
        };
        let after_target = transform(dependencies, &target_rule, |d| self.rewrite(d, Endpoint::Target));
        let source_rule = TransformRule {
            endpoint: Endpoint::Source,
            prefix: self.full_name.clone(),
            eliminate_self_deps: true,
        };
        transform(after_target, &source_rule, |d| self.rewrite(d, Endpoint::Source))
    }

    fn rewrite(&self, mut dependency: Dependency, endpoint: Endpoint) -> Dependency {
        let original = match endpoint {
            Endpoint::Source => std::mem::replace(&mut dependency.from, self.full_name.clone()),
            Endpoint::Target => std::mem::replace(&mut dependency.to, self.full_name.clone()),
        };
        if let Some(boundary) = fold_boundary(&original, &self.full_name, self.class_like) {
            dependency.description = dependency.description.folded_at(boundary);
        }
        dependency
    }
}

/// Splits off the edges the rule selects, rewrites and re-merges them, and
/// appends them behind the untouched rest.
fn transform<F>(dependencies: Vec<Dependency>, rule: &TransformRule, rewrite: F) -> Vec<Dependency>
where
    F: Fn(Dependency) -> Dependency,
{
    let (matching, rest): (Vec<_>, Vec<_>) =
        dependencies.into_iter().partition(|d| rule.selects(d));
    let mut folded = unique(matching.into_iter().map(rewrite).collect());
    if rule.eliminate_self_deps {
        folded.retain(|d| d.from != d.to);
    }
    let mut out = rest;
    out.extend(folded);
    out
}

/// Merges dependencies sharing an ordered endpoint pair, keeping first-seen
/// order.
fn unique(dependencies: Vec<Dependency>) -> Vec<Dependency> {
    let mut out: Vec<Dependency> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    for dependency in dependencies {
        let key = (dependency.from.clone(), dependency.to.clone());
        match index.get(&key) {
            Some(&at) => {
                out[at].description = out[at].description.merge(&dependency.description);
            }
            None => {
                index.insert(key, out.len());
                out.push(dependency);
            }
        }
    }
    out
}

/// The dependency collection: the immutable elementary base set plus the
/// derived filtered, deduplicated and fold-transformed views.
///
/// The visible set is recomputed in full on every fold/filter change by
/// re-running the ordered transform pipeline over the filtered-unique base.
#[derive(Debug, Clone)]
pub struct Dependencies {
    all: Vec<Dependency>,
    filtered: Vec<Dependency>,
    uniqued: Vec<Dependency>,
    transformers: Vec<FoldTransformer>,
    visible: Vec<Dependency>,
    node_filter: Option<HashSet<String>>,
    kind_filter: Option<KindFilterConfig>,
}

impl Dependencies {
    /// Extracts the elementary dependencies of the raw description, failing
    /// fast on any relation target missing from the tree.
    pub fn build(raw: &RawNode, tree: &Tree) -> Result<Self, GraphBuildError> {
        let mut all = Vec::new();
        extract(raw, tree, &mut all)?;
        debug!(count = all.len(), "extracted elementary dependencies");
        let filtered = all.clone();
        let uniqued = unique(filtered.clone());
        let mut dependencies = Self {
            all,
            filtered,
            uniqued,
            transformers: Vec::new(),
            visible: Vec::new(),
            node_filter: None,
            kind_filter: None,
        };
        dependencies.recreate_visible();
        Ok(dependencies)
    }

    /// Registers or removes the fold transformer for `full_name` and
    /// recomputes the visible set. Later folds transform the output of
    /// earlier folds, so registration order is preserved; re-registering a
    /// name keeps its position.
    pub fn change_fold(&mut self, tree: &Tree, full_name: &str, folded: bool) {
        if folded {
            let class_like = tree
                .get(full_name)
                .map(|id| tree.node(id).kind().is_class_like())
                .unwrap_or(false);
            debug!(node = full_name, class_like, "registering fold transformer");
            match self.transformers.iter_mut().find(|t| t.full_name == full_name) {
                Some(existing) => existing.class_like = class_like,
                None => self.transformers.push(FoldTransformer {
                    full_name: full_name.to_string(),
                    class_like,
                }),
            }
        } else {
            debug!(node = full_name, "removing fold transformer");
            self.transformers.retain(|t| t.full_name != full_name);
        }
        self.recreate_visible();
    }

    /// Installs the node filter: only edges with both endpoints in `names`
    /// survive. `None` disables the filter.
    pub fn set_node_filter(&mut self, names: Option<HashSet<String>>) {
        self.node_filter = names;
        self.reapply_filters();
    }

    pub fn filter_by_kind(&mut self, config: KindFilterConfig) {
        self.kind_filter = Some(config);
        self.reapply_filters();
    }

    pub fn reset_kind_filter(&mut self) {
        self.kind_filter = None;
        self.reapply_filters();
    }

    pub fn visible(&self) -> &[Dependency] {
        &self.visible
    }

    pub fn elementary_count(&self) -> usize {
        self.all.len()
    }

    /// Every distinct textual description of the elementary edges running
    /// between `from` and `to`, for the detail popup of an edge.
    ///
    /// Endpoints match by anchored prefix when the queried node is a package
    /// or currently collapsed (its hidden children contribute), exactly
    /// otherwise.
    pub fn detailed_dependencies_of(
        &self,
        tree: &Tree,
        from: &str,
        to: &str,
    ) -> Vec<DetailedDependency> {
        if tree.get(from).is_none() || tree.get(to).is_none() {
            warn!(from, to, "detailed dependencies requested for unknown nodes");
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for dependency in &self.filtered {
            if !endpoint_matches(tree, from, &dependency.from)
                || !endpoint_matches(tree, to, &dependency.to)
                || !dependency.description.has_detail()
            {
                continue;
            }
            let text = detailed_text(from, dependency);
            if seen.insert(text.clone()) {
                out.push(DetailedDependency {
                    description: text,
                    css_class: dependency.css_class(),
                });
            }
        }
        out
    }

    /// Re-derives the filtered base set from the full elementary set, then
    /// recomputes everything downstream.
    fn reapply_filters(&mut self) {
        let mut filtered = self.all.clone();
        if let Some(names) = &self.node_filter {
            filtered.retain(|d| names.contains(&d.from) && names.contains(&d.to));
        }
        if let Some(config) = &self.kind_filter {
            filtered.retain(|d| config.allows(d));
        }
        debug!(
            elementary = self.all.len(),
            filtered = filtered.len(),
            "reapplied dependency filters"
        );
        self.filtered = filtered;
        self.uniqued = unique(self.filtered.clone());
        self.recreate_visible();
    }

    /// Runs the fold pipeline over the filtered-unique set and derives the
    /// mutual-edge flags.
    fn recreate_visible(&mut self) {
        let mut visible = self.uniqued.clone();
        for transformer in &self.transformers {
            visible = transformer.apply(visible);
        }
        let keys: HashSet<(String, String)> = visible
            .iter()
            .map(|d| (d.from.clone(), d.to.clone()))
            .collect();
        for dependency in &mut visible {
            dependency.must_share_nodes =
                keys.contains(&(dependency.to.clone(), dependency.from.clone()));
        }
        self.visible = visible;
    }
}

fn endpoint_matches(tree: &Tree, queried: &str, actual: &str) -> bool {
    match tree.get(queried) {
        Some(id) if tree.node(id).kind().is_package() || tree.is_currently_leaf(id) => {
            full_name::is_prefix(queried, actual)
        }
        Some(_) => actual == queried,
        None => false,
    }
}

fn detailed_text(from: &str, dependency: &Dependency) -> String {
    let relative = full_name::relative_to(from, &dependency.from);
    let start = match &dependency.description.start {
        Some(CodeElement::Named(name)) => name.as_str(),
        _ => "",
    };
    let target = match &dependency.description.target {
        Some(CodeElement::Named(name)) => name.as_str(),
        _ => "",
    };
    let left = if relative.is_empty() {
        start.to_string()
    } else if start.is_empty() {
        relative.to_string()
    } else {
        format!("{relative}.{start}")
    };
    format!("{left}->{target}")
}

/// Walks the raw tree and emits one elementary dependency per recorded
/// relation. Packages carry no relations themselves; their children do.
fn extract(element: &RawNode, tree: &Tree, out: &mut Vec<Dependency>) -> Result<(), GraphBuildError> {
    if !element.kind.is_package() {
        let mut push = |to: &str, description: DependencyDescription| -> Result<(), GraphBuildError> {
            if tree.get(to).is_none() {
                return Err(GraphBuildError::UnknownDependencyTarget {
                    from: element.full_name.clone(),
                    to: to.to_string(),
                });
            }
            out.push(Dependency::elementary(element.full_name.as_str(), to, description));
            Ok(())
        };

        if let Some(superclass) = &element.superclass {
            push(superclass, DependencyDescription::inheritance(InheritanceKind::Extends))?;
        }
        for interface in &element.interfaces {
            push(interface, DependencyDescription::inheritance(InheritanceKind::Implements))?;
        }
        for interface in &element.anonymous_implementation {
            push(
                interface,
                DependencyDescription::inheritance(InheritanceKind::ImplementsAnonymous),
            )?;
        }
        for (accesses, kind) in [
            (&element.method_calls, AccessKind::MethodCall),
            (&element.constructor_calls, AccessKind::ConstructorCall),
            (&element.field_accesses, AccessKind::FieldAccess),
        ] {
            for access in accesses {
                push(
                    &access.to,
                    DependencyDescription::access(
                        kind,
                        access.start_code_unit.clone(),
                        access.target_element.clone(),
                    ),
                )?;
            }
        }
    }
    for child in &element.children {
        extract(child, tree, out)?;
    }
    Ok(())
}
