use archviz_core::full_name;
use archviz_core::{DependencyDescription, FoldBoundary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed dependency edge, identified by its ordered endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    pub description: DependencyDescription,
    /// Whether the exact reverse edge is also visible; such pairs are routed
    /// as curves by the view so they do not overlap.
    pub must_share_nodes: bool,
}

impl Dependency {
    pub fn elementary(
        from: impl Into<String>,
        to: impl Into<String>,
        description: DependencyDescription,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            description,
            must_share_nodes: false,
        }
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.from, &self.to)
    }

    pub fn css_class(&self) -> String {
        format!("dependency {}", self.description.kinds_as_string())
            .trim_end()
            .to_string()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}({})", self.from, self.to, self.description)
    }
}

/// Which end of an edge a transform selects on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

/// Options of one fold-transform step over a dependency set: select edges
/// whose `endpoint` lies beneath `prefix`, rewrite that endpoint to `prefix`,
/// merge duplicates, and optionally drop self-loops produced by the rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRule {
    pub endpoint: Endpoint,
    pub prefix: String,
    pub eliminate_self_deps: bool,
}

impl TransformRule {
    pub fn selects(&self, dependency: &Dependency) -> bool {
        let property = match self.endpoint {
            Endpoint::Source => &dependency.from,
            Endpoint::Target => &dependency.to,
        };
        full_name::is_prefix(&self.prefix, property)
    }
}

/// The boundary crossed when rewriting `original` to the folded node, or
/// `None` when the endpoint already is the folded node itself.
pub fn fold_boundary(
    original: &str,
    folded: &str,
    folded_is_class_like: bool,
) -> Option<FoldBoundary> {
    if original == folded {
        None
    } else if folded_is_class_like && full_name::parent(original) == Some(folded) {
        Some(FoldBoundary::InnerClass)
    } else {
        Some(FoldBoundary::Package)
    }
}
