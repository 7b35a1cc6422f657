use serde::{Deserialize, Serialize};
use std::fmt;

/// Specific kind of an inheritance-group dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InheritanceKind {
    Extends,
    Implements,
    ImplementsAnonymous,
    /// Sentinel for merged entries whose specific kinds disagree.
    Several,
}

impl InheritanceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InheritanceKind::Extends => "extends",
            InheritanceKind::Implements => "implements",
            InheritanceKind::ImplementsAnonymous => "implementsAnonymous",
            InheritanceKind::Several => "several",
        }
    }
}

/// Specific kind of an access-group dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    MethodCall,
    ConstructorCall,
    FieldAccess,
    /// Synthetic kind assigned when folding collapses an edge that crossed an
    /// inner-class boundary.
    ChildrenAccess,
    /// Sentinel for merged entries whose specific kinds disagree.
    Several,
}

impl AccessKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessKind::MethodCall => "methodCall",
            AccessKind::ConstructorCall => "constructorCall",
            AccessKind::FieldAccess => "fieldAccess",
            AccessKind::ChildrenAccess => "childrenAccess",
            AccessKind::Several => "several",
        }
    }
}

/// A code-element name attached to an access entry (`startCodeUnit` /
/// `targetElement`). Merging entries that disagree on an element collapses it
/// to [`CodeElement::Elided`], rendered as `[...]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeElement {
    Named(String),
    Elided,
}

impl fmt::Display for CodeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeElement::Named(name) => f.write_str(name),
            CodeElement::Elided => f.write_str("[...]"),
        }
    }
}

/// The boundary a folded edge endpoint was rewritten across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldBoundary {
    /// The original endpoint was a direct inner class of the folded node.
    InnerClass,
    /// The original endpoint sat behind a package boundary (or deeper).
    Package,
}

/// Accumulating, mergeable record of the dependency kinds between two nodes.
///
/// At most one entry per kind group; merged entries whose specific kinds
/// disagree carry the `Several` sentinel. Code-element names belong to the
/// access group only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyDescription {
    pub inheritance: Option<InheritanceKind>,
    pub access: Option<AccessKind>,
    pub start: Option<CodeElement>,
    pub target: Option<CodeElement>,
}

impl DependencyDescription {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn inheritance(kind: InheritanceKind) -> Self {
        Self {
            inheritance: Some(kind),
            ..Self::default()
        }
    }

    pub fn access(kind: AccessKind, start: Option<String>, target: Option<String>) -> Self {
        Self {
            inheritance: None,
            access: Some(kind),
            start: start.map(CodeElement::Named),
            target: target.map(CodeElement::Named),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inheritance.is_none() && self.access.is_none()
    }

    /// Whether the description carries code-element detail worth listing in a
    /// detailed dependency view.
    pub fn has_detail(&self) -> bool {
        matches!(self.start, Some(CodeElement::Named(_)))
            || matches!(self.target, Some(CodeElement::Named(_)))
    }

    /// Combines two descriptions of the same edge.
    ///
    /// Per kind group the merged kind is the common specific kind, or
    /// `Several` when the sides disagree. Code elements survive only as long
    /// as every contributing access entry agrees on them.
    pub fn merge(&self, other: &Self) -> Self {
        let inheritance = match (self.inheritance, other.inheritance) {
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(_), Some(_)) => Some(InheritanceKind::Several),
            (one, two) => one.or(two),
        };
        let (access, start, target) = match (self.access, other.access) {
            (Some(a), Some(b)) => {
                let kind = if a == b { a } else { AccessKind::Several };
                (
                    Some(kind),
                    merge_element(&self.start, &other.start),
                    merge_element(&self.target, &other.target),
                )
            }
            (Some(a), None) => (Some(a), self.start.clone(), self.target.clone()),
            (None, Some(b)) => (Some(b), other.start.clone(), other.target.clone()),
            (None, None) => (None, None, None),
        };
        Self {
            inheritance,
            access,
            start,
            target,
        }
    }

    /// Rewrites the description after its edge endpoint was replaced by a
    /// folded ancestor.
    ///
    /// Folding within a class keeps a classifiable relation
    /// (`childrenAccess`); a package has no `implements` or call relation, so
    /// nothing survives a package boundary.
    pub fn folded_at(&self, boundary: FoldBoundary) -> Self {
        match boundary {
            FoldBoundary::InnerClass => Self {
                inheritance: None,
                access: Some(AccessKind::ChildrenAccess),
                start: None,
                target: None,
            },
            FoldBoundary::Package => Self::empty(),
        }
    }

    /// The kind names only, space separated, e.g. `"implements methodCall"`.
    pub fn kinds_as_string(&self) -> String {
        let mut out = String::new();
        if let Some(kind) = self.inheritance {
            out.push_str(kind.as_str());
        }
        if let Some(kind) = self.access {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(kind.as_str());
        }
        out
    }
}

fn merge_element(a: &Option<CodeElement>, b: &Option<CodeElement>) -> Option<CodeElement> {
    match (a, b) {
        (Some(CodeElement::Named(x)), Some(CodeElement::Named(y))) if x == y => {
            Some(CodeElement::Named(x.clone()))
        }
        (Some(_), Some(_)) => Some(CodeElement::Elided),
        _ => None,
    }
}

impl fmt::Display for DependencyDescription {
    /// `<start> <inheritance> <access> <target>`, skipping absent parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(start) = &self.start {
            parts.push(start.to_string());
        }
        if let Some(kind) = self.inheritance {
            parts.push(kind.as_str().to_string());
        }
        if let Some(kind) = self.access {
            parts.push(kind.as_str().to_string());
        }
        if let Some(target) = &self.target {
            parts.push(target.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}
