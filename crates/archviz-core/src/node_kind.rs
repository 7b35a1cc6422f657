use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a node in the class-dependency tree, using the exporter's
/// vocabulary (`"package"`, `"class"`, `"interface"`, `"abstractclass"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Package,
    Class,
    Interface,
    AbstractClass,
}

impl NodeKind {
    pub fn is_package(self) -> bool {
        self == NodeKind::Package
    }

    /// Classes and abstract classes; the type filter treats both as classes.
    pub fn is_class_like(self) -> bool {
        matches!(self, NodeKind::Class | NodeKind::AbstractClass)
    }

    pub fn is_interface(self) -> bool {
        self == NodeKind::Interface
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Package => "package",
            NodeKind::Class => "class",
            NodeKind::Interface => "interface",
            NodeKind::AbstractClass => "abstractclass",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
