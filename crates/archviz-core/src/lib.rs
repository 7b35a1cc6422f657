pub mod description;
pub mod error;
pub mod full_name;
pub mod node_kind;
pub mod raw;

pub use description::{AccessKind, CodeElement, DependencyDescription, FoldBoundary, InheritanceKind};
pub use error::GraphBuildError;
pub use node_kind::NodeKind;
pub use raw::{RawAccess, RawNode};
