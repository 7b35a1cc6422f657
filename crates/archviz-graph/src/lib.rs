pub mod dependencies;
pub mod dependency;
pub mod graph;
pub mod layout;
pub mod name_match;
pub mod pack;
pub mod tree;
pub mod vector;

pub use dependencies::{Dependencies, DetailedDependency, KindFilterConfig};
pub use dependency::{Dependency, Endpoint, TransformRule};
pub use graph::{Graph, GraphError, GraphListener};
pub use layout::{CharCountMeasure, LayoutEngine, LayoutStyles, TextMeasure};
pub use name_match::NamePattern;
pub use tree::{Node, NodeId, Tree, TypeFilterConfig};
pub use vector::Vec2;
