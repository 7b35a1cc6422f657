use thiserror::Error;

/// Fatal errors while building a graph from a raw description.
///
/// Construction is fail-fast: no partial tree or dependency set is ever
/// returned (all later operations are total).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphBuildError {
    #[error("dependency {from}->{to} references a node missing from the tree")]
    UnknownDependencyTarget { from: String, to: String },
    #[error("duplicate full name in raw description: {full_name}")]
    DuplicateFullName { full_name: String },
}
