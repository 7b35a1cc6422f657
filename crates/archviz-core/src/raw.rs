//! Data model of the raw graph description produced by the static-analysis
//! exporter.
//!
//! Field names and the relation-kind vocabulary are a fixed contract with the
//! exporter; loading and transport of the JSON itself is the host's concern.

use crate::node_kind::NodeKind;
use serde::{Deserialize, Serialize};

/// One node record of the exported tree. Relation lists are only ever present
/// on class-like records; package records carry children only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub name: String,
    pub full_name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<RawNode>,

    /// Singular `extends` target.
    #[serde(default)]
    pub superclass: Option<String>,
    /// `implements` targets.
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Interfaces implemented by anonymous inner classes.
    #[serde(default)]
    pub anonymous_implementation: Vec<String>,
    #[serde(default)]
    pub method_calls: Vec<RawAccess>,
    #[serde(default)]
    pub constructor_calls: Vec<RawAccess>,
    #[serde(default)]
    pub field_accesses: Vec<RawAccess>,
}

/// One recorded access relation (method call, constructor call or field
/// access) from the enclosing record to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccess {
    pub to: String,
    #[serde(default)]
    pub start_code_unit: Option<String>,
    #[serde(default)]
    pub target_element: Option<String>,
}
