//! Shared fixture generation for the benchmarks.

use archviz_core::{NodeKind, RawAccess, RawNode};

fn empty(name: &str, full_name: &str, kind: NodeKind) -> RawNode {
    RawNode {
        name: name.to_string(),
        full_name: full_name.to_string(),
        kind,
        children: Vec::new(),
        superclass: None,
        interfaces: Vec::new(),
        anonymous_implementation: Vec::new(),
        method_calls: Vec::new(),
        constructor_calls: Vec::new(),
        field_accesses: Vec::new(),
    }
}

/// A ring of `packages` packages with `classes_per_package` classes each;
/// every class calls one method of its counterpart in the next package.
pub fn synthetic_description(packages: usize, classes_per_package: usize) -> RawNode {
    let mut root = empty("example", "com.example", NodeKind::Package);
    for p in 0..packages {
        let package_name = format!("com.example.p{p}");
        let mut package = empty(&format!("p{p}"), &package_name, NodeKind::Package);
        for c in 0..classes_per_package {
            let class_name = format!("{package_name}.Class{c}");
            let mut class = empty(&format!("Class{c}"), &class_name, NodeKind::Class);
            let target = format!("com.example.p{}.Class{c}", (p + 1) % packages);
            class.method_calls.push(RawAccess {
                to: target,
                start_code_unit: Some("run()".to_string()),
                target_element: Some("handle()".to_string()),
            });
            package.children.push(class);
        }
        root.children.push(package);
    }
    root
}
