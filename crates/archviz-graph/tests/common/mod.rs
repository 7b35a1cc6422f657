//! Shared fixtures: a builder for raw graph descriptions mirroring the
//! exporter JSON, and the sample trees used across the integration tests.

#![allow(dead_code)]

use archviz_core::{NodeKind, RawAccess, RawNode};
use archviz_graph::{Graph, Tree};

pub struct NodeBuilder {
    name: String,
    kind: NodeKind,
    children: Vec<NodeBuilder>,
    superclass: Option<String>,
    interfaces: Vec<String>,
    anonymous_implementation: Vec<String>,
    method_calls: Vec<RawAccess>,
    constructor_calls: Vec<RawAccess>,
    field_accesses: Vec<RawAccess>,
}

pub fn package(name: &str) -> NodeBuilder {
    NodeBuilder::new(name, NodeKind::Package)
}

pub fn class(name: &str, kind: NodeKind) -> NodeBuilder {
    NodeBuilder::new(name, kind)
}

fn access(to: &str, start_code_unit: &str, target_element: &str) -> RawAccess {
    RawAccess {
        to: to.to_string(),
        start_code_unit: Some(start_code_unit.to_string()),
        target_element: Some(target_element.to_string()),
    }
}

impl NodeBuilder {
    fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
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

    pub fn add(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub fn having_inner_class(self, child: NodeBuilder) -> Self {
        self.add(child)
    }

    pub fn extending(mut self, target: &str) -> Self {
        self.superclass = Some(target.to_string());
        self
    }

    pub fn implementing(mut self, target: &str) -> Self {
        self.interfaces.push(target.to_string());
        self
    }

    pub fn implementing_anonymous(mut self, target: &str) -> Self {
        self.anonymous_implementation.push(target.to_string());
        self
    }

    pub fn calling_method(mut self, to: &str, start: &str, target: &str) -> Self {
        self.method_calls.push(access(to, start, target));
        self
    }

    pub fn calling_constructor(mut self, to: &str, start: &str, target: &str) -> Self {
        self.constructor_calls.push(access(to, start, target));
        self
    }

    pub fn accessing_field(mut self, to: &str, start: &str, target: &str) -> Self {
        self.field_accesses.push(access(to, start, target));
        self
    }

    pub fn build(self) -> RawNode {
        let full_name = self.name.clone();
        self.into_raw(full_name)
    }

    fn into_raw(self, full_name: String) -> RawNode {
        // Inner classes hang off their outer class with `$`.
        let child_separator = if self.kind.is_class_like() { '$' } else { '.' };
        let children = self
            .children
            .into_iter()
            .map(|child| {
                let child_full_name = format!("{full_name}{child_separator}{}", child.name);
                child.into_raw(child_full_name)
            })
            .collect();
        RawNode {
            name: self.name,
            full_name,
            kind: self.kind,
            children,
            superclass: self.superclass,
            interfaces: self.interfaces,
            anonymous_implementation: self.anonymous_implementation,
            method_calls: self.method_calls,
            constructor_calls: self.constructor_calls,
            field_accesses: self.field_accesses,
        }
    }
}

/// Plain tree without dependencies, for the filter tests.
pub fn tree2_description() -> RawNode {
    package("com.tngtech")
        .add(package("main").add(class("class1", NodeKind::AbstractClass)))
        .add(
            package("test")
                .add(class("testclass1", NodeKind::Class))
                .add(package("subtest").add(class("subtestclass1", NodeKind::Class))),
        )
        .add(class("class2", NodeKind::Class))
        .add(class("class3", NodeKind::Interface))
        .build()
}

pub fn graph1_description() -> RawNode {
    package("com.tngtech")
        .add(
            package("main").add(
                class("class1", NodeKind::AbstractClass).calling_method(
                    "com.tngtech.interface1",
                    "startMethod(arg1, arg2)",
                    "targetMethod()",
                ),
            ),
        )
        .add(
            package("test")
                .add(class("testclass1", NodeKind::Class).accessing_field(
                    "com.tngtech.class2",
                    "testclass1()",
                    "field1",
                ))
                .add(
                    package("subtest").add(
                        class("subtestclass1", NodeKind::Class)
                            .implementing("com.tngtech.interface1")
                            .calling_constructor(
                                "com.tngtech.test.testclass1",
                                "startMethod(arg)",
                                "testclass1()",
                            ),
                    ),
                ),
        )
        .add(
            class("class2", NodeKind::Class)
                .extending("com.tngtech.main.class1")
                .implementing("com.tngtech.interface1"),
        )
        .add(class("interface1", NodeKind::Interface))
        .build()
}

pub fn all_deps1() -> Vec<&'static str> {
    vec![
        "com.tngtech.main.class1->com.tngtech.interface1(startMethod(arg1, arg2) methodCall targetMethod())",
        "com.tngtech.test.testclass1->com.tngtech.class2(testclass1() fieldAccess field1)",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.interface1(implements)",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.test.testclass1(startMethod(arg) constructorCall testclass1())",
        "com.tngtech.class2->com.tngtech.main.class1(extends)",
        "com.tngtech.class2->com.tngtech.interface1(implements)",
    ]
}

pub fn graph2_description() -> RawNode {
    package("com.tngtech")
        .add(
            package("main").add(
                class("class1", NodeKind::AbstractClass)
                    .implementing("com.tngtech.interface1")
                    .calling_method(
                        "com.tngtech.interface1",
                        "startMethod(arg1, arg2)",
                        "targetMethod()",
                    ),
            ),
        )
        .add(
            package("test")
                .add(
                    class("testclass1", NodeKind::Class)
                        .accessing_field("com.tngtech.class2", "testclass1()", "field1")
                        .calling_method("com.tngtech.class2", "testclass1()", "targetMethod()")
                        .accessing_field("com.tngtech.main.class1", "startMethod1()", "field1")
                        .accessing_field("com.tngtech.main.class1", "startMethod2()", "field1")
                        .implementing_anonymous("com.tngtech.interface1"),
                )
                .add(
                    package("subtest").add(
                        class("subtestclass1", NodeKind::Class)
                            .implementing("com.tngtech.interface1")
                            .calling_method("com.tngtech.class2", "startMethod1()", "targetMethod()")
                            .calling_constructor(
                                "com.tngtech.test.testclass1",
                                "doSmth(arg)",
                                "testclass1()",
                            )
                            .calling_constructor(
                                "com.tngtech.test.testclass1",
                                "startMethod1()",
                                "testclass1(arg)",
                            ),
                    ),
                ),
        )
        .add(
            class("class2", NodeKind::Class)
                .extending("com.tngtech.main.class1")
                .implementing("com.tngtech.interface1"),
        )
        .add(class("interface1", NodeKind::Interface))
        .build()
}

pub fn all_deps2() -> Vec<&'static str> {
    vec![
        "com.tngtech.main.class1->com.tngtech.interface1(startMethod(arg1, arg2) implements methodCall targetMethod())",
        "com.tngtech.test.testclass1->com.tngtech.class2(testclass1() several [...])",
        "com.tngtech.test.testclass1->com.tngtech.main.class1([...] fieldAccess field1)",
        "com.tngtech.test.testclass1->com.tngtech.interface1(implementsAnonymous)",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.interface1(implements)",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.class2(startMethod1() methodCall targetMethod())",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.test.testclass1([...] constructorCall [...])",
        "com.tngtech.class2->com.tngtech.main.class1(extends)",
        "com.tngtech.class2->com.tngtech.interface1(implements)",
    ]
}

pub fn graph3_description() -> RawNode {
    package("com.tngtech")
        .add(
            package("main")
                .add(
                    class("class1", NodeKind::AbstractClass)
                        .implementing("com.tngtech.interface1")
                        .calling_method(
                            "com.tngtech.interface1",
                            "startMethod(arg1, arg2)",
                            "targetMethod()",
                        ),
                )
                .add(
                    class("class3", NodeKind::Class)
                        .implementing("com.tngtech.interface1")
                        .calling_method(
                            "com.tngtech.interface1",
                            "startMethod(arg1, arg2)",
                            "targetMethod()",
                        ),
                ),
        )
        .add(
            package("test")
                .add(
                    class("testclass1", NodeKind::Class)
                        .extending("com.tngtech.class2")
                        .accessing_field("com.tngtech.class2", "testclass1()", "field1")
                        .calling_method("com.tngtech.class2", "testclass1()", "targetMethod()")
                        .accessing_field("com.tngtech.main.class1", "startMethod1()", "field1")
                        .accessing_field("com.tngtech.main.class1", "startMethod2()", "field1")
                        .implementing_anonymous("com.tngtech.interface1"),
                )
                .add(
                    package("subtest").add(
                        class("subtestclass1", NodeKind::Class)
                            .implementing("com.tngtech.interface1")
                            .calling_method("com.tngtech.class2", "startMethod1()", "targetMethod()")
                            .calling_constructor(
                                "com.tngtech.test.testclass1",
                                "doSmth(arg)",
                                "testclass1()",
                            )
                            .calling_constructor(
                                "com.tngtech.test.testclass1",
                                "startMethod1()",
                                "testclass1(arg)",
                            ),
                    ),
                ),
        )
        .add(
            class("class2", NodeKind::Class)
                .extending("com.tngtech.main.class1")
                .implementing("com.tngtech.interface1"),
        )
        .add(class("interface1", NodeKind::Interface))
        .build()
}

pub fn all_deps3() -> Vec<&'static str> {
    vec![
        "com.tngtech.main.class1->com.tngtech.interface1(startMethod(arg1, arg2) implements methodCall targetMethod())",
        "com.tngtech.main.class3->com.tngtech.interface1(startMethod(arg1, arg2) implements methodCall targetMethod())",
        "com.tngtech.test.testclass1->com.tngtech.class2(testclass1() extends several [...])",
        "com.tngtech.test.testclass1->com.tngtech.main.class1([...] fieldAccess field1)",
        "com.tngtech.test.testclass1->com.tngtech.interface1(implementsAnonymous)",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.interface1(implements)",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.class2(startMethod1() methodCall targetMethod())",
        "com.tngtech.test.subtest.subtestclass1->com.tngtech.test.testclass1([...] constructorCall [...])",
        "com.tngtech.class2->com.tngtech.main.class1(extends)",
        "com.tngtech.class2->com.tngtech.interface1(implements)",
    ]
}

/// Inner classes on both sides plus a mutual dependency pair.
pub fn overlapping_description() -> RawNode {
    package("com.tngtech")
        .add(
            package("main").add(
                class("class1", NodeKind::AbstractClass)
                    .calling_method(
                        "com.tngtech.interface1",
                        "startMethod(arg1, arg2)",
                        "targetMethod()",
                    )
                    .calling_method(
                        "com.tngtech.test.testclass1$InnerTestClass1",
                        "startMethod(arg1, arg2)",
                        "targetMethod()",
                    ),
            ),
        )
        .add(
            package("test")
                .add(
                    class("testclass1", NodeKind::Class)
                        .having_inner_class(
                            class("InnerTestClass1", NodeKind::Class).accessing_field(
                                "com.tngtech.class2",
                                "innertestclass1()",
                                "field1",
                            ),
                        )
                        .accessing_field("com.tngtech.class2", "testclass1()", "field1"),
                )
                .add(
                    package("subtest").add(
                        class("subtestclass1", NodeKind::Class)
                            .implementing("com.tngtech.interface1")
                            .calling_constructor(
                                "com.tngtech.test.testclass1",
                                "startMethod(arg)",
                                "testclass1()",
                            ),
                    ),
                ),
        )
        .add(
            class("class2", NodeKind::Class)
                .extending("com.tngtech.main.class1")
                .implementing("com.tngtech.interface1")
                .having_inner_class(
                    class("InnerClass2", NodeKind::Class).accessing_field(
                        "com.tngtech.class2",
                        "startCodeUnit()",
                        "targetField",
                    ),
                )
                .accessing_field("com.tngtech.class2$InnerClass2", "startCodeUnit()", "innerTargetField"),
        )
        .add(
            class("interface1", NodeKind::Interface).calling_method(
                "com.tngtech.test.subtest.subtestclass1",
                "startMethod()",
                "targetMethod()",
            ),
        )
        .build()
}

pub fn graph1() -> Graph {
    Graph::from_raw(&graph1_description()).unwrap()
}

pub fn graph2() -> Graph {
    Graph::from_raw(&graph2_description()).unwrap()
}

pub fn graph3() -> Graph {
    Graph::from_raw(&graph3_description()).unwrap()
}

pub fn overlapping_graph() -> Graph {
    Graph::from_raw(&overlapping_description()).unwrap()
}

pub fn edge_strings(graph: &Graph) -> Vec<String> {
    graph
        .visible_dependencies()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Set comparison of the visible edge strings (order-independent).
pub fn assert_same_edges(graph: &Graph, expected: &[&str]) {
    let mut actual = edge_strings(graph);
    actual.sort();
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(actual, expected);
}

pub fn visible_node_names(tree: &Tree) -> Vec<String> {
    let mut names: Vec<String> = tree
        .visible_descendants(tree.root())
        .into_iter()
        .map(|id| tree.node(id).full_name().to_string())
        .collect();
    names.sort();
    names
}

/// Set comparison of the visible node names.
pub fn assert_visible_nodes(tree: &Tree, expected: &[&str]) {
    let mut expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(visible_node_names(tree), expected);
}
