use archviz_bench::synthetic_description;
use archviz_graph::{LayoutEngine, Tree};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_relayout_500_nodes(c: &mut Criterion) {
    let description = synthetic_description(20, 25);
    let mut tree = Tree::from_raw(&description).unwrap();
    let engine = LayoutEngine::default();
    let links: Vec<(String, String)> = (0..20)
        .flat_map(|p| {
            (0..25).map(move |cl| {
                (
                    format!("com.example.p{p}.Class{cl}"),
                    format!("com.example.p{}.Class{cl}", (p + 1) % 20),
                )
            })
        })
        .collect();

    c.bench_function("relayout_500_nodes", |b| {
        b.iter(|| engine.relayout(black_box(&mut tree), black_box(&links)))
    });
}

fn bench_pack_only_relayout(c: &mut Criterion) {
    let description = synthetic_description(20, 25);
    let mut tree = Tree::from_raw(&description).unwrap();
    let mut engine = LayoutEngine::default();
    engine.force_iterations = 0;

    c.bench_function("relayout_500_nodes_packing_only", |b| {
        b.iter(|| engine.relayout(black_box(&mut tree), &[]))
    });
}

criterion_group!(benches, bench_relayout_500_nodes, bench_pack_only_relayout);
criterion_main!(benches);
