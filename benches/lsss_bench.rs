use std::collections::HashSet;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lsss::{AccessTree, Attribute, FieldElement, Fr, compile, solve};

/// `(a_0 and b_0) or (a_1 and b_1) or ...`: every clause adds one column.
fn clauses(count: usize) -> AccessTree<Fr> {
    let children = (0..count).map(|i| {
        AccessTree::and([
            AccessTree::leaf(format!("a{i}").as_str()),
            AccessTree::leaf(format!("b{i}").as_str()),
        ])
        .expect("two children")
    });
    AccessTree::or(children).expect("at least one clause")
}

pub fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for count in [4usize, 16, 64] {
        let tree = clauses(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &tree, |b, tree| {
            b.iter(|| black_box(compile(tree)))
        });
    }
    group.finish();
}

pub fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for count in [4usize, 16, 64] {
        let matrix = compile(&clauses(count));
        // Only the last clause is satisfied, so every other row is a distractor.
        let last = count - 1;
        let held: HashSet<Attribute<Fr>> = (0..count)
            .map(|i| Attribute::from_name(&format!("a{i}")))
            .chain([Attribute::from_name(&format!("b{last}"))])
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &held, |b, held| {
            b.iter(|| black_box(matrix.evaluate(held).expect("well-formed matrix")))
        });
    }
    group.finish();
}

pub fn bench_solve(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xdead_beef);
    let width = 32;
    let vectors: Vec<Vec<Fr>> = (0..width)
        .map(|_| (0..width).map(|_| Fr::random(&mut rng)).collect())
        .collect();
    c.bench_function("solve_random_32x32", |b| {
        b.iter(|| black_box(solve(black_box(&vectors), width).expect("square system")))
    });
}

criterion_group!(benches, bench_compile, bench_evaluate, bench_solve);
criterion_main!(benches);
