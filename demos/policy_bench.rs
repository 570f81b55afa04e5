use std::collections::HashSet;

use tracing::{info, instrument};
use tracing_subscriber::fmt;

use lsss::{AccessTree, Attribute, Fr, LsssMatrix, Reconstruction, compile};

const LEAVES: usize = 1 << 9;

/// Balanced tree alternating AND and OR levels over `names`.
fn balanced(names: &[String], and_level: bool) -> Result<AccessTree<Fr>, lsss::Error> {
    if names.len() == 1 {
        return Ok(AccessTree::leaf(names[0].as_str()));
    }
    let (left, right) = names.split_at(names.len() / 2);
    let children = [balanced(left, !and_level)?, balanced(right, !and_level)?];
    if and_level {
        AccessTree::and(children)
    } else {
        AccessTree::or(children)
    }
}

#[instrument(level = "info", skip_all)]
fn compile_policy(tree: &AccessTree<Fr>) -> LsssMatrix<Fr> {
    compile(tree)
}

#[instrument(level = "info", skip_all, fields(held = held.len()))]
fn evaluate_policy(
    matrix: &LsssMatrix<Fr>,
    held: &HashSet<Attribute<Fr>>,
) -> Result<Option<Reconstruction<Fr>>, lsss::Error> {
    matrix.evaluate(held)
}

// Span close events report the time spent in each step.
#[instrument(level = "info", skip_all, fields(leaves = names.len()))]
fn run(names: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let tree = balanced(names, true)?;

    let matrix = compile_policy(&tree);
    info!(
        rows = matrix.row_number(),
        columns = matrix.column_number(),
        "compiled"
    );

    let held: HashSet<Attribute<Fr>> = names.iter().map(|n| Attribute::from_name(n)).collect();
    let reconstruction = evaluate_policy(&matrix, &held)?;
    info!(
        satisfied = reconstruction.is_some(),
        used_rows = reconstruction.as_ref().map(|r| r.rows().len()).unwrap_or_default(),
        "evaluated with every attribute"
    );

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .init();

    let names: Vec<String> = (0..LEAVES).map(|i| format!("attr-{i}")).collect();
    for size in [16, 64, LEAVES] {
        run(&names[..size])?;
    }
    Ok(())
}
