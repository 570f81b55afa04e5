use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::fmt;

use lsss::{Attribute, BackendConfig, FieldElement, Fr, compile, parse_policy};

const POLICY: &str = "(doctor and (cardiology or radiology)) or (auditor and \"level 3\")";

fn held(names: &[&str]) -> HashSet<Attribute<Fr>> {
    names.iter().map(|n| Attribute::from_name(n)).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set to DEBUG to see compiler and solver spans, or TRACE for pivot decisions
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let backend = BackendConfig::active();
    backend.ensure_supported()?;
    info!(backend = ?backend.backend, curve = ?backend.curve, "using scalar field backend");

    let mut rng = StdRng::seed_from_u64(42);

    let tree = parse_policy::<Fr>(POLICY)?;
    let matrix = compile(&tree);
    info!(
        policy = POLICY,
        rows = matrix.row_number(),
        columns = matrix.column_number(),
        "compiled policy"
    );

    let secret = Fr::random(&mut rng);
    let shares = matrix.share_secret(secret, &mut rng);

    let requesters: [(&str, &[&str]); 4] = [
        ("cardiologist", &["doctor", "cardiology"]),
        ("auditor", &["auditor", "level 3"]),
        ("nurse", &["nurse", "cardiology"]),
        ("junior auditor", &["auditor", "level 2"]),
    ];

    for (who, attributes) in requesters {
        match matrix.evaluate(&held(attributes))? {
            Some(reconstruction) => {
                let recovered = reconstruction.combine(&shares)?;
                info!(
                    requester = who,
                    rows = ?reconstruction.rows(),
                    recovered = (recovered == secret),
                    "access granted"
                );
            }
            None => info!(requester = who, "access denied"),
        }
    }

    Ok(())
}
