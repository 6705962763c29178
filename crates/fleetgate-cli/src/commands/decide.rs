//! `fleetgate decide` — evaluate a requirement document.

use std::fs;
use std::path::Path;

use fleetgate_version::{Decision, NodeId, Requirement, SemVer, evaluate};
use tracing::debug;

pub fn run(current: &str, identity: &str, requirement: &Path, format: &str) -> anyhow::Result<()> {
    let current = SemVer::parse(current)?;
    let node = load_identity(identity)?;

    let raw = fs::read_to_string(requirement)?;
    let requirement: Requirement = serde_json::from_str(&raw)?;
    debug!(
        minimum = %requirement.minimum.version,
        suggested = %requirement.suggested.version,
        "loaded requirement document"
    );

    let evaluation = evaluate(&current, &node, &requirement)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    match &evaluation.decision {
        Decision::NoUpdate => println!("decision: no update"),
        Decision::ShouldUpdate(release) => {
            println!("decision: should update");
            println!("target:   {} ({})", release.version, release.url);
        }
        Decision::MustUpdate(release) => {
            println!("decision: MUST update");
            println!("target:   {} ({})", release.version, release.url);
        }
    }
    println!("reason:   {}", evaluation.reason);
    Ok(())
}

fn load_identity(arg: &str) -> anyhow::Result<NodeId> {
    let text = match arg.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)?,
        None => arg.to_string(),
    };
    Ok(NodeId::from_hex(&text)?)
}
