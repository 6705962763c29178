//! `fleetgate info` — build metadata.

use fleetgate_version::BuildInfo;

pub fn run(format: &str) -> anyhow::Result<()> {
    let info = BuildInfo::from_build_env()?;
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{info}");
    }
    Ok(())
}
