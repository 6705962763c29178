//! `fleetgate cursor` — percentage to rollout cursor.

use fleetgate_version::{percentage_to_cursor, percentage_to_cursor_legacy};

pub fn run(percent: f64, legacy: bool) -> anyhow::Result<()> {
    let cursor = if legacy {
        anyhow::ensure!(
            percent.fract() == 0.0,
            "the legacy mapping takes whole percentages"
        );
        percentage_to_cursor_legacy(percent as u64)
    } else {
        percentage_to_cursor(percent)
    };
    // The zero cursor prints as the empty string, its wire form.
    println!("{}", cursor.encode());
    Ok(())
}
