//! JSON export of the dashboard data products.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use spend_core::error::Result;
use spend_core::models::ExpenseRecord;
use spend_data::dashboard::{build_dashboard, DashboardQuery};
use tracing::info;

/// Serialise everything the dashboard would draw for `query` as pretty JSON.
pub fn render_json(records: &[ExpenseRecord], query: &DashboardQuery) -> Result<String> {
    let data = build_dashboard(records, query)?;
    Ok(serde_json::to_string_pretty(&data)?)
}

/// Write the JSON export to `output`, or stdout when absent.
pub fn export_json(
    records: &[ExpenseRecord],
    query: &DashboardQuery,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let json = render_json(records, query)?;

    match output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = json.len(), "dashboard exported");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
