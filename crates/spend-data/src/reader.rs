//! CSV loading for transaction exports.
//!
//! Reads the file into an untyped [`RawTable`]; shape and field checks are
//! left to the normalizer so that every input goes through the same rules.

use std::io::Read;
use std::path::Path;

use spend_core::error::{Result, SpendError};
use spend_core::models::{ExpenseRecord, RawTable};
use tracing::{debug, info};

use crate::normalizer::normalize;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read a CSV file (first line is the header) into a [`RawTable`].
pub fn read_table(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).map_err(|source| SpendError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_table_from(file)?;
    debug!(
        "Read {} rows with {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Read CSV text from any reader into a [`RawTable`].
///
/// Rows may have differing lengths here; the normalizer rejects them.
pub fn read_table_from<R: Read>(input: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Load and normalize an export in one step.
pub fn load_expenses(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let table = read_table(path)?;
    let records = normalize(&table)?;
    info!(
        "Loaded {} expense records from {} ({} raw rows)",
        records.len(),
        path.display(),
        table.rows.len()
    );
    Ok(records)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
