use crate::core::recalc::RecalcLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_players;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{BalanceExport, ExportRow, LedgerEntryExport};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportTarget};
use crate::ui::messages::warning;
use std::collections::HashMap;
use std::path::Path;

/// High-level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export balances or the full ledger.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute path of the output file
    /// - `target`: balances (stored values) or ledger (every adjustment,
    ///   derived from the history at export time)
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        target: ExportTarget,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let players = load_players(&pool.conn)?;

        match target {
            ExportTarget::Balances => {
                let rows: Vec<BalanceExport> = players.iter().map(BalanceExport::from).collect();
                write_rows(format, &rows, path, "Balances")
            }
            ExportTarget::Ledger => {
                let names: HashMap<i64, &str> =
                    players.iter().map(|p| (p.id, p.name.as_str())).collect();
                let derived = RecalcLogic::preview(&pool.conn)?;

                let rows: Vec<LedgerEntryExport> = derived
                    .adjustments
                    .iter()
                    .map(|a| {
                        let name = names.get(&a.player_id).copied().unwrap_or("?");
                        LedgerEntryExport::new(a, name)
                    })
                    .collect();
                write_rows(format, &rows, path, "Ledger")
            }
        }
    }
}

fn write_rows<R: ExportRow>(
    format: ExportFormat,
    rows: &[R],
    path: &Path,
    sheet: &str,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning("Nothing to export.");
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, path, sheet)?,
    }

    tracing::debug!(format = format.as_str(), rows = rows.len(), "export written");
    Ok(rows.len())
}
