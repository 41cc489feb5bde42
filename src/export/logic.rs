use crate::core::ledger::LedgerService;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, OverviewExport};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export the twelve-month overview of `year` to `file`.
    ///
    /// `file` must be an absolute path; an existing file is only replaced
    /// with `force` or after confirmation.
    pub fn export_overview(
        ledger: &mut LedgerService,
        year: i32,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let rows: Vec<OverviewExport> = ledger
            .overview(year)?
            .iter()
            .map(OverviewExport::from)
            .collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path),
            ExportFormat::Json => export_json(&rows, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::models::period::Period;

    fn tmp(name: &str) -> String {
        let mut p = std::env::temp_dir();
        p.push(format!("{name}_hourledger_export"));
        let s = p.to_string_lossy().to_string();
        std::fs::remove_file(&s).ok();
        s
    }

    #[test]
    fn csv_has_header_and_twelve_rows() {
        let mut ledger = LedgerService::new(DbPool::in_memory().unwrap());
        ledger
            .set_allocation(Period::new(2025, 1).unwrap(), 40.0)
            .unwrap();

        let out = tmp("unit_csv");
        ExportLogic::export_overview(&mut ledger, 2025, ExportFormat::Csv, &out, true).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("period,year,month,available_hours"));
        assert!(lines[1].starts_with("2025-01,2025,1,40"));
    }

    #[test]
    fn relative_path_is_rejected() {
        let mut ledger = LedgerService::new(DbPool::in_memory().unwrap());
        let err = ExportLogic::export_overview(
            &mut ledger,
            2025,
            ExportFormat::Json,
            "relative.json",
            true,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }
}
