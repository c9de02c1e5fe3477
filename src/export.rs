use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::info;

use crate::scorers::ScorerRow;
use crate::standings::StandingsRow;
use crate::summary::SummaryRow;
use crate::table::{Cell, TableRow};

pub struct ExportReport {
    pub standings: usize,
    pub scorers: usize,
    pub summary: usize,
}

pub struct ReportTables<'a> {
    pub scope: &'a str,
    pub standings: &'a [StandingsRow],
    pub scorers: &'a [ScorerRow],
    pub summary: &'a [SummaryRow],
}

pub fn export_workbook(path: &Path, tables: &ReportTables<'_>) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let decimal = Format::new().set_num_format("0.00");

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Standings")?;
        write_table(sheet, tables.standings, &header, &decimal)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TopScorers")?;
        write_table(sheet, tables.scorers, &header, &decimal)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        write_table(sheet, tables.summary, &header, &decimal)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("About")?;
        sheet.write_string_with_format(0, 0, "Scope", &header)?;
        sheet.write_string(0, 1, tables.scope)?;
        sheet.write_string_with_format(1, 0, "Generated", &header)?;
        sheet.write_string(1, 1, Local::now().format("%Y-%m-%d %H:%M").to_string())?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    let report = ExportReport {
        standings: tables.standings.len(),
        scorers: tables.scorers.len(),
        summary: tables.summary.len(),
    };
    info!(
        path = %path.display(),
        standings = report.standings,
        scorers = report.scorers,
        summary = report.summary,
        "exported workbook"
    );
    Ok(report)
}

fn write_table<R: TableRow>(
    worksheet: &mut Worksheet,
    rows: &[R],
    header: &Format,
    decimal: &Format,
) -> Result<()> {
    for (col_idx, name) in R::COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, *name, header)
            .with_context(|| format!("write header {name}"))?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let row_idx = idx as u32 + 1;
        for (col_idx, cell) in row.cells().into_iter().enumerate() {
            let col_idx = col_idx as u16;
            let written = match cell {
                Cell::Text(value) => worksheet.write_string(row_idx, col_idx, value),
                Cell::Int(value) => worksheet.write_number(row_idx, col_idx, value as f64),
                Cell::Float(value) => {
                    worksheet.write_number_with_format(row_idx, col_idx, value, decimal)
                }
            };
            written.with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
