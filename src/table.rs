use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) => format!("{value:.2}"),
        }
    }

    fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl From<u16> for Cell {
    fn from(value: u16) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Int(value as i64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

/// Row with a fixed column order.
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

/// Plain-text rendering used by the report binary. Numeric columns are right aligned.
pub fn render_text<R: TableRow>(rows: &[R]) -> String {
    let body: Vec<Vec<Cell>> = rows.iter().map(TableRow::cells).collect();
    let mut widths: Vec<usize> = R::COLUMNS.iter().map(|h| h.chars().count()).collect();
    for row in &body {
        for (idx, cell) in row.iter().enumerate() {
            let len = cell.render().chars().count();
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(len);
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = R::COLUMNS
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{name:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    for row in &body {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                if cell.is_numeric() {
                    format!("{:>width$}", cell.render())
                } else {
                    format!("{:<width$}", cell.render())
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}
