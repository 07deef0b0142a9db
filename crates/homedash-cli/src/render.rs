// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use homedash_app::{AggregateSummary, Tabular, format_rupees};
use serde_json::Value;
use std::io::{self, Write};

const COLUMN_GAP: &str = "  ";

/// Writes `rows` as an aligned text table, or `empty` when there are none.
pub fn table<R: Tabular>(out: &mut dyn Write, rows: &[&R], empty: &str) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "{empty}");
    }
    let cells: Vec<Vec<String>> = rows.iter().map(|row| row.cells()).collect();
    grid(out, R::COLUMNS, &cells)
}

pub fn grid(out: &mut dyn Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|header| width(header)).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = (*slot).max(width(cell));
            }
        }
    }

    let header: Vec<String> = headers.iter().map(|header| (*header).to_owned()).collect();
    line(out, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    line(out, &rule, &widths)?;
    for row in rows {
        line(out, row, &widths)?;
    }
    Ok(())
}

/// Writes summary fields one per line, names padded to a common width.
pub fn summary(out: &mut dyn Write, summary: &AggregateSummary) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(out, "No data for this period.");
    }
    let name_width = summary.iter().map(|(name, _)| width(name)).max().unwrap_or(0);
    for (name, value) in summary.iter() {
        writeln!(out, "{name:<name_width$}{COLUMN_GAP}{}", scalar(value))?;
    }
    Ok(())
}

pub fn rupees_line(out: &mut dyn Write, label: &str, amount: f64) -> io::Result<()> {
    writeln!(out, "{label}: {}", format_rupees(amount))
}

fn line(out: &mut dyn Write, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let mut rendered = String::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            rendered.push_str(COLUMN_GAP);
        }
        rendered.push_str(cell);
        let pad = widths.get(index).copied().unwrap_or(0).saturating_sub(width(cell));
        rendered.extend(std::iter::repeat_n(' ', pad));
    }
    writeln!(out, "{}", rendered.trim_end())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "N/A".to_owned(),
        other => other.to_string(),
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::{grid, summary, table};
    use anyhow::Result;
    use homedash_app::{AggregateSummary, Customer};
    use serde_json::{Map, json};

    fn render(write: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> Result<String> {
        let mut out = Vec::new();
        write(&mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn grid_aligns_columns_by_char_width() -> Result<()> {
        let rows = vec![
            vec!["S1".to_owned(), "₹1,499".to_owned()],
            vec!["S10".to_owned(), "₹12,999".to_owned()],
        ];
        let text = render(|out| grid(out, &["Id", "Price"], &rows))?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Id   Price");
        assert_eq!(lines[1], "---  -------");
        assert_eq!(lines[2], "S1   ₹1,499");
        assert_eq!(lines[3], "S10  ₹12,999");
        Ok(())
    }

    #[test]
    fn empty_table_prints_placeholder() -> Result<()> {
        let rows: Vec<&Customer> = Vec::new();
        let text = render(|out| table(out, &rows, "No customers found."))?;
        assert_eq!(text, "No customers found.\n");
        Ok(())
    }

    #[test]
    fn summary_pads_names() -> Result<()> {
        let mut fields = Map::new();
        fields.insert("totalBookings".to_owned(), json!(42));
        fields.insert("period".to_owned(), json!("all-time"));
        let text = render(|out| summary(out, &AggregateSummary::new(fields)))?;
        assert!(text.contains("totalBookings  42"));
        assert!(text.contains("period         all-time"));
        Ok(())
    }
}
