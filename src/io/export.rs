use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::{ExportRow, Exporter};

const NAME_WIDTH: usize = 30;
const RULE_WIDTH: usize = 58;

/// Serialized shape of a sales report.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport<'a> {
    pub rows: Vec<SalesLine<'a>>,
    pub total_count: &'a str,
    pub total_value: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesLine<'a> {
    pub full_name: &'a str,
    pub sales_number: &'a str,
    pub sales_value: &'a str,
}

/// Plain-text table for terminals.
pub struct ConsoleExporter<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for ConsoleExporter<W> {
    fn export(&mut self, rows: &[ExportRow], total_count: &str, total_value: &str) -> Result<()> {
        let out = &mut self.writer;
        writeln!(out, "Sales Report")?;
        writeln!(out)?;
        writeln!(
            out,
            "{:<width$} {:>12} {:>14}",
            "NAME",
            "SALES",
            "VALUE",
            width = NAME_WIDTH
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for (full_name, sales_number, sales_value) in rows {
            writeln!(
                out,
                "{:<width$} {:>12} {:>14}",
                truncate(full_name, NAME_WIDTH),
                sales_number,
                sales_value,
                width = NAME_WIDTH
            )?;
        }

        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(
            out,
            "{:<width$} {:>12} {:>14}",
            "TOTAL",
            total_count,
            total_value,
            width = NAME_WIDTH
        )?;
        out.flush().context("Failed to flush report output")?;
        Ok(())
    }
}

/// CSV with a header and a trailing TOTAL record.
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvExporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))
    }
}

impl<W: Write> Exporter for CsvExporter<W> {
    fn export(&mut self, rows: &[ExportRow], total_count: &str, total_value: &str) -> Result<()> {
        self.writer
            .write_record(["full_name", "sales_number", "sales_value"])?;

        for (full_name, sales_number, sales_value) in rows {
            self.writer
                .write_record([full_name, sales_number, sales_value])?;
        }

        self.writer
            .write_record(["TOTAL", total_count, total_value])?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON document.
pub struct JsonExporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonExporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for JsonExporter<W> {
    fn export(&mut self, rows: &[ExportRow], total_count: &str, total_value: &str) -> Result<()> {
        let report = SalesReport {
            rows: rows
                .iter()
                .map(|(full_name, sales_number, sales_value)| SalesLine {
                    full_name,
                    sales_number,
                    sales_value,
                })
                .collect(),
            total_count,
            total_value,
        };

        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
