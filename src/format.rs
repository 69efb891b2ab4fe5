//! Rendering of reports. Values and row order pass through untouched.

use crate::analysis::Report;
use crate::error::Result;
use polars::prelude::*;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Boxed ASCII table under a title line
    #[default]
    Table,
    Csv,
    /// One `column: value` line per field, rows separated by banners
    Vertical,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "t" => Some(Self::Table),
            "csv" | "c" => Some(Self::Csv),
            "vertical" | "v" => Some(Self::Vertical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    format: OutputFormat,
    max_rows: Option<usize>,
}

impl ReportFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            max_rows: None,
        }
    }

    pub fn with_max_rows(mut self, max: usize) -> Self {
        self.max_rows = Some(max);
        self
    }

    pub fn print(&self, report: &Report) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        self.write(&mut stdout, report)
    }

    pub fn write<W: Write>(&self, writer: &mut W, report: &Report) -> Result<()> {
        let rows = self.rows(&report.frame)?;
        let header: Vec<&str> = report
            .frame
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect();

        match self.format {
            OutputFormat::Table => {
                writeln!(
                    writer,
                    "{}. {}: {}",
                    report.analysis.number(),
                    report.analysis.slug(),
                    report.analysis.description()
                )?;
                write_table(writer, &header, &rows)?;
                let hidden = report.frame.height() - rows.len();
                if hidden > 0 {
                    writeln!(writer, "... ({hidden} more rows)")?;
                }
                writeln!(writer)?;
            }
            OutputFormat::Csv => {
                let mut frame = match self.max_rows {
                    Some(max) => report.frame.head(Some(max)),
                    None => report.frame.clone(),
                };
                CsvWriter::new(&mut *writer)
                    .include_header(true)
                    .finish(&mut frame)?;
            }
            OutputFormat::Vertical => {
                let width = header.iter().map(|h| h.len()).max().unwrap_or(0);
                for (i, row) in rows.iter().enumerate() {
                    writeln!(writer, "*************************** {} ***************************", i + 1)?;
                    for (name, value) in header.iter().zip(row) {
                        writeln!(writer, "{name:>width$}: {value}")?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn format_to_string(&self, report: &Report) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(&mut buffer, report)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn rows(&self, frame: &DataFrame) -> Result<Vec<Vec<String>>> {
        let n = self
            .max_rows
            .map_or(frame.height(), |max| max.min(frame.height()));
        let columns = frame.get_columns();
        (0..n)
            .map(|i| -> Result<Vec<String>> {
                columns
                    .iter()
                    .map(|c| -> Result<String> { Ok(display_value(c.get(i)?)) })
                    .collect()
            })
            .collect()
    }
}

fn display_value(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(f) => f.to_string(),
        other => other.to_string(),
    }
}

fn write_table<W: Write>(writer: &mut W, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");

    writeln!(writer, "+{border}+")?;
    writeln!(writer, "{}", table_line(header.iter().copied(), &widths))?;
    writeln!(writer, "+{border}+")?;
    for row in rows {
        writeln!(writer, "{}", table_line(row.iter().map(String::as_str), &widths))?;
    }
    writeln!(writer, "+{border}+")?;
    Ok(())
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| format!(" {c}{} ", " ".repeat(w - c.chars().count())))
        .collect();
    format!("|{}|", padded.join("|"))
}

#[cfg(test)]
mod test_format {
    use super::*;
    use crate::analysis::Analysis;

    fn report() -> Result<Report> {
        Ok(Report {
            analysis: Analysis::Seasonality,
            frame: df!(
                "month" => ["July", "May, late"],
                "title_count" => [12u32, 3]
            )?,
        })
    }

    #[test]
    fn test_table() -> Result<()> {
        let out = ReportFormatter::new(OutputFormat::Table).format_to_string(&report()?)?;
        let expected = "\
6. seasonality: Titles added per calendar month
+-----------+-------------+
| month     | title_count |
+-----------+-------------+
| July      | 12          |
| May, late | 3           |
+-----------+-------------+

";
        assert_eq!(out, expected);
        Ok(())
    }

    #[test]
    fn test_table_max_rows() -> Result<()> {
        let out = ReportFormatter::new(OutputFormat::Table)
            .with_max_rows(1)
            .format_to_string(&report()?)?;
        assert!(out.contains("| July  | 12          |"));
        assert!(out.contains("... (1 more rows)"));
        Ok(())
    }

    #[test]
    fn test_csv() -> Result<()> {
        let out = ReportFormatter::new(OutputFormat::Csv).format_to_string(&report()?)?;
        assert_eq!(out, "month,title_count\nJuly,12\n\"May, late\",3\n");
        Ok(())
    }

    #[test]
    fn test_csv_quoting() -> Result<()> {
        let report = Report {
            analysis: Analysis::TitleLength,
            frame: df!(
                "title" => ["Say \"Hi\"", "Line\rBreak"],
                "length" => [8u32, 10]
            )?,
        };
        let out = ReportFormatter::new(OutputFormat::Csv)
            .with_max_rows(1)
            .format_to_string(&report)?;
        assert_eq!(out, "title,length\n\"Say \"\"Hi\"\"\",8\n");

        let out = ReportFormatter::new(OutputFormat::Csv).format_to_string(&report)?;
        assert!(out.ends_with("\"Line\rBreak\",10\n"));
        Ok(())
    }

    #[test]
    fn test_vertical() -> Result<()> {
        let out = ReportFormatter::new(OutputFormat::Vertical).format_to_string(&report()?)?;
        assert!(out.starts_with("*************************** 1 ***"));
        assert!(out.contains("      month: July\ntitle_count: 12\n"));
        Ok(())
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("v"), Some(OutputFormat::Vertical));
        assert_eq!(OutputFormat::parse("json"), None);
    }
}
