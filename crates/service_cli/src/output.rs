//! Rendering of sequence reports.
//!
//! Table and CSV output show values rounded to the configured precision;
//! JSON carries the unrounded values along with run metadata.

use std::io::Write;

use randlab_core::engine::SequenceReport;
use randlab_core::generator::Algorithm;
use randlab_core::sampler::DistributionKind;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

#[derive(Serialize)]
struct JsonReport<'a> {
    algorithm: Algorithm,
    distribution: Option<DistributionKind>,
    seed: Option<u64>,
    count: usize,
    values: &'a [f64],
    #[serde(skip_serializing_if = "Option::is_none")]
    uniforms: Option<&'a [f64]>,
}

/// Write `report` to `out` in `format`.
///
/// With `show_uniforms`, the raw uniforms are included next to the values
/// (only while both sequences have the same length in table and CSV output).
pub fn render<W: Write>(
    report: &SequenceReport,
    format: OutputFormat,
    precision: u32,
    show_uniforms: bool,
    out: &mut W,
) -> Result<()> {
    let uniforms = show_uniforms.then_some(report.uniforms.as_slice());
    match format {
        OutputFormat::Table => render_table(report, precision, uniforms, out),
        OutputFormat::Csv => render_csv(report, precision, uniforms, out),
        OutputFormat::Json => {
            let json = JsonReport {
                algorithm: report.algorithm,
                distribution: report.distribution,
                seed: report.seed,
                count: report.values.len(),
                values: &report.values,
                uniforms,
            };
            serde_json::to_writer_pretty(&mut *out, &json)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Uniform column to print, if it lines up row for row with the values.
fn aligned<'a>(report: &SequenceReport, uniforms: Option<&'a [f64]>) -> Option<&'a [f64]> {
    uniforms.filter(|u| u.len() == report.values.len())
}

fn render_table<W: Write>(
    report: &SequenceReport,
    precision: u32,
    uniforms: Option<&[f64]>,
    out: &mut W,
) -> Result<()> {
    let uniforms = aligned(report, uniforms);
    let precision = precision as usize;
    let width = (precision + 8).max(10);
    let rule = "─".repeat(width + 2);
    let index_rule = "─".repeat(8);

    let rows: Vec<String> = report
        .rounded(precision as u32)
        .into_iter()
        .enumerate()
        .map(|(i, v)| match uniforms {
            Some(u) => format!(
                "│ {:>6} │ {:>width$.precision$} │ {:>width$.precision$} │",
                i,
                u[i],
                v,
                width = width,
                precision = precision
            ),
            None => format!(
                "│ {:>6} │ {:>width$.precision$} │",
                i,
                v,
                width = width,
                precision = precision
            ),
        })
        .collect();

    match uniforms {
        Some(_) => {
            writeln!(out, "┌{}┬{}┬{}┐", index_rule, rule, rule)?;
            writeln!(
                out,
                "│ {:>6} │ {:>width$} │ {:>width$} │",
                "Index",
                "Uniform",
                "Value",
                width = width
            )?;
            writeln!(out, "├{}┼{}┼{}┤", index_rule, rule, rule)?;
        }
        None => {
            writeln!(out, "┌{}┬{}┐", index_rule, rule)?;
            writeln!(out, "│ {:>6} │ {:>width$} │", "Index", "Value", width = width)?;
            writeln!(out, "├{}┼{}┤", index_rule, rule)?;
        }
    }
    for row in rows {
        writeln!(out, "{}", row)?;
    }
    match uniforms {
        Some(_) => writeln!(out, "└{}┴{}┴{}┘", index_rule, rule, rule)?,
        None => writeln!(out, "└{}┴{}┘", index_rule, rule)?,
    }
    Ok(())
}

fn render_csv<W: Write>(
    report: &SequenceReport,
    precision: u32,
    uniforms: Option<&[f64]>,
    out: &mut W,
) -> Result<()> {
    let uniforms = aligned(report, uniforms);
    let mut writer = csv::Writer::from_writer(out);

    match uniforms {
        Some(_) => writer.write_record(["index", "uniform", "value"])?,
        None => writer.write_record(["index", "value"])?,
    }
    for (i, value) in report.rounded(precision).into_iter().enumerate() {
        let index = i.to_string();
        let value = value.to_string();
        match uniforms {
            Some(u) => writer.write_record([index, u[i].to_string(), value])?,
            None => writer.write_record([index, value])?,
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SequenceReport {
        SequenceReport {
            algorithm: Algorithm::MiddleSquare,
            distribution: Some(DistributionKind::Uniform),
            seed: None,
            uniforms: vec![0.5227, 0.3215],
            values: vec![5.227, 3.215_049],
        }
    }

    fn rendered(format: OutputFormat, show_uniforms: bool) -> String {
        let mut buffer = Vec::new();
        render(&report(), format, 4, show_uniforms, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_table_output() {
        let table = rendered(OutputFormat::Table, false);
        assert!(table.contains("Index"));
        assert!(table.contains("5.2270"));
        assert!(table.contains("3.2150"));
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn test_table_with_uniforms() {
        let table = rendered(OutputFormat::Table, true);
        assert!(table.contains("Uniform"));
        assert!(table.contains("0.5227"));
    }

    #[test]
    fn test_csv_output() {
        let csv = rendered(OutputFormat::Csv, false);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["index,value", "0,5.227", "1,3.215"]);

        let csv = rendered(OutputFormat::Csv, true);
        assert_eq!(csv.lines().next(), Some("index,uniform,value"));
    }

    #[test]
    fn test_json_output() {
        let json: serde_json::Value =
            serde_json::from_str(&rendered(OutputFormat::Json, false)).unwrap();
        assert_eq!(json["algorithm"], "middle-square");
        assert_eq!(json["distribution"], "uniform");
        assert_eq!(json["count"], 2);
        assert_eq!(json["values"][1], 3.215_049);
        assert!(json.get("uniforms").is_none());
    }
}
