use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, count_field, format_amount, text_field};

const MAX_LISTED_ISSUES: usize = 10;

pub fn render_prepare(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("prepare output requires summary"))?;
    let output = data
        .get("output")
        .ok_or_else(|| io::Error::other("prepare output requires output status"))?;

    let mut lines = vec![text_field(data, "message").to_string(), String::new()];

    lines.push("Summary:".to_string());
    let written = output
        .get("written")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let output_line = if written {
        text_field(output, "path").to_string()
    } else {
        format!("{} (not written)", text_field(output, "path"))
    };
    lines.extend(format::key_value_rows(
        &[
            ("Run ID:", text_field(data, "run_id").to_string()),
            (
                "Files loaded:",
                format!(
                    "{} of {}",
                    count_field(summary, "files_loaded"),
                    count_field(summary, "files_found")
                ),
            ),
            ("Rows read:", count_field(summary, "rows_read").to_string()),
            ("Rows matched:", count_field(summary, "rows_matched").to_string()),
            ("Rows kept:", count_field(summary, "rows_kept").to_string()),
            ("Rows skipped:", count_field(summary, "rows_skipped").to_string()),
            (
                "Quantity missing:",
                count_field(summary, "quantity_missing").to_string(),
            ),
            ("Output:", output_line),
        ],
        2,
    ));

    let warnings = array_field(data, "warnings");
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        for warning in warnings {
            lines.push(format!("  - {}", text_field(warning, "message")));
        }
    }

    let issues = array_field(data, "issues");
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Skipped rows:".to_string());
        lines.extend(render_issues(issues));
    }

    let preview = array_field(data, "preview");
    if !preview.is_empty() {
        lines.push(String::new());
        lines.push(format!("Preview (first {} rows):", preview.len()));
        lines.extend(render_preview(preview));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    lines.push("  morsel regions".to_string());
    lines.push("  morsel sales --region all".to_string());

    Ok(lines.join("\n"))
}

fn array_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn render_issues(issues: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "File",
            align: Align::Left,
        },
        Column {
            name: "Line",
            align: Align::Right,
        },
        Column {
            name: "Field",
            align: Align::Left,
        },
        Column {
            name: "Problem",
            align: Align::Left,
        },
    ];
    let rows = issues
        .iter()
        .take(MAX_LISTED_ISSUES)
        .map(|issue| {
            vec![
                file_name(text_field(issue, "file")),
                count_field(issue, "line").to_string(),
                text_field(issue, "field").to_string(),
                text_field(issue, "description").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = format::render_table(&columns, &rows, format::terminal_width());
    if issues.len() > MAX_LISTED_ISSUES {
        lines.push(format!(
            "  ... and {} more (use --json for the full list)",
            issues.len() - MAX_LISTED_ISSUES
        ));
    }
    lines
}

fn render_preview(preview: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Sales",
            align: Align::Right,
        },
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Region",
            align: Align::Left,
        },
    ];
    let rows = preview
        .iter()
        .map(|record| {
            vec![
                format_amount(record.get("Sales").and_then(Value::as_f64)),
                text_field(record, "Date").to_string(),
                text_field(record, "Region").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    format::render_table(&columns, &rows, format::terminal_width())
}

fn file_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
