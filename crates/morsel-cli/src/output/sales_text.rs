use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, count_field, format_amount, text_field};

pub fn render_sales(data: &Value) -> io::Result<String> {
    let chart = data
        .get("chart")
        .ok_or_else(|| io::Error::other("sales output requires chart"))?;

    let mut lines = vec![text_field(chart, "title").to_string(), String::new()];

    let mut entries = vec![
        ("Region:", text_field(data, "region_label").to_string()),
        ("Source:", text_field(data, "input").to_string()),
    ];
    if let Some(from) = data.get("from").and_then(Value::as_str) {
        entries.push(("From:", from.to_string()));
    }
    if let Some(to) = data.get("to").and_then(Value::as_str) {
        entries.push(("To:", to.to_string()));
    }
    lines.extend(format::key_value_rows(&entries, 2));

    if let Some(placeholder) = chart.get("placeholder").and_then(Value::as_str) {
        lines.push(String::new());
        lines.push(format!("  {placeholder}"));
        lines.push(String::new());
        lines.push("Run `morsel regions` to see which regions have data.".to_string());
        return Ok(lines.join("\n"));
    }

    let points = data
        .get("points")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let columns = [
        Column {
            name: text_field(chart, "x_axis_label"),
            align: Align::Left,
        },
        Column {
            name: text_field(chart, "y_axis_label"),
            align: Align::Right,
        },
        Column {
            name: "Rows",
            align: Align::Right,
        },
    ];
    let rows = points
        .iter()
        .map(|point| {
            vec![
                text_field(point, "date").to_string(),
                format_amount(point.get("sales").and_then(Value::as_f64)),
                count_field(point, "rows").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    lines.push(String::new());
    lines.extend(format::render_table(&columns, &rows, format::terminal_width()));
    lines.push(String::new());

    let marker = chart.get("marker").cloned().unwrap_or(Value::Null);
    lines.extend(format::key_value_rows(
        &[
            ("Days:", points.len().to_string()),
            (
                "Total sales:",
                format_amount(data.get("total_sales").and_then(Value::as_f64)),
            ),
            (
                "Marker:",
                format!(
                    "{} ({})",
                    text_field(&marker, "date"),
                    text_field(&marker, "label")
                ),
            ),
        ],
        2,
    ));

    Ok(lines.join("\n"))
}
