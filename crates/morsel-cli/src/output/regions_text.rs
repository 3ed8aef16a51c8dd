use std::io;

use serde_json::Value;

use super::format::{self, Align, Column, text_field};

pub fn render_regions(data: &Value) -> io::Result<String> {
    let options = data
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("regions output requires options"))?;

    let columns = [
        Column {
            name: "Value",
            align: Align::Left,
        },
        Column {
            name: "Label",
            align: Align::Left,
        },
    ];
    let default = text_field(data, "default");
    let rows = options
        .iter()
        .map(|option| {
            let value = text_field(option, "value");
            let label = text_field(option, "label");
            let label = if value == default {
                format!("{label} (default)")
            } else {
                label.to_string()
            };
            vec![value.to_string(), label]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![
        format!("Regions in {}:", text_field(data, "input")),
        String::new(),
    ];
    lines.extend(format::render_table(&columns, &rows, format::terminal_width()));
    lines.push(String::new());
    lines.push("Run `morsel sales --region <value>` to see daily totals.".to_string());

    Ok(lines.join("\n"))
}
