use morsel_client::ClientError;
use serde_json::Value;

use super::format;

const MAX_LISTED_DETAILS: usize = 10;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let details = render_details(error.data.as_ref());
    if !details.is_empty() {
        lines.push(String::new());
        lines.extend(details);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

/// Per-file failures and per-row issues attached to pipeline errors.
fn render_details(data: Option<&Value>) -> Vec<String> {
    let Some(data) = data else {
        return Vec::new();
    };
    let mut lines = Vec::new();

    if let Some(files) = data.get("files").and_then(Value::as_array) {
        lines.push("Files that could not be loaded:".to_string());
        for file in files.iter().take(MAX_LISTED_DETAILS) {
            lines.push(format!(
                "  {}: {}",
                format::text_field(file, "path"),
                format::text_field(file, "reason")
            ));
        }
    }

    if let Some(issues) = data.get("issues").and_then(Value::as_array) {
        lines.push("Rows that could not be parsed:".to_string());
        for issue in issues.iter().take(MAX_LISTED_DETAILS) {
            lines.push(format!(
                "  {} line {}: {}",
                format::text_field(issue, "file"),
                issue.get("line").and_then(Value::as_u64).unwrap_or(0),
                format::text_field(issue, "description")
            ));
        }
        if issues.len() > MAX_LISTED_DETAILS {
            lines.push(format!(
                "  ... and {} more (use --json for the full list)",
                issues.len() - MAX_LISTED_DETAILS
            ));
        }
    }

    lines
}
