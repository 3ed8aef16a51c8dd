use chrono::NaiveDate;

use crate::{ClientError, ClientResult};

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Command-line dates are strict `YYYY-MM-DD`; the lenient layouts are only
/// for source data.
pub(crate) fn parse_iso_date_strict(
    value: &str,
    field_name: &str,
    command: &str,
) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field_name: &str,
    command: &str,
) -> ClientResult<Option<NaiveDate>> {
    value
        .map(|raw| parse_iso_date_strict(raw, field_name, command))
        .transpose()
}

fn looks_like_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    [0usize, 1, 2, 3, 5, 6, 8, 9]
        .iter()
        .all(|index| bytes[*index].is_ascii_digit())
}
