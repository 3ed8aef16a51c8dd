use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, warn};

use crate::{ClientError, ClientResult};

/// Files in `data_dir` whose name matches `pattern`, in lexicographic order.
pub fn locate_files(data_dir: &Path, pattern: &str) -> ClientResult<Vec<PathBuf>> {
    if pattern.trim().is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "File pattern must not be empty.",
            Some("prepare"),
        ));
    }

    let escaped_dir = Pattern::escape(&data_dir.to_string_lossy());
    let full_pattern = Path::new(&escaped_dir).join(pattern);
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let entries = glob::glob_with(&full_pattern.to_string_lossy(), options).map_err(|error| {
        ClientError::invalid_argument_for_command(
            &format!("Invalid file pattern `{pattern}`: {}", error.msg),
            Some("prepare"),
        )
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => debug!(path = %path.display(), "skipping non-file match"),
            Err(error) => warn!(path = %error.path().display(), %error, "unreadable match"),
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(ClientError::no_input_files(data_dir, pattern));
    }

    Ok(files)
}
