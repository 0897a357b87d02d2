use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;

/// One token per non-blank line, surrounding whitespace removed.
pub fn parse_valid_strings(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

pub fn load_valid_strings(path: &Path) -> Result<Vec<String>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let strings = parse_valid_strings(&text);
    debug!(count = strings.len(), path = %path.display(), "valid strings loaded");
    Ok(strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_dropped() {
        let strings = parse_valid_strings("कर्ता\n\n  कर्म  \r\n\t\nहेतुः");
        assert_eq!(strings, vec!["कर्ता", "कर्म", "हेतुः"]);
    }
}
