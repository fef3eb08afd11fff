//! Export adapter: hands a finished SVG document to the outside world.

use crate::error::Result;
use base64::Engine as _;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_STEM: &str = "snowflake";

/// `<fragment>.svg`, or `snowflake.svg` when there is no fragment
pub fn file_name(fragment: &str) -> String {
    let stem = fragment.strip_prefix('#').unwrap_or(fragment);
    if stem.is_empty() {
        return format!("{DEFAULT_STEM}.svg");
    }
    let stem: String = stem
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}.svg")
}

/// Write `document` into `dir` and return the file's path
pub fn export(document: &str, fragment: &str, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(fragment));
    fs::write(&path, document)?;
    tracing::info!(path = %path.display(), bytes = document.len(), "exported snowflake");
    Ok(path)
}

pub fn data_uri(document: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(document)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_fragment() {
        assert_eq!(file_name("100:50,200:75"), "100:50,200:75.svg");
        assert_eq!(file_name("#100:50"), "100:50.svg");
    }

    #[test]
    fn file_name_falls_back() {
        assert_eq!(file_name(""), "snowflake.svg");
        assert_eq!(file_name("#"), "snowflake.svg");
    }

    #[test]
    fn file_name_stays_in_directory() {
        assert_eq!(file_name("../x"), ".._x.svg");
    }

    #[test]
    fn export_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = export("<svg/>", "1:2", &dir.path().join("out")).unwrap();
        assert_eq!(path.file_name().unwrap(), "1:2.svg");
        assert_eq!(fs::read_to_string(path).unwrap(), "<svg/>");
    }

    #[test]
    fn data_uri_is_base64() {
        assert_eq!(data_uri("<svg/>"), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
