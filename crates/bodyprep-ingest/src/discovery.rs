//! Input discovery and format detection.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// File formats the extractor can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Comma-delimited text with a header row.
    Csv,
    /// Line-delimited JSON records or a whole JSON document.
    Json,
    /// XML with one element per record under the root.
    Xml,
}

impl SourceFormat {
    /// Detects the format from a path's extension, ignoring case.
    ///
    /// Returns `None` for unsupported or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expands a glob pattern into the matching paths.
///
/// Paths come back in the glob crate's sorted order. Directories and other
/// non-files are included; the caller decides what to do with them. An
/// empty result is not an error.
pub fn discover_sources(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|source| IngestError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| IngestError::Glob {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        paths.push(path);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a/people.csv")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("PEOPLE.JSON")),
            Some(SourceFormat::Json)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("people.Xml")),
            Some(SourceFormat::Xml)
        );
        assert_eq!(SourceFormat::from_path(Path::new("notes.txt")), None);
        assert_eq!(SourceFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_discover_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.json", "a.csv", "c.xml"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let pattern = format!("{}/*", dir.path().display());
        let found = discover_sources(&pattern).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.csv", "b.json", "c.xml"]);
    }

    #[test]
    fn test_discover_no_matches() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.csv", dir.path().display());
        assert!(discover_sources(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let result = discover_sources("data/[");
        assert!(matches!(result, Err(IngestError::Pattern { .. })));
    }
}
