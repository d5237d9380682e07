//! @ai:module:intent Parse a single source file into a code sample
//! @ai:module:layer application
//! @ai:module:public_api parse_file, CodeSample, Complexity
//! @ai:module:depends_on language, functionality, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::functionality::{detect_functionality, Functionality};
use crate::language::{detect_language, is_supported_file, Language};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Coarse size/branching bucket of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

/// @ai:intent A parsed source file ready for evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSample {
    pub path: PathBuf,
    pub content: String,
    pub language: Option<Language>,
    pub functionality: Functionality,
    pub complexity: Complexity,
    pub line_count: usize,
}

impl CodeSample {
    /// @ai:intent Language name, or "unknown" when undetected
    /// @ai:effects pure
    pub fn language_name(&self) -> String {
        crate::language::language_name(self.language)
    }
}

/// @ai:intent Parse a source file into a code sample
/// @ai:pre path points at a file with a supported extension
/// @ai:post Ok(None) when the file is empty or whitespace-only
/// @ai:effects fs:read
pub fn parse_file(path: &Path) -> Result<Option<CodeSample>> {
    // Extension is checked before existence so callers get the more specific error.
    if !is_supported_file(path) {
        let extension = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        return Err(Error::UnsupportedFileType {
            path: path.to_path_buf(),
            extension,
        });
    }

    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let content = read_lossy(path)?;

    if content.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(CodeSample {
        path: path.to_path_buf(),
        language: detect_language(path, &content),
        functionality: detect_functionality(path, &content),
        complexity: assess_complexity(&content),
        line_count: count_code_lines(&content),
        content,
    }))
}

/// @ai:intent Read a file as UTF-8, replacing invalid sequences
/// @ai:effects fs:read
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// @ai:intent Count non-blank lines
/// @ai:effects pure
fn count_code_lines(content: &str) -> usize {
    content.lines().filter(|l| !l.trim().is_empty()).count()
}

/// @ai:intent Bucket content by non-blank line count and definition count
/// @ai:effects pure
pub fn assess_complexity(content: &str) -> Complexity {
    let lines = count_code_lines(content);
    let definitions = content.matches("def ").count()
        + content.matches("function ").count()
        + content.matches("class ").count();

    if lines <= 50 && definitions <= 5 {
        Complexity::Simple
    } else if lines <= 200 && definitions <= 15 {
        Complexity::Moderate
    } else {
        Complexity::Complex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_python_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.py");
        std::fs::write(&path, "def main():\n    return 1\n").unwrap();

        let sample = parse_file(&path).unwrap().unwrap();
        assert_eq!(sample.language, Some(Language::Python));
        assert_eq!(sample.line_count, 2);
        assert_eq!(sample.complexity, Complexity::Simple);
    }

    #[test]
    fn test_empty_file_yields_none() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.js");
        std::fs::write(&path, "   \n\n").unwrap();

        assert!(parse_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = parse_file(Path::new("/definitely/not/here.py")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_unsupported_extension_checked_first() {
        let err = parse_file(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedFileType { ref extension, .. } if extension == ".png"
        ));
    }
}
