//! @ai:module:intent Detect programming languages and supported file extensions
//! @ai:module:layer domain
//! @ai:module:public_api Language, detect_language, is_supported_file
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent A programming or markup language recognised by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    CSharp,
    Go,
    Rust,
    Swift,
    Kotlin,
    Php,
    Ruby,
    Cpp,
    C,
    Sql,
    Html,
    Css,
}

const ALL_LANGUAGES: [Language; 16] = [
    Language::Python,
    Language::JavaScript,
    Language::TypeScript,
    Language::Java,
    Language::CSharp,
    Language::Go,
    Language::Rust,
    Language::Swift,
    Language::Kotlin,
    Language::Php,
    Language::Ruby,
    Language::Cpp,
    Language::C,
    Language::Sql,
    Language::Html,
    Language::Css,
];

/// Extensions accepted by the parser, grouped by ecosystem.
const SUPPORTED_EXTENSIONS: &[&[&str]] = &[
    // web frontend
    &["js", "jsx", "ts", "tsx", "vue", "svelte", "html", "htm"],
    // web backend
    &["php", "rb", "py", "go", "java", "cs", "fs"],
    // mobile
    &["swift", "kt", "dart", "m", "mm"],
    // desktop
    &["cpp", "cc", "cxx", "c", "h", "hpp", "rs"],
    // data science
    &["r", "R", "ipynb", "sql", "scala", "jl"],
    // markup
    &["xml", "md", "rst", "tex"],
    // styles
    &["css", "scss", "sass", "less", "styl"],
    // config
    &["json", "yml", "yaml", "toml", "ini", "env", "config", "conf"],
    // build
    &["gradle", "maven", "cmake", "make", "dockerfile", "build"],
    // shell
    &["sh", "bash", "zsh", "fish", "ps1", "bat", "cmd"],
];

impl Language {
    /// @ai:intent Get file extensions for this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::Python => &["py"],
            Language::JavaScript => &["js", "jsx"],
            Language::TypeScript => &["ts", "tsx"],
            Language::Java => &["java"],
            Language::CSharp => &["cs"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::Swift => &["swift"],
            Language::Kotlin => &["kt"],
            Language::Php => &["php"],
            Language::Ruby => &["rb"],
            Language::Cpp => &["cpp", "cc", "cxx"],
            Language::C => &["c", "h"],
            Language::Sql => &["sql"],
            Language::Html => &["html", "htm"],
            Language::Css => &["css"],
        }
    }

    /// @ai:intent Keywords used for content-based detection
    /// @ai:effects pure
    fn keywords(&self) -> &[&str] {
        match self {
            Language::Python => &["def ", "class ", "import ", "from "],
            Language::JavaScript => &["function", "const ", "let ", "var "],
            Language::TypeScript => &["interface", "type ", "enum ", "export "],
            Language::Java => &["public class", "private ", "public ", "static "],
            Language::CSharp => &["using ", "namespace ", "public class", "private "],
            Language::Go => &["package ", "func ", "import ", "type "],
            Language::Rust => &["fn ", "pub ", "struct ", "impl "],
            Language::Swift => &["func ", "class ", "struct ", "import "],
            Language::Kotlin => &["fun ", "class ", "val ", "var "],
            Language::Php => &["<?php", "function ", "class ", "$"],
            Language::Ruby => &["def ", "class ", "module ", "require ", "puts "],
            Language::Cpp => &["#include", "class ", "namespace ", "using "],
            Language::C => &["#include", "int main", "void ", "struct "],
            Language::Sql => &["select", "from", "where", "insert"],
            Language::Html => &["<html", "<div", "<body", "<head"],
            Language::Css => &["@media", "font-family", "background", "border", "margin", "padding"],
        }
    }

    /// @ai:intent Get language name as string
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// @ai:intent Detect a language from the file extension alone
/// @ai:example ("app.py") -> Some(Python)
/// @ai:example ("notes.txt") -> None
/// @ai:effects pure
pub fn language_from_extension(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;

    ALL_LANGUAGES
        .into_iter()
        .find(|lang| lang.extensions().contains(&ext))
}

/// @ai:intent Detect the programming language of a file
/// @ai:pre content is the file's text
/// @ai:post extension match wins, then the language with the most keyword hits
/// @ai:effects pure
pub fn detect_language(path: &Path, content: &str) -> Option<Language> {
    if let Some(lang) = language_from_extension(path) {
        return Some(lang);
    }

    let content_lower = content.to_lowercase();
    let mut best: Option<(Language, usize)> = None;

    for lang in ALL_LANGUAGES {
        let score = lang
            .keywords()
            .iter()
            .filter(|kw| content_lower.contains(&kw.to_lowercase()))
            .count();

        if score > 0 && best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((lang, score));
        }
    }

    best.map(|(lang, _)| lang)
}

/// @ai:intent Name of a detected language, or "unknown"
/// @ai:effects pure
pub fn language_name(language: Option<Language>) -> String {
    language
        .map(|l| l.name().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// @ai:intent Check if an extension belongs to any supported family
/// @ai:effects pure
pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|family| family.contains(&ext))
}

/// @ai:intent Check if a file should be parsed based on its name
/// @ai:effects pure
pub fn is_supported_file(path: &Path) -> bool {
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    if matches!(file_name, "Dockerfile" | "Makefile") {
        return true;
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => is_supported_extension(ext),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_python_by_extension() {
        assert_eq!(
            detect_language(Path::new("app.py"), ""),
            Some(Language::Python)
        );
    }

    #[test]
    fn test_detect_typescript_tsx() {
        assert_eq!(
            detect_language(Path::new("Button.tsx"), ""),
            Some(Language::TypeScript)
        );
    }

    #[test]
    fn test_detect_by_content_keywords() {
        let content = "package main\n\nfunc main() {}\ntype X struct{}\n";
        assert_eq!(
            detect_language(Path::new("Makefile"), content),
            Some(Language::Go)
        );
    }

    #[test]
    fn test_unknown_language() {
        assert_eq!(detect_language(Path::new("notes.txt"), "hello"), None);
        assert_eq!(language_name(None), "unknown");
    }

    #[test]
    fn test_supported_files() {
        assert!(is_supported_file(Path::new("src/main.rs")));
        assert!(is_supported_file(Path::new("styles/app.scss")));
        assert!(is_supported_file(Path::new("Dockerfile")));
        assert!(!is_supported_file(Path::new("image.png")));
    }
}
