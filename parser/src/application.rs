//! @ai:module:intent Parse a whole application tree into a language-agnostic structure
//! @ai:module:layer application
//! @ai:module:public_api parse_application, ApplicationStructure, FileInfo
//! @ai:module:depends_on language, functionality, parser, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::functionality::{detect_functionality, Functionality};
use crate::language::{detect_language, is_supported_file, language_from_extension, Language};
use crate::parser::read_lossy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SKIP_DIRS: [&str; 8] = [
    "node_modules",
    "__pycache__",
    ".git",
    "target",
    "build",
    "dist",
    ".next",
    "venv",
];

const IMPORTANT_HIDDEN: [&str; 4] = [".env", ".gitignore", ".dockerignore", ".editorconfig"];

/// @ai:intent One file discovered inside an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: PathBuf,
    /// Path relative to the application root
    pub relative_path: PathBuf,
    pub language: Option<Language>,
    pub functionality: Functionality,
    /// Set when the file could be listed but not read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileInfo {
    /// @ai:intent Parent directory relative to the application root
    /// @ai:effects pure
    pub fn relative_parent(&self) -> String {
        self.relative_path
            .parent()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default()
    }
}

/// @ai:intent Language-agnostic structure of an application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationStructure {
    pub root: PathBuf,
    pub files: Vec<FileInfo>,
    pub language_distribution: BTreeMap<String, usize>,
    pub functionality_groups: BTreeMap<String, Vec<PathBuf>>,
    pub detected_frameworks: Vec<String>,
}

impl ApplicationStructure {
    /// @ai:intent Total number of parsed files
    /// @ai:effects pure
    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    /// @ai:intent Set of detected language names (unknown files excluded)
    /// @ai:effects pure
    pub fn detected_languages(&self) -> BTreeSet<String> {
        self.files
            .iter()
            .filter_map(|f| f.language.map(|l| l.name().to_string()))
            .collect()
    }

    /// @ai:intent Set of detected functionality category names
    /// @ai:effects pure
    pub fn functionalities(&self) -> BTreeSet<String> {
        self.files
            .iter()
            .map(|f| f.functionality.as_str().to_string())
            .collect()
    }

    /// @ai:intent Most common language by file count
    /// @ai:effects pure
    pub fn primary_language(&self) -> String {
        self.language_distribution
            .iter()
            .filter(|(lang, _)| lang.as_str() != "unknown")
            .max_by_key(|(_, count)| **count)
            .map(|(lang, _)| lang.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// @ai:intent Paths of all files as strings
    /// @ai:effects pure
    pub fn file_paths(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect()
    }
}

/// @ai:intent Parse an application directory
/// @ai:pre root exists and is a directory
/// @ai:post files are listed in deterministic (sorted) walk order
/// @ai:effects fs:read
pub fn parse_application(root: &Path) -> Result<ApplicationStructure> {
    if !root.exists() {
        return Err(Error::FileNotFound(root.to_path_buf()));
    }

    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut structure = ApplicationStructure {
        root: root.to_path_buf(),
        ..Default::default()
    };

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

        if !should_include_file(&relative) {
            continue;
        }

        let info = match read_lossy(path) {
            Ok(content) => FileInfo {
                path: path.to_path_buf(),
                language: detect_language(path, &content),
                functionality: detect_functionality(&relative, &content),
                relative_path: relative,
                error: None,
            },
            Err(e) => FileInfo {
                path: path.to_path_buf(),
                language: language_from_extension(path),
                functionality: Functionality::Unknown,
                relative_path: relative,
                error: Some(e.to_string()),
            },
        };

        let lang_key = crate::language::language_name(info.language);
        *structure.language_distribution.entry(lang_key).or_insert(0) += 1;
        structure
            .functionality_groups
            .entry(info.functionality.as_str().to_string())
            .or_default()
            .push(info.path.clone());

        structure.files.push(info);
    }

    structure.detected_frameworks = detect_frameworks(root);

    Ok(structure)
}

/// @ai:intent Decide whether a file (relative to the root) takes part in evaluation
/// @ai:effects pure
pub fn should_include_file(relative: &Path) -> bool {
    let file_name = relative.file_name().and_then(|n| n.to_str()).unwrap_or("");

    let hidden = relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'));

    if hidden && !IMPORTANT_HIDDEN.contains(&file_name) {
        return false;
    }

    let in_skipped_dir = relative
        .components()
        .any(|c| SKIP_DIRS.contains(&c.as_os_str().to_string_lossy().as_ref()));

    if in_skipped_dir {
        return false;
    }

    is_supported_file(relative)
}

/// @ai:intent Detect frameworks from well-known manifest files at the root
/// @ai:effects fs:read
fn detect_frameworks(root: &Path) -> Vec<String> {
    let mut frameworks = BTreeSet::new();

    if let Ok(content) = std::fs::read_to_string(root.join("package.json")) {
        if let Ok(manifest) = serde_json::from_str::<serde_json::Value>(&content) {
            for section in ["dependencies", "devDependencies"] {
                if let Some(deps) = manifest.get(section).and_then(|d| d.as_object()) {
                    for (name, framework) in [
                        ("react", "react"),
                        ("next", "nextjs"),
                        ("vue", "vue"),
                        ("express", "express"),
                        ("svelte", "svelte"),
                        ("@angular/core", "angular"),
                    ] {
                        if deps.contains_key(name) {
                            frameworks.insert(framework.to_string());
                        }
                    }
                }
            }
        }
    }

    for manifest in ["requirements.txt", "pyproject.toml"] {
        if let Ok(content) = std::fs::read_to_string(root.join(manifest)) {
            let lower = content.to_lowercase();

            for framework in ["django", "flask", "fastapi"] {
                if lower.contains(framework) {
                    frameworks.insert(framework.to_string());
                }
            }
        }
    }

    if root.join("Cargo.toml").is_file() {
        frameworks.insert("cargo".to_string());
    }

    if root.join("go.mod").is_file() {
        frameworks.insert("go-modules".to_string());
    }

    frameworks.into_iter().collect()
}
