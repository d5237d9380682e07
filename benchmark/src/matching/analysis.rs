//! @ai:module:intent Extract fixed-shape characteristics of a file for structural matching
//! @ai:module:layer domain
//! @ai:module:public_api FileAnalyzer, FileAnalysis, FileType
//! @ai:module:depends_on fern_parser
//! @ai:module:stateless true

use fern_parser::{read_lossy, ApplicationStructure};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// @ai:intent Categorical tag of a file's role (best effort, not guaranteed accurate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    ReactComponent,
    PageComponent,
    LayoutComponent,
    ApiRoute,
    Utility,
    Style,
    Config,
    Hook,
    TypeScript,
    JavaScript,
    Documentation,
    Unknown,
}

impl FileType {
    /// @ai:intent Get file type name as string
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::ReactComponent => "react_component",
            FileType::PageComponent => "page_component",
            FileType::LayoutComponent => "layout_component",
            FileType::ApiRoute => "api_route",
            FileType::Utility => "utility",
            FileType::Style => "style",
            FileType::Config => "config",
            FileType::Hook => "hook",
            FileType::TypeScript => "typescript",
            FileType::JavaScript => "javascript",
            FileType::Documentation => "documentation",
            FileType::Unknown => "unknown",
        }
    }

    /// @ai:intent Extension-based fallback classification
    /// @ai:effects pure
    fn from_extension(ext: &str) -> Self {
        match ext {
            "tsx" | "jsx" => FileType::ReactComponent,
            "ts" => FileType::TypeScript,
            "js" => FileType::JavaScript,
            "css" | "scss" => FileType::Style,
            "json" => FileType::Config,
            "md" => FileType::Documentation,
            _ => FileType::Unknown,
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Immutable snapshot of one file's characteristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub file_type: FileType,
    pub component_name: Option<String>,
    pub exports: BTreeSet<String>,
    pub imports: BTreeSet<String>,
    /// Top-level package names of non-relative imports
    pub dependencies: BTreeSet<String>,
    /// Normalized heuristic complexity in [0, 1]
    pub complexity_score: f64,
    pub functionality_signature: String,
    pub content_hash: String,
}

impl FileAnalysis {
    /// @ai:intent File name component of the path
    /// @ai:effects pure
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

const COMPLEXITY_INDICATORS: [&str; 14] = [
    "if",
    "else",
    "for",
    "while",
    "switch",
    "case",
    "function",
    "const",
    "let",
    "var",
    "class",
    "useState",
    "useEffect",
    "useCallback",
];

/// @ai:intent Regex-based analyzer producing FileAnalysis records
pub struct FileAnalyzer {
    type_rules: Vec<(FileType, Regex)>,
    component_patterns: Vec<Regex>,
    export_decl: Regex,
    export_list: Regex,
    js_import: Regex,
    js_require: Regex,
    py_import: Regex,
    py_from_import: Regex,
    function_name: Regex,
    hook: Regex,
    jsx_element: Regex,
    use_state: Regex,
    line_comment: Regex,
    block_comment: Regex,
    hash_comment: Regex,
    whitespace: Regex,
}

impl FileAnalyzer {
    /// @ai:intent Create a new analyzer with compiled patterns
    /// @ai:effects pure
    pub fn new() -> Self {
        let rule = |file_type, pattern: &str| (file_type, Regex::new(pattern).unwrap());

        Self {
            type_rules: vec![
                rule(
                    FileType::ReactComponent,
                    r"(export\s+default\s+|export\s+const\s+|export\s+function\s+)(\w+)",
                ),
                rule(FileType::PageComponent, r"(pages?/|src/pages?/)"),
                rule(FileType::LayoutComponent, r"(layout|Layout)"),
                rule(FileType::ApiRoute, r"(api/|pages?/api/)"),
                rule(FileType::Utility, r"(utils?/|helpers?/|lib/)"),
                rule(FileType::Style, r"\.(css|scss|sass|less)$"),
                rule(FileType::Config, r"\.(json|js|ts)$"),
                rule(FileType::Hook, r"use[A-Z]\w+"),
            ],
            component_patterns: [
                r"export\s+default\s+(?:function\s+|class\s+)?(\w+)",
                r"export\s+const\s+(\w+)\s*=",
                r"export\s+function\s+(\w+)",
                r"const\s+(\w+)\s*=\s*\(",
                r"function\s+(\w+)\s*\(",
                r"def\s+(\w+)\s*\(",
                r"class\s+(\w+)",
            ]
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect(),
            export_decl: Regex::new(
                r"export\s+(?:default\s+)?(?:const|let|var|function|class)\s+(\w+)",
            )
            .unwrap(),
            export_list: Regex::new(r"export\s+\{\s*([^}]+)\s*\}").unwrap(),
            js_import: Regex::new(r#"import\s+.*?from\s+['"]([^'"]+)['"]"#).unwrap(),
            js_require: Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap(),
            py_import: Regex::new(r"(?m)^\s*import\s+([\w.]+)").unwrap(),
            py_from_import: Regex::new(r"(?m)^\s*from\s+([\w.]+)\s+import").unwrap(),
            function_name: Regex::new(r"(?:function|def)\s+(\w+)").unwrap(),
            hook: Regex::new(r"\buse[A-Z]\w*").unwrap(),
            jsx_element: Regex::new(r"<(\w+)").unwrap(),
            use_state: Regex::new(r"useState\s*\(").unwrap(),
            line_comment: Regex::new(r"//[^\n]*").unwrap(),
            block_comment: Regex::new(r"(?s)/\*.*?\*/").unwrap(),
            hash_comment: Regex::new(r"(?m)^\s*#[^\n]*").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// @ai:intent Analyze a file given its path and content
    /// @ai:effects pure
    pub fn analyze(&self, path: &Path, content: &str) -> FileAnalysis {
        let is_python = is_python(path);
        let imports = self.extract_imports(content, is_python);
        let dependencies = extract_dependencies(&imports, is_python);

        FileAnalysis {
            path: path.to_path_buf(),
            file_type: self.determine_file_type(path, content),
            component_name: self.extract_component_name(content),
            exports: self.extract_exports(content),
            imports,
            dependencies,
            complexity_score: self.calculate_complexity(content, is_python),
            functionality_signature: self.functionality_signature(content),
            content_hash: self.content_hash(content, is_python),
        }
    }

    /// @ai:intent Read and analyze a file from disk
    /// @ai:effects fs:read
    pub fn analyze_file(&self, path: &Path) -> fern_parser::Result<FileAnalysis> {
        let content = read_lossy(path)?;
        Ok(self.analyze(path, &content))
    }

    /// @ai:intent Analyze every file of an application, keyed by path
    /// @ai:post unreadable files are logged and left out
    /// @ai:effects fs:read
    pub fn analyze_application(&self, structure: &ApplicationStructure) -> BTreeMap<String, FileAnalysis> {
        let mut analyses = BTreeMap::new();

        for file in &structure.files {
            match self.analyze_file(&file.path) {
                Ok(analysis) => {
                    analyses.insert(file.path.to_string_lossy().into_owned(), analysis);
                }
                Err(e) => {
                    tracing::warn!("Failed to analyze {}: {}", file.path.display(), e);
                }
            }
        }

        analyses
    }

    /// @ai:intent Classify a file by ordered path/content rules, then by extension
    /// @ai:effects pure
    pub fn determine_file_type(&self, path: &Path, content: &str) -> FileType {
        let path_lower = path.to_string_lossy().to_lowercase();

        for (file_type, pattern) in &self.type_rules {
            if pattern.is_match(&path_lower) || pattern.is_match(content) {
                return *file_type;
            }
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| FileType::from_extension(&e.to_lowercase()))
            .unwrap_or(FileType::Unknown)
    }

    /// @ai:intent Best-effort primary symbol name
    /// @ai:effects pure
    pub fn extract_component_name(&self, content: &str) -> Option<String> {
        self.component_patterns
            .iter()
            .find_map(|p| p.captures(content))
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// @ai:intent Exported symbol names
    /// @ai:effects pure
    pub fn extract_exports(&self, content: &str) -> BTreeSet<String> {
        let mut exports: BTreeSet<String> = self
            .export_decl
            .captures_iter(content)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect();

        for cap in self.export_list.captures_iter(content) {
            let Some(list) = cap.get(1) else { continue };

            for item in list.as_str().split(',') {
                // `a as b` keeps the local name
                if let Some(name) = item.split_whitespace().next() {
                    exports.insert(name.to_string());
                }
            }
        }

        exports
    }

    /// @ai:intent Imported module specifiers
    /// @ai:effects pure
    pub fn extract_imports(&self, content: &str, is_python: bool) -> BTreeSet<String> {
        let patterns: Vec<&Regex> = if is_python {
            vec![&self.py_import, &self.py_from_import]
        } else {
            vec![&self.js_import, &self.js_require]
        };

        patterns
            .into_iter()
            .flat_map(|p| p.captures_iter(content))
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// @ai:intent Normalized complexity estimate in [0, 1]
    /// @ai:effects pure
    pub fn calculate_complexity(&self, content: &str, is_python: bool) -> f64 {
        if is_python {
            let mut complexity = 0u32;

            for line in content.lines().map(str::trim_start) {
                if line.starts_with("class ") {
                    complexity += 3;
                } else if line.starts_with("def ") || line.starts_with("async def ") {
                    complexity += 2;
                } else if ["if ", "elif ", "for ", "while ", "with "]
                    .iter()
                    .any(|kw| line.starts_with(kw))
                {
                    complexity += 1;
                }
            }

            return (complexity as f64 / 10.0).min(1.0);
        }

        let score: usize = content
            .lines()
            .map(|line| {
                COMPLEXITY_INDICATORS
                    .iter()
                    .filter(|indicator| line.contains(*indicator))
                    .count()
            })
            .sum();

        (score as f64 / 50.0).min(1.0)
    }

    /// @ai:intent Compact encoding of functions, hooks, JSX elements and state count
    /// @ai:example ("function App() { const [a] = useState(0); return <div/> }") -> "func:App|hook:useState|jsx:div|state_count:1"
    /// @ai:effects pure
    pub fn functionality_signature(&self, content: &str) -> String {
        let functions = self
            .function_name
            .captures_iter(content)
            .filter_map(|cap| cap.get(1))
            .take(5)
            .map(|m| format!("func:{}", m.as_str()));

        let hooks: BTreeSet<&str> = self.hook.find_iter(content).map(|m| m.as_str()).collect();

        let jsx: BTreeSet<&str> = self
            .jsx_element
            .captures_iter(content)
            .filter_map(|cap| cap.get(1))
            .take(10)
            .map(|m| m.as_str())
            .collect();

        let state_count = self.use_state.find_iter(content).count();

        functions
            .chain(hooks.into_iter().map(|h| format!("hook:{}", h)))
            .chain(jsx.into_iter().map(|j| format!("jsx:{}", j)))
            .chain(std::iter::once(format!("state_count:{}", state_count)))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// @ai:intent Digest of comment-stripped, whitespace-collapsed content
    /// @ai:effects pure
    pub fn content_hash(&self, content: &str, is_python: bool) -> String {
        let stripped = self.block_comment.replace_all(content, "");
        let stripped = self.line_comment.replace_all(&stripped, "");
        let stripped = if is_python {
            self.hash_comment.replace_all(&stripped, "").into_owned()
        } else {
            stripped.into_owned()
        };
        let normalized = self.whitespace.replace_all(stripped.trim(), " ");

        let digest = Sha256::digest(normalized.as_bytes());
        let mut hash = hex::encode(digest);
        hash.truncate(16);
        hash
    }
}

impl Default for FileAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Check for a Python source extension
/// @ai:effects pure
fn is_python(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("py")
}

/// @ai:intent Top-level package of each non-relative import
/// @ai:effects pure
fn extract_dependencies(imports: &BTreeSet<String>, is_python: bool) -> BTreeSet<String> {
    let separator = if is_python { '.' } else { '/' };

    imports
        .iter()
        .filter(|i| !i.starts_with('.'))
        .filter_map(|i| i.split(separator).next())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
