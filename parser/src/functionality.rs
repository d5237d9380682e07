//! @ai:module:intent Classify files into coarse functionality categories
//! @ai:module:layer domain
//! @ai:module:public_api Functionality, detect_functionality
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Coarse functional role of a source file inside an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Functionality {
    Authentication,
    ApiRoutes,
    Database,
    UiComponents,
    Utilities,
    Tests,
    Configuration,
    Styling,
    General,
    Unknown,
}

/// Categories tried in order; `General` and `Unknown` are never matched by rules.
const RULE_ORDER: [Functionality; 8] = [
    Functionality::Authentication,
    Functionality::ApiRoutes,
    Functionality::Database,
    Functionality::UiComponents,
    Functionality::Utilities,
    Functionality::Tests,
    Functionality::Configuration,
    Functionality::Styling,
];

impl Functionality {
    /// @ai:intent Get category name as string
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Functionality::Authentication => "authentication",
            Functionality::ApiRoutes => "api_routes",
            Functionality::Database => "database",
            Functionality::UiComponents => "ui_components",
            Functionality::Utilities => "utilities",
            Functionality::Tests => "tests",
            Functionality::Configuration => "configuration",
            Functionality::Styling => "styling",
            Functionality::General => "general",
            Functionality::Unknown => "unknown",
        }
    }

    fn keywords(&self) -> &[&str] {
        match self {
            Functionality::Authentication => &[
                "login", "auth", "signin", "signup", "password", "token", "jwt", "session",
            ],
            Functionality::ApiRoutes => {
                &["api", "route", "endpoint", "handler", "controller", "service"]
            }
            Functionality::Database => {
                &["model", "schema", "migration", "query", "database", "db", "sql"]
            }
            Functionality::UiComponents => {
                &["component", "widget", "view", "page", "screen", "layout", "button"]
            }
            Functionality::Utilities => &["util", "helper", "lib", "common", "shared", "config"],
            Functionality::Tests => &["test", "spec", "mock", "fixture", "unit", "integration"],
            Functionality::Configuration => &["config", "setting", "env", "environment", "setup"],
            Functionality::Styling => &["style", "css", "theme", "design", "ui"],
            Functionality::General | Functionality::Unknown => &[],
        }
    }

    /// Substrings searched for in the lower-cased path.
    fn path_patterns(&self) -> &[&str] {
        match self {
            Functionality::Authentication => &["login", "auth", "signin", "signup"],
            Functionality::ApiRoutes => &["api", "route", "controller", "service"],
            Functionality::Database => &["model", "schema", "migration", "db"],
            Functionality::UiComponents => &["component", "widget", "view", "page", "screen"],
            Functionality::Utilities => &["util", "helper", "lib", "common", "shared"],
            Functionality::Tests => &["test", "spec", "mock", "test_", "_test"],
            Functionality::Configuration => &["config", "setting", "env", "setup"],
            Functionality::Styling => &["style", "css", "theme", "design"],
            Functionality::General | Functionality::Unknown => &[],
        }
    }
}

impl std::fmt::Display for Functionality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Detect the functionality category of a file
/// @ai:post test indicators in the path always win
/// @ai:example ("src/components/Button.tsx", "") -> UiComponents
/// @ai:example ("tests/test_api.py", "") -> Tests
/// @ai:effects pure
pub fn detect_functionality(path: &Path, content: &str) -> Functionality {
    let path_lower = path.to_string_lossy().to_lowercase();
    let file_name_lower = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let content_lower = content.to_lowercase();

    let test_indicators = ["test", "spec", "mock", "__tests__"];
    if test_indicators.iter().any(|i| path_lower.contains(i)) {
        return Functionality::Tests;
    }

    for category in RULE_ORDER {
        if category.path_patterns().iter().any(|p| path_lower.contains(p)) {
            return category;
        }

        if category.keywords().iter().any(|k| file_name_lower.contains(k)) {
            return category;
        }

        let keyword_hits = category
            .keywords()
            .iter()
            .filter(|k| content_lower.contains(*k))
            .count();

        if keyword_hits >= 2 {
            return category;
        }
    }

    directory_fallback(path)
}

/// @ai:intent Categorise by well-known directory names
/// @ai:effects pure
fn directory_fallback(path: &Path) -> Functionality {
    let parts: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
        .collect();
    let has_any = |names: &[&str]| parts.iter().any(|p| names.contains(&p.as_str()));

    if has_any(&["test", "tests", "spec", "specs"]) {
        Functionality::Tests
    } else if has_any(&["config", "settings", "env"]) {
        Functionality::Configuration
    } else if has_any(&["style", "css", "scss", "sass"]) {
        Functionality::Styling
    } else if has_any(&["api", "routes", "controllers"]) {
        Functionality::ApiRoutes
    } else if has_any(&["component", "components", "widgets"]) {
        Functionality::UiComponents
    } else if has_any(&["util", "utils", "helpers", "lib"]) {
        Functionality::Utilities
    } else if has_any(&["model", "models", "schema", "database"]) {
        Functionality::Database
    } else {
        Functionality::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_files_win() {
        assert_eq!(
            detect_functionality(Path::new("src/auth/login.spec.ts"), ""),
            Functionality::Tests
        );
    }

    #[test]
    fn test_path_pattern_order() {
        assert_eq!(
            detect_functionality(Path::new("src/auth/session.ts"), ""),
            Functionality::Authentication
        );
        assert_eq!(
            detect_functionality(Path::new("app/api/users.py"), ""),
            Functionality::ApiRoutes
        );
        assert_eq!(
            detect_functionality(Path::new("src/components/Button.tsx"), ""),
            Functionality::UiComponents
        );
    }

    #[test]
    fn test_content_keywords() {
        let content = "SELECT * FROM users; -- query against the database";
        assert_eq!(
            detect_functionality(Path::new("src/report.sql"), content),
            Functionality::Database
        );
    }

    #[test]
    fn test_default_general() {
        assert_eq!(
            detect_functionality(Path::new("main.go"), "package main"),
            Functionality::General
        );
    }
}
