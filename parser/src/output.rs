//! @ai:module:intent Format parsed files and applications for different formats (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_code_sample, format_application, to_json
//! @ai:module:depends_on parser, application
//! @ai:module:stateless true

use crate::application::ApplicationStructure;
use crate::parser::CodeSample;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a parsed file as a string
/// @ai:effects pure
pub fn format_code_sample(sample: &CodeSample, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(sample, false),
        OutputFormat::JsonPretty => to_json(sample, true),
        OutputFormat::Text => format_code_sample_text(sample),
    }
}

/// @ai:intent Format a parsed file as human-readable text
/// @ai:effects pure
fn format_code_sample_text(sample: &CodeSample) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({})\n",
        sample.path.display().to_string().bold(),
        sample.language_name()
    ));
    output.push_str(&format!("  Functionality: {}\n", sample.functionality.to_string().cyan()));
    output.push_str(&format!("  Complexity: {:?}\n", sample.complexity));
    output.push_str(&format!("  Lines: {}\n", sample.line_count));

    output
}

/// @ai:intent Format a parsed application as a string
/// @ai:effects pure
pub fn format_application(app: &ApplicationStructure, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(app, false),
        OutputFormat::JsonPretty => to_json(app, true),
        OutputFormat::Text => format_application_text(app),
    }
}

/// @ai:intent Format a parsed application as human-readable text
/// @ai:effects pure
fn format_application_text(app: &ApplicationStructure) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} ({} files, primary language: {})\n",
        app.root.display().to_string().bold(),
        app.total_files(),
        app.primary_language().cyan()
    ));

    if !app.detected_frameworks.is_empty() {
        output.push_str(&format!(
            "  Frameworks: {}\n",
            app.detected_frameworks.join(", ")
        ));
    }

    output.push_str("\n  Languages:\n");
    for (language, count) in &app.language_distribution {
        output.push_str(&format!("    {:<12} {}\n", language, count));
    }

    output.push_str("\n  Functionality:\n");
    for (category, files) in &app.functionality_groups {
        output.push_str(&format!("    {:<16} {}\n", category.yellow(), files.len()));
    }

    let unreadable = app.files.iter().filter(|f| f.error.is_some()).count();
    if unreadable > 0 {
        output.push_str(&format!(
            "\n  {} {} files could not be read\n",
            "WARN".yellow().bold(),
            unreadable
        ));
    }

    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
