//! @ai:module:intent Fern parser library for turning source files and application trees into evaluation inputs
//! @ai:module:layer infrastructure
//! @ai:module:public_api application, functionality, parser, language, output, error
//! @ai:module:stateless true
//!
//! # Fern Parser
//!
//! A language-agnostic parser that classifies source files by language,
//! functionality and complexity, and walks whole application trees for the
//! golden-vs-generated evaluation engine.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fern_parser::{output, parse_application, parse_file};
//! use std::path::Path;
//!
//! // Parse a single file
//! if let Some(sample) = parse_file(Path::new("src/app.py")).unwrap() {
//!     println!("{}", output::format_code_sample(&sample, output::OutputFormat::JsonPretty));
//! }
//!
//! // Parse an application tree
//! let app = parse_application(Path::new("golden")).unwrap();
//! println!("{}", output::format_application(&app, output::OutputFormat::Text));
//! ```

pub mod application;
pub mod error;
pub mod functionality;
pub mod language;
pub mod output;
pub mod parser;

pub use application::{parse_application, should_include_file, ApplicationStructure, FileInfo};
pub use error::{Error, Result};
pub use functionality::{detect_functionality, Functionality};
pub use language::{detect_language, is_supported_file, language_name, Language};
pub use output::{format_application, format_code_sample, to_json, OutputFormat};
pub use parser::{assess_complexity, parse_file, read_lossy, CodeSample, Complexity};
