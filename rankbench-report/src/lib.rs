#![warn(missing_docs)]
//! Rankbench Report - Result Structures and Rendering
//!
//! Generates the output formats:
//! - Human (one console line per benchmark, the root rank's report)
//! - JSON (machine-readable)

mod human;
mod json;
mod report;

pub use human::{format_bench_line, format_human_report};
pub use json::generate_json_report;
pub use report::{BenchReport, Report, ReportMeta};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Human,
    /// JSON with full metadata
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("human").unwrap(), OutputFormat::Human);
        assert_eq!(OutputFormat::from_str("Text").unwrap(), OutputFormat::Human);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("csv").is_err());
    }
}
