//! Output formatters for probe results
//!
//! Provides JSON, Table, and summary output formats.

#![allow(dead_code)]

use crate::models::{RunSummary, ScenarioResult, ScenarioStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single scenario result
    pub fn format_result(&self, result: &ScenarioResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
            OutputFormat::Summary => self.format_result_summary(result),
        }
    }

    fn format_result_table(&self, result: &ScenarioResult) -> String {
        let status_str = if self.colorize {
            match result.status {
                ScenarioStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                ScenarioStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                ScenarioStatus::Skip => "\x1b[33m○ SKIP\x1b[0m",
                ScenarioStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match result.status {
                ScenarioStatus::Pass => "✓ PASS",
                ScenarioStatus::Fail => "✗ FAIL",
                ScenarioStatus::Skip => "○ SKIP",
                ScenarioStatus::Error => "! ERROR",
            }
        };

        format!(
            "{:2}. {:24} {} [{:>6}ms]",
            result.scenario.number(),
            result.scenario.name(),
            status_str,
            result.duration_ms
        )
    }

    fn format_result_summary(&self, result: &ScenarioResult) -> String {
        format!(
            "{} {} ({}ms)",
            result.status.symbol(),
            result.scenario.name(),
            result.duration_ms
        )
    }

    /// Format a run summary
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
        output.push_str(&format!("║  Security probe - {:43} ║\n", summary.gateway));
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        let mut current_category = "";
        for result in &summary.results {
            let category = result.scenario.category();
            if category != current_category {
                output.push_str(&format!("║  {category:60}║\n"));
                current_category = category;
            }
            output.push_str(&format!("║  {}  ║\n", self.format_result_table(result)));
        }

        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            "║  Pass: {} | Fail: {} | Skip: {} | Error: {} | {:.1}% in {}ms\n",
            pass_str,
            fail_str,
            summary.skipped,
            summary.errors,
            summary.pass_rate(),
            summary.total_duration_ms
        ));
        output.push_str("╚══════════════════════════════════════════════════════════════╝\n");

        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        let mut output = String::new();
        for result in &summary.results {
            output.push_str(&self.format_result_summary(result));
            output.push('\n');
        }
        output.push_str(&format!(
            "{}/{} passed ({:.1}%), {} skipped, {} failed, {} errors\n",
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.skipped,
            summary.failed,
            summary.errors
        ));
        output
    }

    /// Format failure details for scenarios that did not pass
    pub fn format_failures(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        for result in &summary.results {
            if matches!(result.status, ScenarioStatus::Fail | ScenarioStatus::Error) {
                output.push_str(&format!("\n{}:\n", result.scenario));
                if let Some(message) = &result.message {
                    for line in message.lines() {
                        output.push_str(&format!("  {line}\n"));
                    }
                }
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scenario;

    fn sample_summary() -> RunSummary {
        RunSummary::new(
            "http://localhost:8080",
            vec![
                ScenarioResult::pass(Scenario::MissingToken, 12),
                ScenarioResult::fail(Scenario::EmptyToken, 8, "Empty token got status 200"),
                ScenarioResult::skip(Scenario::ExpiredToken, "No fixture"),
            ],
        )
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(
            OutputFormat::from_str("json-pretty"),
            Some(OutputFormat::JsonPretty)
        );
        assert_eq!(OutputFormat::from_str("csv"), None);
    }

    #[test]
    fn test_table_output_contains_results() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let output = formatter.format_summary(&sample_summary());

        assert!(output.contains("Missing Token"));
        assert!(output.contains("✗ FAIL"));
        assert!(output.contains("○ SKIP"));
    }

    #[test]
    fn test_json_output_roundtrips() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&sample_summary());

        let parsed: RunSummary = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.total, 3);
        assert_eq!(parsed.failed, 1);
    }

    #[test]
    fn test_failure_details() {
        let formatter = ResultFormatter::new(OutputFormat::Table).no_color();
        let output = formatter.format_failures(&sample_summary());

        assert!(output.contains("Empty Token"));
        assert!(output.contains("Empty token got status 200"));
        assert!(!output.contains("Missing Token"));
    }
}
