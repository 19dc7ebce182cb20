//! Human-Readable Output
//!
//! One line per benchmark: `<name>: <ns-per-iteration>ns`, followed by
//! ` <bytes-per-second>B/s` when the benchmark declared bytes processed.

use crate::report::{BenchReport, Report};

/// Format one benchmark's console line.
pub fn format_bench_line(result: &BenchReport) -> String {
    let mut line = format!("{}: {}ns", result.name, result.ns_per_iter);
    if let Some(bytes_per_sec) = result.bytes_per_sec {
        line.push_str(&format!(" {}B/s", bytes_per_sec));
    }
    line
}

/// Format a whole report for terminal display, one line per benchmark.
pub fn format_human_report(report: &Report) -> String {
    let mut output = String::new();
    for result in &report.results {
        output.push_str(&format_bench_line(result));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportMeta;

    #[test]
    fn test_line_without_throughput() {
        let result = BenchReport::from_measurement("empty", 1000, 250_000.0, 0);
        assert_eq!(format_bench_line(&result), "empty: 250ns");
    }

    #[test]
    fn test_line_with_throughput() {
        let result = BenchReport::from_measurement("copy", 10, 10_000.0, 8);
        assert_eq!(format_bench_line(&result), "copy: 1000ns 8000000B/s");
    }

    #[test]
    fn test_report_is_one_line_per_benchmark() {
        let report = Report {
            meta: ReportMeta::now(1, 100),
            results: vec![
                BenchReport::from_measurement("a", 100, 100.0, 0),
                BenchReport::from_measurement("b", 100, 200.0, 0),
            ],
        };
        let rendered = format_human_report(&report);
        assert_eq!(rendered, "a: 1ns\nb: 2ns\n");
    }
}
