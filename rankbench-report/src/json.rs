//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{BenchReport, ReportMeta};

    #[test]
    fn test_json_round_trips() {
        let report = Report {
            meta: ReportMeta::now(4, 1000),
            results: vec![BenchReport::from_measurement("allreduce", 1000, 5e6, 4000)],
        };
        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].name, "allreduce");
        assert_eq!(parsed.meta.ranks, 4);
    }
}
