use super::AnalyticsReport;
use crate::core::float::CohortFloat;
use colored::Colorize;
use std::fmt::Write;

/// Renders a terminal-friendly digest of an analysis run.
pub fn render_report<F: CohortFloat>(report: &AnalyticsReport<F>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=== Cohort Analysis ===".bold());
    let _ = writeln!(out, "Clusters: {}", report.k);
    let _ = writeln!(
        out,
        "Inertia: {:.4}",
        report.inertia.to_f64().unwrap_or(f64::NAN)
    );
    let _ = writeln!(out, "Iterations: {}", report.iterations);
    let _ = writeln!(
        out,
        "Average Silhouette: {:.4}",
        report.average_silhouette.to_f64().unwrap_or(f64::NAN)
    );

    let total: usize = report.cluster_counts.values().sum();
    let _ = writeln!(out, "Cluster Sizes ({} respondents):", total);
    for (cluster, count) in &report.cluster_counts {
        let line = format!("  cluster {}: {} respondents", cluster, count);
        // Tiny clusters usually mean a poor k choice; call them out.
        let line = if *count < 2 {
            line.red().to_string()
        } else {
            line.green().to_string()
        };
        let _ = writeln!(out, "{}", line);
    }
    out
}

/// Prints the digest to stdout.
pub fn print_report<F: CohortFloat>(report: &AnalyticsReport<F>) {
    print!("{}", render_report(report));
}

#[cfg(test)]
mod tests {
    use super::render_report;
    use crate::analytics::AnalyticsReport;
    use std::collections::BTreeMap;

    #[test]
    fn test_render_contains_key_figures() {
        let report = AnalyticsReport::<f64> {
            k: 2,
            inertia: 1.25,
            iterations: 4,
            average_silhouette: 0.5,
            silhouette_per_point: vec![0.5, 0.5],
            cluster_counts: BTreeMap::from([(0, 1), (1, 1)]),
            labels: vec![0, 1],
            feature_names: vec!["q1_num".to_string()],
        };
        let rendered = render_report(&report);
        assert!(rendered.contains("Clusters: 2"));
        assert!(rendered.contains("Average Silhouette: 0.5000"));
        assert!(rendered.contains("cluster 0: 1 respondents"));
    }
}
