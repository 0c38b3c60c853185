//! Text rendering of run reports.
//!
//! ```rust
//! use cardsim_cli::formatters::format_percentage;
//!
//! assert_eq!(format_percentage(Some(0.5)), "50.000000%");
//! assert_eq!(format_percentage(None), "n/a");
//! ```

use cardsim_engine::RunReport;

/// Render a probability in [0, 1] as a percentage with six decimals.
pub fn format_percentage(probability: Option<f64>) -> String {
    match probability {
        Some(p) => format!("{:.6}%", p * 100.0),
        None => "n/a".to_string(),
    }
}

/// Summary lines for a finished run, one field per line.
pub fn format_report(report: &RunReport) -> Vec<String> {
    vec![
        format!("Event: {}", report.event),
        format!(
            "Threads: {}/{}",
            report.workers.len(),
            report.workers_requested
        ),
        format!(
            "Iterations: {}/{}",
            report.total_iterations, report.requested_iterations
        ),
        format!("Successes: {}", report.total_successes),
        format!("Probability: {}", format_percentage(report.probability())),
    ]
}

/// Warnings to surface when the estimate rests on fewer trials than requested.
pub fn report_warnings(report: &RunReport) -> Vec<String> {
    let mut warnings: Vec<String> = report.failures.iter().map(|f| f.to_string()).collect();
    if report.cancelled {
        warnings.push(format!(
            "run cancelled after {} of {} iterations",
            report.total_iterations, report.requested_iterations
        ));
    }
    if report.total_iterations == 0 {
        warnings.push("no iterations completed; probability is undefined".to_string());
    }
    warnings
}
