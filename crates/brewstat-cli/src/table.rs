//! Plain-text tables for terminal output

use brewstat_analysis::{summary::ColumnSummary, whisker::WhiskerRecord};

fn format_optional(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), |v| format!("{v:.3}"))
}

/// Print a summary statistics table, one row per column
pub(crate) fn print_summary_table(summaries: &[ColumnSummary]) {
    println!(
        "  {:<30} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Column", "Count", "Mean", "Std", "Min", "P25", "P50", "P75", "Max",
    );
    // column(30) + count(6) + 7 stats(12) + spaces(8)
    println!("  {}", "-".repeat(128));

    for summary in summaries {
        let stats = &summary.stats;
        println!(
            "  {:<30} {:>6} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            summary.column.name(),
            stats.count,
            format_optional(stats.mean),
            format_optional(stats.std),
            format_optional(stats.min),
            format_optional(stats.p25),
            format_optional(stats.p50),
            format_optional(stats.p75),
            format_optional(stats.max),
        );
    }
}

/// Print a whisker table, one row per group
pub(crate) fn print_whisker_table(label_col: &str, records: &[WhiskerRecord]) {
    if records.is_empty() {
        println!("  (no groups with defined values)");
        return;
    }

    println!(
        "  {:<20} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        label_col, "Lower", "Q1", "Q3", "Upper", "IQR", "Min", "Max",
    );
    // label(20) + 7 stats(10) + spaces(7)
    println!("  {}", "-".repeat(97));

    for record in records {
        let stats = &record.stats;
        println!(
            "  {:<20} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            record.group_key,
            stats.lower_whisker,
            stats.lower_quartile,
            stats.upper_quartile,
            stats.upper_whisker,
            stats.iqr,
            stats.min,
            stats.max,
        );
    }
}

/// Print polynomial coefficients, lowest power first
pub(crate) fn print_coefficients(coefficients: &[f64]) {
    println!("Coefficients:");
    for (power, c) in coefficients.iter().enumerate() {
        println!("  x^{power:<3} {c:>16.6e}");
    }
}

/// Print sampled curve points
pub(crate) fn print_curve_table(x_label: &str, y_label: &str, points: &[(f64, f64)]) {
    println!("  {x_label:>20} {y_label:>20}");
    println!("  {}", "-".repeat(41));
    for (x, y) in points {
        println!("  {x:>20.4} {y:>20.4}");
    }
}
