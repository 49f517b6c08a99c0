use std::fmt::Write;

use comfy_table::Cell;

use crate::report::MigrationReport;

use super::styling::Tone;
use super::tables::{create_table, cyan_header, failure_count_cell};

/// Prints the outcome of a migration run to stdout.
///
/// Displays an overview table with the per-outcome counts and, when any item was
/// skipped because of an error, one row per failure.
pub fn print_summary(report: &MigrationReport) {
    println!("{}", render_summary(report));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", Tone::Heading.paint(emoji), Tone::Heading.paint(title).underlined());
}

fn render_summary(report: &MigrationReport) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📊", "Overview");

    let mut table = create_table();
    table.set_header(cyan_header(&["Outcome", "Count"]));
    table.add_row(vec![Cell::new("Groups created"), Cell::new(report.groups_created)]);
    table.add_row(vec![Cell::new("Groups reused"), Cell::new(report.groups_reused)]);
    table.add_row(vec![
        Cell::new("Imports triggered"),
        Cell::new(report.projects_imported),
    ]);
    table.add_row(vec![
        Cell::new("Already existing, skipped"),
        Cell::new(report.projects_skipped),
    ]);
    table.add_row(vec![
        Cell::new("Failures"),
        failure_count_cell(report.failures.len()),
    ]);
    let _ = writeln!(output, "{table}");
    let _ = writeln!(
        output,
        "  {} {}\n",
        Tone::Muted.paint("Duration:"),
        Tone::Active.paint(format!("{:.1}s", report.duration_secs()))
    );

    if report.failures.is_empty() {
        let _ = writeln!(output, "{}", Tone::Success.paint("All items migrated ✓"));
        return output;
    }

    add_section_header(&mut output, "⚠️", "Failures");

    let mut failures = create_table();
    failures.set_header(cyan_header(&["Kind", "Path", "Error"]));
    for failure in &report.failures {
        failures.add_row(vec![
            Cell::new(failure.kind),
            Cell::new(&failure.path),
            Cell::new(&failure.error),
        ]);
    }
    let _ = writeln!(output, "{failures}");
    let _ = writeln!(
        output,
        "{}",
        Tone::Failure.paint("Some items were skipped; re-run the migration to retry them")
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MigratorError;
    use crate::report::{FailureKind, ItemOutcome};

    #[test]
    fn test_summary_lists_counts() {
        let mut report = MigrationReport::new();
        report.record(ItemOutcome::Created);
        report.record(ItemOutcome::Imported);
        report.record(ItemOutcome::Imported);
        report.finish();

        let rendered = render_summary(&report);
        assert!(rendered.contains("Groups created"));
        assert!(rendered.contains("Imports triggered"));
        assert!(rendered.contains("All items migrated"));
        assert!(!rendered.contains("re-run the migration"));
    }

    #[test]
    fn test_summary_lists_failures() {
        let mut report = MigrationReport::new();
        report.record_failure(
            FailureKind::Project,
            "teamA/repo0",
            &MigratorError::ApiError {
                status: 403,
                message: "Forbidden".to_string(),
            },
        );
        report.finish();

        let rendered = render_summary(&report);
        assert!(rendered.contains("teamA/repo0"));
        assert!(rendered.contains("Forbidden"));
        assert!(rendered.contains("re-run the migration"));
    }
}
