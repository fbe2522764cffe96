//! Report formatting and printing utilities.
//!
//! Failures are displayed in cargo-style format. Separate from the engine so
//! vox can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CheckSummary, CommandResult, CommandSummary, Failure, InitSummary, TranslateOutput,
    TranslateSummary,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print failures to a custom writer.
pub fn report_to<W: Write>(failures: &[Failure], writer: &mut W) {
    let max_line_width = calculate_max_line_width(failures);

    for failure in failures {
        print_failure(failure, writer, max_line_width);
    }
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Translate(summary) => print_translate(summary, &result.failures),
        CommandSummary::Check(summary) => {
            print_check_to(summary, &result.failures, &mut io::stdout().lock())
        }
        CommandSummary::Init(summary) => print_init(summary, &result.failures),
    }
}

// ============================================================
// Per-command output
// ============================================================

fn print_translate(summary: &TranslateSummary, failures: &[Failure]) {
    if !failures.is_empty() {
        report_to(failures, &mut io::stderr().lock());
        return;
    }

    match &summary.output {
        Some(TranslateOutput::Stdout(text)) => {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.flush();
        }
        Some(TranslateOutput::File(path)) => {
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Translated {} -> {}",
                    summary.input.display(),
                    path.display()
                )
                .green()
            );
        }
        None => {}
    }
}

/// Print the check report and its closing summary to a custom writer.
pub fn print_check_to<W: Write>(summary: &CheckSummary, failures: &[Failure], writer: &mut W) {
    let checked = summary.files_checked;
    let files = if checked == 1 { "file" } else { "files" };

    if failures.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Checked {} {} - no errors found", checked, files).green()
        );
        return;
    }

    report_to(failures, writer);
    let _ = writeln!(
        writer,
        "{} {} failed ({} {} checked)",
        FAILURE_MARK.red(),
        failures.len(),
        checked,
        files
    );
}

fn print_init(summary: &InitSummary, failures: &[Failure]) {
    if !failures.is_empty() {
        report_to(failures, &mut io::stderr().lock());
        return;
    }
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", summary.path.display()).green()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_failure<W: Write>(failure: &Failure, writer: &mut W, max_line_width: usize) {
    let _ = writeln!(
        writer,
        "{}: {}",
        format!("error[{}]", failure.kind).bold().red(),
        failure.message
    );

    let Some(loc) = &failure.location else {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), failure.path);
        let _ = writeln!(writer);
        return;
    };

    // Print clickable location: --> path:line:col
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        failure.path,
        loc.line,
        loc.col
    );

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        loc.line.to_string().blue(),
        "|".blue(),
        loc.source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = loc.source_line.chars().take(loc.col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        "^".red(),
        width = max_line_width,
        padding = caret_padding
    );

    let _ = writeln!(writer); // Empty line between failures
}

fn calculate_max_line_width(failures: &[Failure]) -> usize {
    failures
        .iter()
        .filter_map(|f| f.location.as_ref().map(|loc| loc.line))
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
