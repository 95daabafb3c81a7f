//! Console rendering of sweep progress and results.

use std::fmt::Write as _;

use super::{CpuRun, SimulationResult, Summary, Toolchain};

/// ANSI terminal colors.
pub mod color {
    /// Cyan, for informational listings.
    pub const INFO: &str = "\x1b[96m";
    /// Green, for passed steps.
    pub const OK: &str = "\x1b[92m";
    /// Yellow, for skipped steps and warnings.
    pub const WARNING: &str = "\x1b[93m";
    /// Red, for failed steps.
    pub const FAIL: &str = "\x1b[91m";
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Resets all attributes.
    pub const END: &str = "\x1b[0m";
}

/// Width of every status column.
pub const COLUMN_WIDTH: usize = 17;

const RULE: &str = "=================================";

/// Wraps `text` in `color`.
pub fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{}", color::END)
}

/// Column layout of the per-variant table.
#[derive(Debug, Clone)]
pub struct TableLayout {
    name_width: usize,
    toolchain_columns: Vec<String>,
    simulation: bool,
}

impl TableLayout {
    /// Sizes the table for `runs`.
    ///
    /// Toolchain labels longer than [`COLUMN_WIDTH`] are truncated.
    pub fn new(runs: &[CpuRun], toolchains: &[Toolchain], compile_only: bool) -> Self {
        let name_width = runs
            .iter()
            .map(|run| run.name.len())
            .chain([3])
            .max()
            .unwrap_or(3);
        let toolchain_columns = toolchains
            .iter()
            .map(|toolchain| toolchain.label().chars().take(COLUMN_WIDTH).collect())
            .collect();
        Self {
            name_width,
            toolchain_columns,
            simulation: !compile_only,
        }
    }

    /// Header line plus separator, in bold.
    pub fn header(&self) -> String {
        let mut header = format!("{:<width$}", "CPU", width = self.name_width);
        let _ = write!(header, " | {:>COLUMN_WIDTH$}", "Generation");
        for column in &self.toolchain_columns {
            let _ = write!(header, " | {column:>COLUMN_WIDTH$}");
        }
        if self.simulation {
            let _ = write!(header, " | {:>COLUMN_WIDTH$}", "Simulation");
        }
        let rule = "-".repeat(header.len());
        format!("{}\n{}", paint(color::BOLD, &header), paint(color::BOLD, &rule))
    }

    /// Status row of one finished run.
    pub fn row(&self, run: &CpuRun) -> String {
        let mut row = format!("{:<width$}", run.name, width = self.name_width);

        let generation = if run.generation == Some(true) {
            Cell::Ok
        } else {
            Cell::Fail
        };
        generation.append(&mut row);

        for status in &run.compilation {
            match status {
                None => Cell::Skipped,
                Some(true) => Cell::Ok,
                Some(false) => Cell::Fail,
            }
            .append(&mut row);
        }

        if self.simulation {
            match run.simulation {
                Some(SimulationResult::Passed) => Cell::Ok,
                Some(SimulationResult::Skipped) => Cell::Skipped,
                Some(SimulationResult::Failed) | None => Cell::Fail,
            }
            .append(&mut row);
        }
        row
    }
}

#[derive(Debug, Clone, Copy)]
enum Cell {
    Ok,
    Fail,
    Skipped,
}

impl Cell {
    fn append(self, row: &mut String) {
        let (color, text) = match self {
            Self::Ok => (color::OK, "OK"),
            Self::Fail => (color::FAIL, "FAIL"),
            Self::Skipped => (color::WARNING, "SKIPPED"),
        };
        let _ = write!(row, " | {color}{text:>COLUMN_WIDTH$}{}", color::END);
    }
}

/// The variants about to be swept.
pub fn variant_list(runs: &[CpuRun]) -> String {
    let mut text = paint(color::INFO, "CPU configurations to test:");
    for run in runs {
        text.push('\n');
        text.push_str(&paint(color::INFO, &format!("    - {}", run.name)));
    }
    text
}

fn itemize(text: &mut String, color: &str, heading: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    let _ = write!(text, "\n{}", paint(color, &format!("{} {heading}", names.len())));
    for name in names {
        let _ = write!(text, "\n{}", paint(color, &format!("    - {name}")));
    }
}

/// Itemized results, one list per failure category.
pub fn detailed_summary(summary: &Summary) -> String {
    let mut text = format!(
        "{}\n{}\n{}\n{}",
        paint(color::BOLD, RULE),
        paint(color::BOLD, "Results:"),
        paint(color::BOLD, RULE),
        paint(
            color::OK,
            &format!(
                "{} out of {} CPU configurations finished successfully.",
                summary.ok.len(),
                summary.total
            )
        ),
    );
    itemize(&mut text, color::WARNING, "CPUs were skipped.", &summary.skipped);
    itemize(
        &mut text,
        color::FAIL,
        "CPUs failed to generate.",
        &summary.generation_failed,
    );
    itemize(
        &mut text,
        color::FAIL,
        "CPUs failed to compile test apps.",
        &summary.compilation_failed,
    );
    itemize(
        &mut text,
        color::FAIL,
        "CPUs failed simulation.",
        &summary.simulation_failed,
    );
    let _ = write!(text, "\n{}", paint(color::BOLD, RULE));
    text
}

/// Counts only, for table mode.
pub fn table_summary(summary: &Summary) -> String {
    let mut text = format!(
        "\n{}",
        paint(
            color::BOLD,
            &format!(
                "Summary: {}/{} CPU configurations succeeded",
                summary.ok.len(),
                summary.total
            )
        )
    );
    let counts = [
        (color::WARNING, "Skipped", &summary.skipped),
        (color::FAIL, "Generation failed", &summary.generation_failed),
        (color::FAIL, "Compilation failed", &summary.compilation_failed),
        (color::FAIL, "Simulation failed", &summary.simulation_failed),
    ];
    for (color, label, names) in counts {
        if !names.is_empty() {
            let _ = write!(text, "\n{}", paint(color, &format!("{label}: {}", names.len())));
        }
    }
    text
}
