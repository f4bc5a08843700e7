// src/output/summary.rs

use crate::config::Mode;
use crate::constants::CHECK_OK_MESSAGE;
use crate::errors::violation_report;
use log::debug;
use std::io::{self, Write};

/// What happened to the files of one run. Paths are cwd-relative with `/` separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files the formatter changed, in processing order.
    pub changed: Vec<String>,
    /// Number of files forwarded unchanged.
    pub unchanged: usize,
    /// Files dropped because of a per-file error (only with keep-going).
    pub failed: Vec<String>,
    /// Files reported as unformatted in check mode.
    pub violations: Vec<String>,
}

impl RunSummary {
    /// Whether the run should exit successfully.
    pub fn is_success(&self, mode: Mode) -> bool {
        let clean = match mode {
            Mode::Write => true,
            Mode::Check => self.violations.is_empty(),
            Mode::ListDifferent => self.changed.is_empty(),
        };
        clean && self.failed.is_empty()
    }
}

/// Writes the end-of-run report for `mode`.
pub fn write_report(writer: &mut dyn Write, summary: &RunSummary, mode: Mode) -> io::Result<()> {
    debug!("Writing report: {:?}", summary);
    match mode {
        Mode::Write => {
            for path in &summary.changed {
                writeln!(writer, "{}", path)?;
            }
            writeln!(
                writer,
                "Formatted {} file(s), {} unchanged.",
                summary.changed.len(),
                summary.unchanged
            )?;
        }
        Mode::ListDifferent => {
            for path in &summary.changed {
                writeln!(writer, "{}", path)?;
            }
        }
        Mode::Check => {
            if summary.violations.is_empty() {
                if summary.failed.is_empty() {
                    writeln!(writer, "{}", CHECK_OK_MESSAGE)?;
                }
            } else {
                writeln!(writer, "{}", violation_report(&summary.violations))?;
            }
        }
    }
    if !summary.failed.is_empty() {
        writeln!(writer, "{} file(s) failed to format.", summary.failed.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CHECK_REPORT_HEADER;

    fn render(summary: &RunSummary, mode: Mode) -> String {
        let mut out = Vec::new();
        write_report(&mut out, summary, mode).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_write_mode_report() {
        let summary = RunSummary {
            changed: vec!["src/a.js".to_string()],
            unchanged: 2,
            ..Default::default()
        };
        assert_eq!(
            render(&summary, Mode::Write),
            "src/a.js\nFormatted 1 file(s), 2 unchanged.\n"
        );
        assert!(summary.is_success(Mode::Write));
        assert!(!summary.is_success(Mode::ListDifferent));
    }

    #[test]
    fn test_check_mode_report() {
        let clean = RunSummary::default();
        assert_eq!(render(&clean, Mode::Check), format!("{}\n", CHECK_OK_MESSAGE));
        assert!(clean.is_success(Mode::Check));

        let dirty = RunSummary {
            violations: vec!["src/a.js".to_string(), "src/c.js".to_string()],
            ..Default::default()
        };
        assert_eq!(
            render(&dirty, Mode::Check),
            format!("{}\nsrc/a.js\nsrc/c.js\n", CHECK_REPORT_HEADER)
        );
        assert!(!dirty.is_success(Mode::Check));
    }

    #[test]
    fn test_failures_reported_and_fail_the_run() {
        let summary = RunSummary {
            failed: vec!["src/bad.js".to_string()],
            ..Default::default()
        };
        assert!(render(&summary, Mode::Check).ends_with("1 file(s) failed to format.\n"));
        assert!(!summary.is_success(Mode::Write));
    }
}
