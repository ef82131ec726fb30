//! Batch driver: resolves input files, redacts each one, writes the outputs
//! next to the inputs and keeps a success tally.
//!
//! Every failure here is file-scoped. It is reported with the offending path
//! and the batch moves on to the next file.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use ticketscrub_core::{export_to_csv, RedactionSummary, ScrubError, Scrubber};

use crate::ui::output_format::{self, MessageKind};
use crate::ui::redaction_summary;

/// Where the batch takes its inputs from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchInput {
    Files(Vec<PathBuf>),
    Directory(PathBuf),
}

/// Options for a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrubOptions {
    pub export_csv: bool,
    pub show_summary: bool,
    pub quiet: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub attempted: usize,
}

/// What processing a single file produced.
#[derive(Debug)]
pub struct FileReport {
    pub output_path: PathBuf,
    pub csv_path: Option<PathBuf>,
    /// Set when `--csv` was requested but the export failed; the JSON output
    /// was still written.
    pub csv_error: Option<ScrubError>,
    pub summary: RedactionSummary,
}

fn emit(kind: MessageKind, message: &str, opts: &ScrubOptions) {
    let quiet_ok = matches!(kind, MessageKind::Error | MessageKind::Warn);
    if opts.quiet && !quiet_ok {
        return;
    }
    let stderr = io::stderr();
    let colors = stderr.is_terminal();
    let _ = output_format::print_message(&mut stderr.lock(), kind, message, colors);
}

/// `dir/name.json` -> `dir/redacted_name.json`.
pub fn redacted_output_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("redacted_{file_name}"))
}

/// The CSV sibling of a redacted JSON output.
pub fn csv_output_path(output: &Path) -> PathBuf {
    output.with_extension("csv")
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("json"))
}

/// Lists regular `*.json` files directly inside `dir`, sorted by path.
pub fn discover_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to list directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read an entry of {}", dir.display()))?
            .path();
        if path.is_file() && has_json_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    debug!("Found {} JSON files in {}", files.len(), dir.display());
    Ok(files)
}

pub fn read_document(path: &Path) -> Result<Value, ScrubError> {
    let file = File::open(path).map_err(|source| ScrubError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ScrubError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `document` as two-space indented JSON with a trailing newline.
pub fn write_document(path: &Path, document: &Value) -> Result<(), ScrubError> {
    let write_error = |source: io::Error| ScrubError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
    serde_json::to_writer_pretty(&mut writer, document).map_err(|e| write_error(e.into()))?;
    writeln!(writer).map_err(write_error)?;
    writer.flush().map_err(write_error)
}

/// Redacts one file and writes `redacted_<name>` (and, optionally, its CSV).
///
/// Read, parse and JSON write failures are returned as errors. A failed CSV
/// export is recorded in the report instead, since the redacted JSON exists.
pub fn process_json_file(scrubber: &Scrubber, path: &Path, export_csv: bool) -> Result<FileReport, ScrubError> {
    let document = read_document(path)?;
    let (redacted, summary) = scrubber.redact_document(&document);
    info!(
        "Redacted {} ({} replacements)",
        path.display(),
        summary.total()
    );

    let output_path = redacted_output_path(path);
    write_document(&output_path, &redacted)?;

    let (csv_path, csv_error) = if export_csv {
        let csv_path = csv_output_path(&output_path);
        match export_to_csv(&redacted, &csv_path) {
            Ok(_) => (Some(csv_path), None),
            Err(e) => (None, Some(e)),
        }
    } else {
        (None, None)
    };

    Ok(FileReport {
        output_path,
        csv_path,
        csv_error,
        summary,
    })
}

fn process_and_report(scrubber: &Scrubber, path: &Path, opts: &ScrubOptions) -> bool {
    match process_json_file(scrubber, path, opts.export_csv) {
        Ok(report) => {
            emit(
                MessageKind::Success,
                &format!("Redacted file saved as: {}", report.output_path.display()),
                opts,
            );
            if let Some(csv_path) = &report.csv_path {
                emit(MessageKind::Success, &format!("CSV export saved as: {}", csv_path.display()), opts);
            }
            if let Some(e) = &report.csv_error {
                error!("CSV export for {} failed: {}", path.display(), e);
                emit(MessageKind::Error, &format!("Error exporting to CSV: {e}"), opts);
            }
            if opts.show_summary && !opts.quiet {
                let _ = redaction_summary::print_summary(
                    &report.summary,
                    &path.display().to_string(),
                    &mut io::stderr().lock(),
                );
            }
            true
        }
        Err(e) => {
            error!("Processing {} failed: {}", path.display(), e);
            emit(MessageKind::Error, &format!("Error processing file {}: {e}", path.display()), opts);
            false
        }
    }
}

/// Runs the whole batch and prints the tally line to stdout.
pub fn run_scrub(scrubber: &Scrubber, input: &BatchInput, opts: &ScrubOptions) -> BatchReport {
    let mut report = BatchReport::default();

    match input {
        BatchInput::Files(paths) => {
            report.attempted = paths.len();
            for path in paths {
                if !path.is_file() {
                    emit(MessageKind::Error, &format!("{} is not a valid file", path.display()), opts);
                    continue;
                }
                if !has_json_extension(path) {
                    warn!("Input {} has no .json extension", path.display());
                    emit(
                        MessageKind::Warn,
                        &format!("{} does not appear to be a .json file", path.display()),
                        opts,
                    );
                }
                if process_and_report(scrubber, path, opts) {
                    report.succeeded += 1;
                }
            }
        }
        BatchInput::Directory(dir) => {
            if !dir.is_dir() {
                emit(MessageKind::Error, &format!("{} is not a valid directory", dir.display()), opts);
                return report;
            }
            let files = match discover_json_files(dir) {
                Ok(files) => files,
                Err(e) => {
                    emit(MessageKind::Error, &format!("{e:#}"), opts);
                    return report;
                }
            };
            if files.is_empty() {
                emit(MessageKind::Warn, &format!("No JSON files found in {}", dir.display()), opts);
                return report;
            }
            report.attempted = files.len();
            for path in &files {
                if process_and_report(scrubber, path, opts) {
                    report.succeeded += 1;
                }
            }
        }
    }

    println!(
        "Successfully processed {} out of {} files",
        report.succeeded, report.attempted
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn output_paths_are_siblings() {
        let out = redacted_output_path(Path::new("/data/export.json"));
        assert_eq!(out, PathBuf::from("/data/redacted_export.json"));
        assert_eq!(csv_output_path(&out), PathBuf::from("/data/redacted_export.csv"));
    }

    #[test]
    fn csv_path_only_touches_the_extension() {
        let out = redacted_output_path(Path::new("/json.files/a.json"));
        assert_eq!(csv_output_path(&out), PathBuf::from("/json.files/redacted_a.csv"));
    }

    #[test]
    fn discovery_is_flat_sorted_and_case_insensitive() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.json"), "{}")?;
        fs::write(dir.path().join("A.JSON"), "{}")?;
        fs::write(dir.path().join("notes.txt"), "x")?;
        fs::create_dir(dir.path().join("nested.json"))?;
        fs::write(dir.path().join("nested.json").join("c.json"), "{}")?;

        let files = discover_json_files(dir.path())?;
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.JSON", "b.json"]);
        Ok(())
    }

    #[test]
    fn process_json_file_writes_redacted_copy_and_csv() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("tickets.json");
        fs::write(&input, r#"[{"id": 1, "email": "a@example.com", "ip_address": "1.1.1.1"}]"#)?;

        let scrubber = Scrubber::with_default_rules()?;
        let report = process_json_file(&scrubber, &input, true)?;

        let written: Value = serde_json::from_str(&fs::read_to_string(&report.output_path)?)?;
        assert_eq!(
            written,
            json!([{"id": 1, "email": "[REDACTED EMAIL]", "ip_address": "[REDACTED IP]"}])
        );
        let csv = fs::read_to_string(report.csv_path.expect("csv written"))?;
        assert_eq!(csv, "email,id,ip_address\n[REDACTED EMAIL],1,[REDACTED IP]\n");
        assert_eq!(report.summary.occurrences_of("email"), 1);
        Ok(())
    }

    #[test]
    fn integers_wider_than_u64_are_written_back_verbatim() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("big.json");
        fs::write(&input, r#"{"id": 123456789012345678901234567890, "note": "hi"}"#)?;

        let scrubber = Scrubber::with_default_rules()?;
        let report = process_json_file(&scrubber, &input, true)?;

        let written = fs::read_to_string(&report.output_path)?;
        assert_eq!(
            written,
            "{\n  \"id\": 123456789012345678901234567890,\n  \"note\": \"hi\"\n}\n"
        );
        let csv = fs::read_to_string(report.csv_path.expect("csv written"))?;
        assert_eq!(csv, "id,note\n123456789012345678901234567890,hi\n");
        Ok(())
    }

    #[test]
    fn csv_failure_does_not_fail_the_file() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("empty.json");
        fs::write(&input, "[]")?;

        let scrubber = Scrubber::with_default_rules()?;
        let report = process_json_file(&scrubber, &input, true)?;

        assert!(report.output_path.exists());
        assert!(report.csv_path.is_none());
        assert!(matches!(report.csv_error, Some(ScrubError::NoItems)));
        Ok(())
    }

    #[test]
    fn invalid_json_is_a_parse_error() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("broken.json");
        fs::write(&input, "{not json")?;

        let scrubber = Scrubber::with_default_rules()?;
        let err = process_json_file(&scrubber, &input, false).unwrap_err();
        assert!(matches!(err, ScrubError::Parse { .. }));
        assert!(!redacted_output_path(&input).exists());
        Ok(())
    }
}
