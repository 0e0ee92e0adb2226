use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::file_lock::ExclusiveLock;
use crate::core::errors::{GateError, Result};
use crate::core::models::audit_entry::AuditEntry;
use crate::core::traits::audit::AuditLog;

/// Audit log that appends entries as JSON lines to a shared file.
///
/// Each line is a self-contained JSON object representing one
/// `AuditEntry`. Writers serialize through an exclusive `flock` held only
/// around the write itself; readers take no lock.
pub struct NdjsonAuditLog {
    log_path: PathBuf,
}

impl NdjsonAuditLog {
    /// Create a log backed by `log_path`. Nothing is touched on disk until
    /// the first append.
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
        }
    }

    /// Create a log from the `[audit]` section, falling back to the default
    /// location when the section is missing.
    pub fn from_config(audit_section: Option<&crate::config::app_config::AuditSection>) -> Self {
        let log_file = audit_section
            .map(|a| a.log_file.as_str())
            .unwrap_or(crate::config::app_config::DEFAULT_LOG_FILE);
        Self::new(log_file)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

impl AuditLog for NdjsonAuditLog {
    fn append(&self, entry: &AuditEntry) -> Result<()> {
        let mut line = serde_json::to_string(entry).map_err(|e| GateError::AuditError {
            detail: format!("Failed to serialize audit entry: {e}"),
        })?;
        line.push('\n');

        if let Some(parent) = self.log_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| GateError::AuditError {
                detail: format!("Cannot open audit log at {}: {e}", self.log_path.display()),
            })?;

        let lock = ExclusiveLock::acquire(&file).map_err(|e| GateError::AuditError {
            detail: format!("Cannot lock audit log: {e}"),
        })?;

        // One write_all per line so the whole record lands in a single append.
        let mut writer = &file;
        writer
            .write_all(line.as_bytes())
            .and_then(|()| file.sync_data())
            .map_err(|e| GateError::AuditError {
                detail: format!("Failed to write audit entry: {e}"),
            })?;

        lock.release().map_err(|e| GateError::AuditError {
            detail: format!("Cannot unlock audit log: {e}"),
        })?;

        debug!(activity = %entry.activity, path = %self.log_path.display(), "audit entry appended");
        Ok(())
    }

    fn read_all(&self, filter: Option<&str>) -> Result<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Err(GateError::NotFound {
                what: "Log file".into(),
                path: self.log_path.display().to_string(),
            });
        }

        let file = fs::File::open(&self.log_path).map_err(|e| GateError::AuditError {
            detail: format!("Cannot read audit log: {e}"),
        })?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| GateError::AuditError {
                detail: format!("Error reading audit log line {}: {e}", line_num + 1),
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            // A single bad line fails the whole read.
            let entry: AuditEntry =
                serde_json::from_str(trimmed).map_err(|e| GateError::AuditError {
                    detail: format!("Malformed audit entry at line {}: {e}", line_num + 1),
                })?;
            if !entry.details_match_activity() {
                return Err(GateError::AuditError {
                    detail: format!(
                        "Malformed audit entry at line {}: fields do not match activity '{}'",
                        line_num + 1,
                        entry.activity
                    ),
                });
            }

            if let Some(activity) = filter
                && entry.activity.as_str() != activity
            {
                continue;
            }

            entries.push(entry);
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::identity::fixed_identity::FixedIdentity;
    use crate::core::models::audit_entry::{Activity, ActivityDetails};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sample_entry(activity: Activity, path: &str) -> AuditEntry {
        AuditEntry::file(activity, path, &FixedIdentity::default())
    }

    fn full_path(entry: &AuditEntry) -> Option<&str> {
        match &entry.details {
            ActivityDetails::File { full_path } => Some(full_path),
            _ => None,
        }
    }

    fn temp_log() -> (TempDir, NdjsonAuditLog) {
        let tmp = TempDir::new().unwrap();
        let log = NdjsonAuditLog::new(tmp.path().join("log").join("activity_log.json"));
        (tmp, log)
    }

    #[test]
    fn append_and_read_round_trip() {
        let (_tmp, log) = temp_log();

        let first = sample_entry(Activity::Create, "/tmp/a");
        let last = sample_entry(Activity::Delete, "/tmp/b");
        log.append(&first).unwrap();
        log.append(&last).unwrap();

        let results = log.read_all(None).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results.last(), Some(&last));
    }

    #[test]
    fn append_creates_parent_directory() {
        let (_tmp, log) = temp_log();
        assert!(!log.path().exists());

        log.append(&sample_entry(Activity::Create, "/tmp/a")).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn each_entry_is_one_line() {
        let (_tmp, log) = temp_log();
        log.append(&sample_entry(Activity::Create, "/tmp/a")).unwrap();
        log.append(&sample_entry(Activity::Update, "/tmp/a")).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.ends_with('\n'));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn filter_keeps_matching_activity_in_order() {
        let (_tmp, log) = temp_log();
        log.append(&sample_entry(Activity::Create, "/tmp/first")).unwrap();
        log.append(&sample_entry(Activity::Delete, "/tmp/second")).unwrap();
        log.append(&sample_entry(Activity::Create, "/tmp/third")).unwrap();

        let creates = log.read_all(Some("create")).unwrap();
        assert_eq!(creates.len(), 2);
        assert_eq!(full_path(&creates[0]), Some("/tmp/first"));
        assert_eq!(full_path(&creates[1]), Some("/tmp/third"));
    }

    #[test]
    fn filter_without_matches_returns_empty() {
        let (_tmp, log) = temp_log();
        log.append(&sample_entry(Activity::Create, "/tmp/a")).unwrap();

        assert!(log.read_all(Some("network_send")).unwrap().is_empty());
        assert!(log.read_all(Some("CREATE")).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_tmp, log) = temp_log();
        let err = log.read_all(None).unwrap_err();
        assert!(matches!(err, GateError::NotFound { .. }));
        assert_eq!(err.to_string(), "Log file not found");
    }

    #[test]
    fn empty_lines_are_skipped() {
        let (_tmp, log) = temp_log();
        log.append(&sample_entry(Activity::Create, "/tmp/a")).unwrap();
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        drop(file);
        log.append(&sample_entry(Activity::Delete, "/tmp/a")).unwrap();

        assert_eq!(log.read_all(None).unwrap().len(), 2);
    }

    #[test]
    fn malformed_line_fails_whole_read() {
        let (_tmp, log) = temp_log();
        log.append(&sample_entry(Activity::Create, "/tmp/a")).unwrap();
        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, "{{\"timestamp\": truncated").unwrap();
        drop(file);

        let err = log.read_all(None).unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn fields_disagreeing_with_activity_fail_whole_read() {
        let common = r#""timestamp":"2024-01-01T00:00:00Z","username":"u","process_name":"p","command_line":"c","process_id":1"#;
        let mismatches = [
            format!(r#"{{{common},"activity":"create"}}"#),
            format!(r#"{{{common},"activity":"network_send","full_path":"/tmp/a"}}"#),
        ];

        for line in mismatches {
            let (_tmp, log) = temp_log();
            log.append(&sample_entry(Activity::Create, "/tmp/a")).unwrap();
            let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
            writeln!(file, "{line}").unwrap();
            drop(file);

            let err = log.read_all(None).unwrap_err();
            assert!(matches!(err, GateError::AuditError { .. }), "got {err:?}");
            assert!(err.to_string().contains("line 2"), "got: {err}");
        }
    }

    #[test]
    fn concurrent_appends_never_interleave() {
        const WRITERS: usize = 64;
        let (_tmp, log) = temp_log();
        let log = Arc::new(log);

        let handles: Vec<_> = (0..WRITERS)
            .map(|i| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    // Long paths make torn writes visible if locking breaks.
                    let marker = format!("/tmp/marker-{i:03}-{}", "x".repeat(2048));
                    log.append(&sample_entry(Activity::Create, &marker)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), WRITERS);
        for line in &lines {
            serde_json::from_str::<AuditEntry>(line).expect("every line parses on its own");
        }

        let mut markers: Vec<String> = log
            .read_all(None)
            .unwrap()
            .iter()
            .filter_map(|e| full_path(e).map(|p| p[..16].to_string()))
            .collect();
        markers.sort();
        markers.dedup();
        assert_eq!(markers.len(), WRITERS);
    }
}
