//! Document file watcher for live re-validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::codec;
use crate::validation::{Advisory, ValidationErrors, ValidationOptions};

/// Result of reading and validating one document file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Valid { advisories: Vec<Advisory> },
    Invalid { errors: ValidationErrors },
    /// The file could not be read or is not a JSON document.
    Unreadable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentCheck {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl DocumentCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Valid { .. })
    }
}

/// Read `path`, import it and run every rule.
pub fn check_file(path: &Path, options: &ValidationOptions) -> DocumentCheck {
    let outcome = match fs::read(path) {
        Err(e) => CheckOutcome::Unreadable {
            reason: e.to_string(),
        },
        Ok(bytes) => match codec::deserialize_bytes(&bytes) {
            Err(e) => CheckOutcome::Unreadable {
                reason: e.to_string(),
            },
            Ok(imported) => match imported.validate(options) {
                Ok(validated) => CheckOutcome::Valid {
                    advisories: validated.advisories().to_vec(),
                },
                Err(errors) => CheckOutcome::Invalid { errors },
            },
        },
    };

    DocumentCheck {
        path: path.to_path_buf(),
        outcome,
    }
}

/// A watcher that re-checks a document file whenever it changes.
pub struct DocumentWatcher {
    path: PathBuf,
    options: ValidationOptions,
    report_tx: mpsc::UnboundedSender<DocumentCheck>,
}

impl DocumentWatcher {
    /// Create a new DocumentWatcher.
    ///
    /// Returns the watcher and a receiver for check results.
    pub fn new(
        path: &Path,
        options: ValidationOptions,
    ) -> (Self, mpsc::UnboundedReceiver<DocumentCheck>) {
        let (report_tx, report_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                options,
                report_tx,
            },
            report_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.report_tx.clone();
        let path = self.path.clone();
        let options = self.options.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(path = ?path, "Document change detected, re-checking");
                        let check = check_file(&path, &options);
                        if let CheckOutcome::Unreadable { reason } = &check.outcome {
                            tracing::error!("Failed to read document: {}", reason);
                        }
                        let _ = tx.send(check);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Document watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::new_root;

    fn write_document(path: &Path, registration: &str) {
        fs::write(path, codec::serialize(&new_root(registration))).unwrap();
    }

    #[test]
    fn test_check_file_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ABCDE.json");
        let options = ValidationOptions::default();

        assert!(matches!(
            check_file(&path, &options).outcome,
            CheckOutcome::Unreadable { .. }
        ));

        write_document(&path, "ABCDE");
        assert!(check_file(&path, &options).is_valid());

        write_document(&path, "AB");
        match check_file(&path, &options).outcome {
            CheckOutcome::Invalid { errors } => assert_eq!(errors.len(), 1),
            other => panic!("expected invalid, got {:?}", other),
        }

        fs::write(&path, "{ \"registration\": ").unwrap();
        assert!(matches!(
            check_file(&path, &options).outcome,
            CheckOutcome::Unreadable { .. }
        ));
    }

    #[test]
    fn test_check_serializes_with_status() {
        let check = DocumentCheck {
            path: PathBuf::from("a.json"),
            outcome: CheckOutcome::Valid {
                advisories: Vec::new(),
            },
        };
        assert_eq!(
            serde_json::to_value(&check).unwrap(),
            serde_json::json!({ "path": "a.json", "status": "valid", "advisories": [] })
        );
    }

    #[tokio::test]
    async fn test_watcher_reports_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        write_document(&path, "ABCDE");

        let (watcher, mut rx) = DocumentWatcher::new(&path, ValidationOptions::default());
        let _handle = watcher.run().unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        write_document(&path, "AB");

        let check = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(check.path, path);
    }
}
