//! One linear pass over an upload batch: extract each file, skip the ones that
//! fail, then filter and tabulate the aggregate text.

use std::path::Path;

use content_extractor::{ExtractLimits, ExtractorStack, FailureKind};
use core_types::{MediaType, UploadedFile, display_name};
use serde::Serialize;
use tracing::{info, warn};
use word_filter::{StopwordSet, WordCount, count_words, filter_stopwords};

/// Separator between documents in the aggregate.
const DOCUMENT_SEPARATOR: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Extracted { chars: usize, truncated: bool },
    Empty,
    Failed { kind: FailureKind, message: String },
}

/// Per-file report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub name: String,
    pub media_type: MediaType,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl FileOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self.status, OutcomeStatus::Extracted { .. })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    pub filtered_text: String,
    pub word_counts: Vec<WordCount>,
}

impl BatchReport {
    /// Nothing to render: no file yielded a surviving word.
    pub fn is_empty(&self) -> bool {
        self.word_counts.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_failed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

/// Collects extracted text file by file; [`BatchRunner::finish`] filters it.
pub struct BatchRunner<'a> {
    stack: &'a ExtractorStack,
    limits: ExtractLimits,
    outcomes: Vec<FileOutcome>,
    documents: Vec<String>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(stack: &'a ExtractorStack, limits: ExtractLimits) -> Self {
        Self {
            stack,
            limits,
            outcomes: Vec::new(),
            documents: Vec::new(),
        }
    }

    pub fn ingest(&mut self, file: &UploadedFile) -> &FileOutcome {
        let status = match self.stack.extract_file(file, self.limits) {
            Ok(content) if content.text.trim().is_empty() => {
                info!(file = %file.name, extractor = content.extractor, "no text extracted");
                OutcomeStatus::Empty
            }
            Ok(content) => {
                let chars = content.text.chars().count();
                if content.truncated {
                    warn!(file = %file.name, max_chars = self.limits.max_chars, "text truncated");
                }
                let truncated = content.truncated;
                self.documents.push(content.text);
                OutcomeStatus::Extracted { chars, truncated }
            }
            Err(err) => {
                warn!(
                    file = %file.name,
                    media_type = %file.media_type,
                    error = %err,
                    "skipping file"
                );
                OutcomeStatus::Failed {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        };
        self.push(FileOutcome {
            name: file.name.clone(),
            media_type: file.media_type.clone(),
            status,
        })
    }

    /// Read `path` and ingest it. A read error becomes a failed outcome.
    pub fn ingest_path(&mut self, path: &Path) -> &FileOutcome {
        match UploadedFile::from_path(path) {
            Ok(file) => self.ingest(&file),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read file");
                self.push(FileOutcome {
                    name: display_name(path),
                    media_type: MediaType::from_path(path),
                    status: OutcomeStatus::Failed {
                        kind: FailureKind::Unreadable,
                        message: format!("io error: {err}"),
                    },
                })
            }
        }
    }

    pub fn finish(self, stopwords: &StopwordSet) -> BatchReport {
        let text = aggregate_text(&self.documents);
        let filtered_text = filter_stopwords(&text, stopwords);
        let word_counts = count_words(&filtered_text);
        let report = BatchReport {
            outcomes: self.outcomes,
            filtered_text,
            word_counts,
        };
        info!(
            files = report.outcomes.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            distinct_words = report.word_counts.len(),
            "batch finished"
        );
        report
    }

    fn push(&mut self, outcome: FileOutcome) -> &FileOutcome {
        let idx = self.outcomes.len();
        self.outcomes.push(outcome);
        &self.outcomes[idx]
    }
}

/// Join extracted documents so tokens never fuse across file boundaries.
pub fn aggregate_text<S: AsRef<str>>(documents: &[S]) -> String {
    let mut out = String::new();
    for (i, doc) in documents.iter().enumerate() {
        if i > 0 {
            out.push_str(DOCUMENT_SEPARATOR);
        }
        out.push_str(doc.as_ref());
    }
    out
}

/// Run a whole in-memory batch with the default extractor stack.
pub fn process_batch(
    files: &[UploadedFile],
    stopwords: &StopwordSet,
    limits: ExtractLimits,
) -> BatchReport {
    info!(files = files.len(), stopwords = stopwords.len(), "batch started");
    let stack = ExtractorStack::with_defaults();
    let mut runner = BatchRunner::new(&stack, limits);
    for file in files {
        runner.ingest(file);
    }
    runner.finish(stopwords)
}
