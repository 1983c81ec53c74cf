//! Catalog statistics for a status line.
//!
//! The host shows a one-line summary such as
//! `"12 translated messages, 2 fuzzy translations, 3 untranslated messages."`.
//! It can come from `msgfmt --statistics` or from walking the catalog with
//! the navigator.
//!
//! # Example
//!
//! ```ignore
//! use po_navigator::status::{MsgfmtStatistics, StatisticsProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MsgfmtStatistics::new("msgfmt");
//!     if let Some(line) = provider.statistics("po/fr.po".as_ref()).await? {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{NavError, NavResult};
use crate::lines::{Document, LineSource};
use crate::message::is_untranslated;
use crate::navigator::messages;

/// Source of the status-line summary for a catalog file.
#[async_trait]
pub trait StatisticsProvider: Send + Sync {
    /// `Ok(None)` when there is nothing to show.
    async fn statistics(&self, path: &Path) -> NavResult<Option<String>>;
}

/// Runs `msgfmt --statistics -o /dev/null <path>`.
#[derive(Debug, Clone)]
pub struct MsgfmtStatistics {
    program: String,
}

impl MsgfmtStatistics {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl StatisticsProvider for MsgfmtStatistics {
    async fn statistics(&self, path: &Path) -> NavResult<Option<String>> {
        let output = Command::new(&self.program)
            .arg("--statistics")
            .arg("-o")
            .arg("/dev/null")
            .arg(path)
            .output()
            .await
            .map_err(|e| {
                NavError::Statistics(format!("Failed to run '{}': {}", self.program, e))
            })?;

        debug!(program = %self.program, status = %output.status, "statistics tool finished");

        // msgfmt reports statistics on stderr
        let summary = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Ok((!summary.is_empty()).then_some(summary))
    }
}

/// Message counts by translation state. The header entry is not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub translated: usize,
    pub fuzzy: usize,
    pub untranslated: usize,
}

impl CatalogCounts {
    pub fn from_document<D: LineSource + ?Sized>(document: &D) -> Self {
        let mut counts = CatalogCounts::default();
        for message in messages(document).filter(|m| !m.is_header()) {
            if message.is_fuzzy {
                counts.fuzzy += 1;
            } else if is_untranslated(&message) {
                counts.untranslated += 1;
            } else {
                counts.translated += 1;
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.translated + self.fuzzy + self.untranslated
    }
}

fn count_label(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

impl std::fmt::Display for CatalogCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = vec![count_label(
            self.translated,
            "translated message",
            "translated messages",
        )];
        if self.fuzzy > 0 {
            parts.push(count_label(self.fuzzy, "fuzzy translation", "fuzzy translations"));
        }
        if self.untranslated > 0 {
            parts.push(count_label(
                self.untranslated,
                "untranslated message",
                "untranslated messages",
            ));
        }
        write!(f, "{}.", parts.join(", "))
    }
}

/// Counts messages with the navigator instead of an external tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogStatistics;

#[async_trait]
impl StatisticsProvider for CatalogStatistics {
    async fn statistics(&self, path: &Path) -> NavResult<Option<String>> {
        let document = Document::open(path)?;
        let counts = CatalogCounts::from_document(&document);
        Ok((counts.total() > 0).then(|| counts.to_string()))
    }
}

/// Returns a canned summary; for tests and hosts without a catalog on disk.
#[derive(Debug, Clone, Default)]
pub struct FixedStatistics {
    summary: Option<String>,
}

impl FixedStatistics {
    pub fn new(summary: Option<&str>) -> Self {
        Self {
            summary: summary.map(str::to_string),
        }
    }
}

#[async_trait]
impl StatisticsProvider for FixedStatistics {
    async fn statistics(&self, _path: &Path) -> NavResult<Option<String>> {
        Ok(self.summary.clone())
    }
}
