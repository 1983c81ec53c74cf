//! Go-to-source for `#: path:line` reference comments.

use std::path::{Path, PathBuf};

use globset::Glob;
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{NavError, NavResult};
use crate::focus::Position;
use crate::lines::LineSource;

/// A `path:line` pair from a reference comment; `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReference {
    pub path: String,
    pub line: usize,
}

/// A resolved reference: a workspace file and a zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: PathBuf,
    pub position: Position,
}

/// Extract every `path:line` reference from a `#: ` comment line.
///
/// Tokens that are not exactly `path:number` are ignored.
pub fn parse_references(text: &str) -> Vec<SourceReference> {
    let Some(rest) = text.strip_prefix("#: ") else {
        return Vec::new();
    };
    rest.split_whitespace()
        .filter_map(|token| {
            let (path, line) = token.split_once(':')?;
            if path.is_empty() || line.contains(':') {
                return None;
            }
            let line = line.parse::<usize>().ok()?;
            Some(SourceReference {
                path: path.to_string(),
                line,
            })
        })
        .collect()
}

fn is_skipped_dir(name: &str) -> bool {
    name == ".git" || name == "target"
}

/// Find the workspace files matching `reference.path`.
///
/// The path is treated as a glob relative to `workspace`, the way editors
/// resolve workspace file searches.
pub fn resolve_reference(
    workspace: &Path,
    reference: &SourceReference,
) -> NavResult<Vec<Location>> {
    let matcher = Glob::new(&reference.path)
        .map_err(|e| NavError::Reference(format!("Invalid path '{}': {}", reference.path, e)))?
        .compile_matcher();
    let position = Position::new(reference.line.saturating_sub(1), 0);

    let mut locations = Vec::new();
    let walker = WalkDir::new(workspace)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && entry.file_name().to_str().is_some_and(is_skipped_dir))
        });
    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(workspace) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if matcher.is_match(&relative) {
            locations.push(Location {
                path: entry.path().to_path_buf(),
                position,
            });
        }
    }

    debug!(
        reference = %reference.path,
        matches = locations.len(),
        "source reference resolved"
    );
    Ok(locations)
}

/// Resolve every reference on `line` of `document`.
pub fn provide_definition<D: LineSource + ?Sized>(
    document: &D,
    line: usize,
    workspace: &Path,
) -> NavResult<Vec<Location>> {
    let Some(text) = document.line_at(line) else {
        return Err(NavError::InvalidLine(format!(
            "line {} is outside the document ({} lines)",
            line,
            document.line_count()
        )));
    };

    let mut locations = Vec::new();
    for reference in parse_references(&text.text) {
        locations.extend(resolve_reference(workspace, &reference)?);
    }
    Ok(locations)
}
