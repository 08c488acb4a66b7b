// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use file_filter::{AmbiguousPathError, PathMatcher};
use serde::Deserialize;
use thiserror::Error;

use crate::source::SourceCoverage;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    AmbiguousPath(#[from] AmbiguousPathError),

    #[error("source lines must be 1-indexed, got line 0 of `{}`", .path.display())]
    InvalidLine { path: PathBuf },
}

/// Source line surfaced by the debugger, as a path from debug info.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LineEvent {
    pub file: PathBuf,

    /// 1-indexed.
    pub line: u32,

    /// Execution count. Zero for a line that is instrumented but was not hit.
    #[serde(default)]
    pub hits: u32,
}

impl LineEvent {
    /// Load a JSON array of events.
    pub fn load_all(path: impl AsRef<Path>) -> anyhow::Result<Vec<Self>> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read line events: {}", path.display()))?;
        let events = serde_json::from_str(&text)
            .with_context(|| format!("invalid line events: {}", path.display()))?;

        Ok(events)
    }
}

/// Accumulates line execution counts for the source files selected by a
/// `PathMatcher`.
pub struct SourceCoverageRecorder {
    matcher: PathMatcher,

    /// Counts by line, keyed by selected path.
    files: BTreeMap<PathBuf, BTreeMap<u32, u32>>,
}

impl SourceCoverageRecorder {
    pub fn new(matcher: PathMatcher) -> Self {
        Self {
            matcher,
            files: BTreeMap::new(),
        }
    }

    /// Register an instrumented line, without counting an execution.
    ///
    /// Returns `false` if `path` is not a selected file, or `line` is not selected.
    pub fn add_line(&mut self, path: impl AsRef<Path>, line: u32) -> Result<bool, RecordError> {
        self.add_hits(path.as_ref(), line, 0)
    }

    /// Count one execution of a line.
    pub fn hit(&mut self, path: impl AsRef<Path>, line: u32) -> Result<bool, RecordError> {
        self.add_hits(path.as_ref(), line, 1)
    }

    /// Replay events in order, returning how many were recorded.
    ///
    /// Stops at the first error.
    pub fn record<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a LineEvent>,
    ) -> Result<usize, RecordError> {
        let mut recorded = 0;

        for event in events {
            if self.add_hits(&event.file, event.line, event.hits)? {
                recorded += 1;
            }
        }

        Ok(recorded)
    }

    fn add_hits(&mut self, path: &Path, line: u32, hits: u32) -> Result<bool, RecordError> {
        if line == 0 {
            return Err(RecordError::InvalidLine {
                path: path.to_owned(),
            });
        }

        let Some(file) = self.matcher.match_path(path)? else {
            return Ok(false);
        };

        if !file.is_line_selected(line) {
            trace!("skipping unselected line {} of `{}`", line, file);
            return Ok(false);
        }

        let count = self
            .files
            .entry(file.path().to_owned())
            .or_default()
            .entry(line)
            .or_insert(0);
        *count = count.saturating_add(hits);

        Ok(true)
    }

    /// Finish recording, warning about selected files that never matched.
    pub fn finish(self) -> RecordedCoverage {
        let unmatched = self.matcher.unmatched_paths();

        for path in &unmatched {
            warn!("no executed source file matched `{}`", path.display());
        }

        let counts = self
            .files
            .into_iter()
            .map(|(path, lines)| (path.to_string_lossy().into_owned(), lines))
            .collect();

        RecordedCoverage {
            coverage: SourceCoverage::from_counts(counts),
            unmatched,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedCoverage {
    pub coverage: SourceCoverage,

    /// Selected files which never matched an observed path.
    pub unmatched: Vec<PathBuf>,
}
