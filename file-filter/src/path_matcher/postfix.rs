// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::PathMatcherEngine;
use crate::error::AmbiguousPathError;
use crate::file::File;
use crate::segments;

struct Record {
    file: File,

    /// Lower-cased segments of the selected path.
    suffix: Vec<String>,

    /// Observed path recorded by the first successful match.
    matched: Option<PathBuf>,
}

/// Matches observed paths that end with a selected path, ignoring case.
pub(super) struct PostfixPathEngine {
    /// In construction order.
    records: Vec<Record>,

    /// Indices into `records`, keyed by lower-cased file name.
    by_file_name: HashMap<String, Vec<usize>>,
}

impl PostfixPathEngine {
    pub fn new(files: Vec<File>) -> Self {
        let mut records = Vec::with_capacity(files.len());
        let mut by_file_name: HashMap<String, Vec<usize>> = HashMap::new();

        for file in files {
            by_file_name
                .entry(file.file_name().to_lowercase())
                .or_default()
                .push(records.len());

            let suffix = segments::components(&file.path().to_string_lossy());

            records.push(Record {
                file,
                suffix,
                matched: None,
            });
        }

        Self {
            records,
            by_file_name,
        }
    }
}

impl PathMatcherEngine for PostfixPathEngine {
    fn match_path(&mut self, path: &Path) -> Result<Option<&File>, AmbiguousPathError> {
        let text = path.to_string_lossy();

        let Some(bucket) = segments::file_name(&text)
            .and_then(|name| self.by_file_name.get(&name.to_lowercase()))
        else {
            trace!("no source file named like `{}`", path.display());
            return Ok(None);
        };

        let components = segments::components(&text);

        // First match wins, even if a later record has a longer suffix.
        let Some(index) = bucket
            .iter()
            .copied()
            .find(|&index| segments::ends_with(&components, &self.records[index].suffix))
        else {
            trace!("no source file is a suffix of `{}`", path.display());
            return Ok(None);
        };

        let record = &mut self.records[index];

        let conflict = record
            .matched
            .as_ref()
            .filter(|matched| !eq_ignore_case(matched, path))
            .cloned();

        if let Some(matched) = conflict {
            return Err(AmbiguousPathError {
                candidate: record.file.path().to_owned(),
                matched,
                observed: path.to_owned(),
            });
        }

        if record.matched.is_none() {
            trace!("matched `{}` to `{}`", record.file, path.display());
            record.matched = Some(path.to_owned());
        }

        Ok(Some(&record.file))
    }

    fn unmatched_paths(&self) -> Vec<PathBuf> {
        self.records
            .iter()
            .filter(|record| record.matched.is_none())
            .map(|record| record.file.path().to_owned())
            .collect()
    }
}

fn eq_ignore_case(lhs: &Path, rhs: &Path) -> bool {
    lhs.to_string_lossy().to_lowercase() == rhs.to_string_lossy().to_lowercase()
}
