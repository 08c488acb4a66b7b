// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::btree_map::{BTreeMap, Entry};
use std::path::{Path, PathBuf};

use super::PathMatcherEngine;
use crate::error::AmbiguousPathError;
use crate::file::File;

struct Record {
    file: File,
    matched: bool,
}

/// Matches observed paths equal to a known root joined with a selected path.
///
/// Comparison is component-wise and case-sensitive.
pub(super) struct FullPathEngine {
    records: BTreeMap<PathBuf, Record>,
}

impl FullPathEngine {
    pub fn new(root: &Path, files: Vec<File>) -> Self {
        let mut records = BTreeMap::new();

        for file in files {
            match records.entry(root.join(file.path())) {
                Entry::Vacant(entry) => {
                    entry.insert(Record {
                        file,
                        matched: false,
                    });
                }
                Entry::Occupied(entry) => {
                    debug!("ignoring duplicate source file `{}`", entry.key().display());
                }
            }
        }

        Self { records }
    }
}

impl PathMatcherEngine for FullPathEngine {
    fn match_path(&mut self, path: &Path) -> Result<Option<&File>, AmbiguousPathError> {
        let Some(record) = self.records.get_mut(path) else {
            trace!("no source file for `{}`", path.display());
            return Ok(None);
        };

        record.matched = true;

        Ok(Some(&record.file))
    }

    fn unmatched_paths(&self) -> Vec<PathBuf> {
        self.records
            .values()
            .filter(|record| !record.matched)
            .map(|record| record.file.path().to_owned())
            .collect()
    }
}
