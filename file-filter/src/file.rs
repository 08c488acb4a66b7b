// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::FileError;
use crate::segments;

/// Source file selected by a filter, to be matched against observed paths.
///
/// Guaranteed to have a file name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct File {
    path: PathBuf,
    file_name: String,

    /// Lines of interest, or `None` if every line is selected.
    selected_lines: Option<BTreeSet<u32>>,
}

impl File {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let path = path.into();
        let file_name = segments::file_name(&path.to_string_lossy())
            .map(str::to_owned)
            .ok_or_else(|| FileError::MissingFileName { path: path.clone() })?;

        Ok(Self {
            path,
            file_name,
            selected_lines: None,
        })
    }

    /// Construct a file for which only `lines` (1-indexed) are of interest.
    pub fn with_selected_lines(
        path: impl Into<PathBuf>,
        lines: impl IntoIterator<Item = u32>,
    ) -> Result<Self, FileError> {
        let mut file = Self::new(path)?;
        file.selected_lines = Some(lines.into_iter().collect());
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn is_line_selected(&self, line: u32) -> bool {
        match &self.selected_lines {
            Some(lines) => lines.contains(&line),
            None => true,
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
