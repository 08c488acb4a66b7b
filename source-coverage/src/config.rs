// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use file_filter::{File, PathMatcher};
use serde::Deserialize;

/// Options for a source coverage run.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Common root of all `sources`.
    ///
    /// If set, observed paths must equal the root joined with a source path.
    /// Otherwise, source paths are matched as case-insensitive path suffixes.
    pub source_root: Option<PathBuf>,

    /// Source files selected for coverage.
    pub sources: Vec<SourceFile>,

    /// Treat sources that never matched an observed path as a failure.
    pub fail_on_unmatched: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceFile {
    pub path: PathBuf,

    /// 1-indexed lines of interest. All lines if absent.
    #[serde(default)]
    pub lines: Option<BTreeSet<u32>>,
}

impl SourceFile {
    pub fn to_file(&self) -> Result<File> {
        let file = match &self.lines {
            Some(lines) => {
                if lines.contains(&0) {
                    bail!(
                        "source lines must be 1-indexed: `{}`",
                        self.path.display()
                    );
                }

                File::with_selected_lines(&self.path, lines.iter().copied())?
            }
            None => File::new(&self.path)?,
        };

        Ok(file)
    }
}

impl Options {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read options: {}", path.display()))?;

        Self::parse(&text).with_context(|| format!("invalid options: {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn files(&self) -> Result<Vec<File>> {
        self.sources.iter().map(SourceFile::to_file).collect()
    }

    /// Build a matcher that takes ownership of the selected source files.
    pub fn matcher(&self) -> Result<PathMatcher> {
        let files = self.files()?;
        Ok(PathMatcher::new(files, self.source_root.as_deref()))
    }
}
