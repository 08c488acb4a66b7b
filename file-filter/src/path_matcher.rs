// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::{Path, PathBuf};

use crate::error::AmbiguousPathError;
use crate::file::File;

mod full;
mod postfix;

use self::full::FullPathEngine;
use self::postfix::PostfixPathEngine;

trait PathMatcherEngine {
    fn match_path(&mut self, path: &Path) -> Result<Option<&File>, AmbiguousPathError>;

    fn unmatched_paths(&self) -> Vec<PathBuf>;
}

/// Reconciles filter-selected source files with the paths reported by debug info.
///
/// When a common root of the selected files is known, an observed path must be
/// exactly `root` joined with a selected path. Otherwise, an observed path
/// matches a selected file when its trailing segments equal the selected path,
/// ignoring case. In that mode, a selected file matched by two different
/// observed paths is an error.
pub struct PathMatcher {
    engine: Box<dyn PathMatcherEngine>,
}

impl PathMatcher {
    pub fn new(files: Vec<File>, root: Option<&Path>) -> Self {
        let engine: Box<dyn PathMatcherEngine> = match root {
            Some(root) => {
                debug!(
                    "matching {} source files by full path under `{}`",
                    files.len(),
                    root.display()
                );
                Box::new(FullPathEngine::new(root, files))
            }
            None => {
                debug!("matching {} source files by path suffix", files.len());
                Box::new(PostfixPathEngine::new(files))
            }
        };

        Self { engine }
    }

    /// Find the selected file that `path` refers to, if any.
    ///
    /// Returns an error if the matched file was previously matched by a
    /// different path.
    pub fn match_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Option<&File>, AmbiguousPathError> {
        self.engine.match_path(path.as_ref())
    }

    /// Paths of the selected files which have not been matched yet.
    pub fn unmatched_paths(&self) -> Vec<PathBuf> {
        self.engine.unmatched_paths()
    }
}
