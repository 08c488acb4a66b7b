// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

use thiserror::Error;

/// A source file filter was satisfied by two distinct observed paths.
///
/// Coverage for `candidate` cannot be attributed to either path without
/// guessing, so the run must stop and report all three paths.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error(
    "ambiguous source path `{}`: matched by both `{}` and `{}`",
    .candidate.display(),
    .matched.display(),
    .observed.display()
)]
pub struct AmbiguousPathError {
    /// Path declared by the filter.
    pub candidate: PathBuf,

    /// Observed path first recorded as the match for `candidate`.
    pub matched: PathBuf,

    /// Conflicting observed path.
    pub observed: PathBuf,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FileError {
    #[error("path to source file missing file name: `{}`", .path.display())]
    MissingFileName { path: PathBuf },
}
