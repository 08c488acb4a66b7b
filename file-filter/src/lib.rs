// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[macro_use]
extern crate log;

pub mod error;
pub mod file;
pub mod path_matcher;
mod segments;

pub use crate::error::{AmbiguousPathError, FileError};
pub use crate::file::File;
pub use crate::path_matcher::PathMatcher;
