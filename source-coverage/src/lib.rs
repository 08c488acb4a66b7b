// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[macro_use]
extern crate log;

pub mod config;
pub mod record;
pub mod source;

pub use crate::config::Options;
pub use crate::record::{LineEvent, RecordError, RecordedCoverage, SourceCoverageRecorder};
