// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Execution counts by line, keyed by source file.
pub(crate) type LineCounts = BTreeMap<String, BTreeMap<u32, u32>>;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SourceCoverage {
    /// Ordered by `file`.
    pub files: Vec<SourceFileCoverage>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SourceFileCoverage {
    /// Selected path of the source file, as UTF-8.
    pub file: String,

    /// Ordered by `line`.
    pub locations: Vec<SourceCoverageLocation>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SourceCoverageLocation {
    /// 1-indexed.
    pub line: u32,

    pub count: u32,
}

impl SourceCoverage {
    /// Load coverage written by an earlier run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read coverage: {}", path.display()))?;
        let coverage = serde_json::from_str(&text)
            .with_context(|| format!("invalid coverage: {}", path.display()))?;

        Ok(coverage)
    }

    pub(crate) fn from_counts(counts: LineCounts) -> Self {
        let files = counts
            .into_iter()
            .map(|(file, lines)| SourceFileCoverage {
                file,
                locations: lines
                    .into_iter()
                    .map(|(line, count)| SourceCoverageLocation { line, count })
                    .collect(),
            })
            .collect();

        Self { files }
    }

    /// Add the counts of `other` to `self`, by file and line.
    ///
    /// Counts saturate at `u32::MAX`. On error, `self` is unchanged.
    pub fn merge(&mut self, other: &SourceCoverage) -> Result<()> {
        let mut counts = LineCounts::new();

        for file in self.files.iter().chain(&other.files) {
            let lines = counts.entry(file.file.clone()).or_default();

            for location in &file.locations {
                if location.line == 0 {
                    bail!("source lines must be 1-indexed: `{}`", file.file);
                }

                let count = lines.entry(location.line).or_insert(0);
                *count = count.saturating_add(location.count);
            }
        }

        *self = Self::from_counts(counts);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn coverage(value: serde_json::Value) -> Result<SourceCoverage> {
        Ok(serde_json::from_value(value)?)
    }

    #[test]
    fn test_source_coverage_json() -> Result<()> {
        let text = serde_json::to_string(&json!([
            {
                "file": "src/main.cpp",
                "locations": [
                    { "line": 4, "count": 1 },
                    { "line": 9, "count": 0 },
                ],
            },
            {
                "file": "src/empty.cpp",
                "locations": [],
            },
        ]))?;

        let coverage = SourceCoverage {
            files: vec![
                SourceFileCoverage {
                    file: "src/main.cpp".to_owned(),
                    locations: vec![
                        SourceCoverageLocation { line: 4, count: 1 },
                        SourceCoverageLocation { line: 9, count: 0 },
                    ],
                },
                SourceFileCoverage {
                    file: "src/empty.cpp".to_owned(),
                    locations: vec![],
                },
            ],
        };

        assert_eq!(serde_json::to_string(&coverage)?, text);

        let de: SourceCoverage = serde_json::from_str(&text)?;
        assert_eq!(de, coverage);

        Ok(())
    }

    #[test]
    fn test_merge() -> Result<()> {
        let mut total = coverage(json!([
            { "file": "b.c", "locations": [ { "line": 2, "count": 1 } ] },
        ]))?;

        let earlier = coverage(json!([
            {
                "file": "b.c",
                "locations": [
                    { "line": 1, "count": 0 },
                    { "line": 2, "count": 3 },
                ],
            },
            { "file": "a.c", "locations": [ { "line": 7, "count": 1 } ] },
        ]))?;

        total.merge(&earlier)?;

        let expected = coverage(json!([
            { "file": "a.c", "locations": [ { "line": 7, "count": 1 } ] },
            {
                "file": "b.c",
                "locations": [
                    { "line": 1, "count": 0 },
                    { "line": 2, "count": 4 },
                ],
            },
        ]))?;
        assert_eq!(total, expected);

        Ok(())
    }

    #[test]
    fn test_merge_saturates() -> Result<()> {
        let mut total = coverage(json!([
            { "file": "a.c", "locations": [ { "line": 1, "count": u32::MAX - 1 } ] },
        ]))?;
        let earlier = total.clone();

        total.merge(&earlier)?;

        assert_eq!(total.files[0].locations[0].count, u32::MAX);

        Ok(())
    }

    #[test]
    fn test_merge_rejects_line_zero() -> Result<()> {
        let mut total = coverage(json!([
            { "file": "a.c", "locations": [ { "line": 1, "count": 1 } ] },
        ]))?;
        let before = total.clone();

        let invalid = coverage(json!([
            { "file": "a.c", "locations": [ { "line": 0, "count": 1 } ] },
        ]))?;

        assert!(total.merge(&invalid).is_err());
        assert_eq!(total, before);

        Ok(())
    }
}
