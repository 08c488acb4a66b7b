// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Separator-agnostic path helpers.
//!
//! Debug info for a Windows target may be inspected on any host, so both `/`
//! and `\` delimit segments here, independent of `std::path` conventions.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Final segment of `path`, if it names a file.
pub(crate) fn file_name(path: &str) -> Option<&str> {
    path.rsplit(is_separator)
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
}

/// Lower-cased segments of `path`, ignoring empty and `.` segments.
pub(crate) fn components(path: &str) -> Vec<String> {
    path.split(is_separator)
        .filter(|c| !c.is_empty() && *c != ".")
        .map(str::to_lowercase)
        .collect()
}

/// Returns `true` if the trailing segments of `path` are exactly `suffix`.
pub(crate) fn ends_with(path: &[String], suffix: &[String]) -> bool {
    !suffix.is_empty() && path.ends_with(suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("src/foo.cpp"), Some("foo.cpp"));
        assert_eq!(file_name(r"C:\Build\src\FOO.CPP"), Some("FOO.CPP"));
        assert_eq!(file_name("foo.cpp"), Some("foo.cpp"));
        assert_eq!(file_name("src/"), None);
        assert_eq!(file_name(""), None);
        assert_eq!(file_name("src/.."), None);
    }

    #[test]
    fn test_components() {
        assert_eq!(
            components(r"C:\Build/./src\\Foo.cpp"),
            vec!["c:", "build", "src", "foo.cpp"]
        );
        assert!(components("/").is_empty());
    }

    #[test]
    fn test_ends_with_aligns_on_segments() {
        let suffix = components("src/foo.cpp");

        assert!(ends_with(&components("/a/src/foo.cpp"), &suffix));
        assert!(ends_with(&components("src/foo.cpp"), &suffix));
        assert!(!ends_with(&components("/a/xsrc/foo.cpp"), &suffix));
        assert!(!ends_with(&components("/a/foo.cpp"), &suffix));
        assert!(!ends_with(&components("/a/src/foo.cpp"), &[]));
    }
}
