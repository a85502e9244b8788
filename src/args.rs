//! Classification of raw command-line arguments and the order-sensitive fold
//! that pairs every path with the selection active when it appeared.

use crate::models::{DataType, RevealRequest, Selection, TranspassMode};
use crate::report::PROGRAM_NAME;
use std::ffi::{OsStr, OsString};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const LICENSE: &str = "Copyright (c) 2023, Sherman Rofeman. MIT license.";
const SOURCE_URL: &str = "https://github.com/skippyr/reveal";

/// Flags that print program metadata and end the run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MetadataFlag {
    Help,
    Version,
    License,
}

impl MetadataFlag {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--help" => Some(Self::Help),
            "--version" => Some(Self::Version),
            "--license" => Some(Self::License),
            _ => None,
        }
    }

    /// Text printed to stdout for this flag.
    pub fn text(&self) -> String {
        match self {
            Self::Help => help_text(),
            Self::Version => format!("v{VERSION}\n"),
            Self::License => format!("{LICENSE}\n"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Argument {
    Metadata(MetadataFlag),
    DataType(DataType),
    Transpass(TranspassMode),
    Path(OsString),
}

impl Argument {
    /// Flags match exactly; everything else names a path.
    pub fn classify(arg: &OsStr) -> Self {
        let Some(flag) = arg.to_str() else {
            return Self::Path(arg.to_os_string());
        };
        if let Some(metadata) = MetadataFlag::from_flag(flag) {
            Self::Metadata(metadata)
        } else if let Some(data_type) = DataType::from_flag(flag) {
            Self::DataType(data_type)
        } else if let Some(mode) = TranspassMode::from_flag(flag) {
            Self::Transpass(mode)
        } else {
            Self::Path(arg.to_os_string())
        }
    }
}

pub fn classify_all<I, S>(args: I) -> Vec<Argument>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter().map(|arg| Argument::classify(arg.as_ref())).collect()
}

/// First metadata flag in argument order, wherever it sits.
pub fn first_metadata_flag(args: &[Argument]) -> Option<MetadataFlag> {
    args.iter().find_map(|arg| match arg {
        Argument::Metadata(flag) => Some(*flag),
        _ => None,
    })
}

/// Folds the argument list left to right. Selector flags only affect paths
/// that come after them.
pub fn plan(args: &[Argument]) -> Vec<RevealRequest> {
    let mut selection = Selection::default();
    let mut requests = Vec::new();
    for arg in args {
        match arg {
            Argument::DataType(data_type) => selection.data_type = *data_type,
            Argument::Transpass(mode) => selection.transpass = *mode,
            Argument::Path(path) => requests.push(RevealRequest {
                path: path.clone(),
                selection,
            }),
            Argument::Metadata(_) => {}
        }
    }
    requests
}

pub fn help_text() -> String {
    format!(
        "\
Usage: {program} [FLAGS]... [PATHS]...
Reveals information about entries in the file system.

METADATA FLAGS
These flags show metadata about the program.

  --help     prints these help instructions.
  --version  prints its version.
  --license  prints its license.

DATA TYPE FLAGS
These flags change what data type the program will reveal from the entries.

  --contents (default)  prints its contents.
  --type                prints its type.
  --size                prints its size in bytes.
  --human-size          prints its size using the most readable unit.
  --user                prints the user that owns it.
  --user-id             prints the ID of the user that owns it.
  --group               prints the group that owns it.
  --group-id            prints the ID of the group that owns it.
  --permissions         prints its permissions in octal base.
  --human-permissions   prints its permissions for user, group and others,
                        respectively, using three set of characters each:
                        read (r), write (w), execute (x) and lack (-).
  --inode               prints its serial number.
  --modified-date       prints the date where its contents were last modified.

TRANSPASSING FLAGS
These flags change the way the symlinks must be handled.

  --untranspass (default)  does not resolve symlinks.
  --transpass              resolves all levels of symlinks.

EXIT CODES
It will throw exit code 1 in the end of its execution if an error happened.

However, while still able to continue, it will keep revealing the remaining
arguments.

All the errors found will be reported through stderr.

SOURCE CODE
Its source code is available at:
  {url}

ISSUES
Report issues found in this program at:
  {url}/issues
",
        program = PROGRAM_NAME,
        url = SOURCE_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<Argument> {
        classify_all(raw)
    }

    #[test]
    fn flags_are_case_sensitive_and_exact() {
        assert_eq!(Argument::classify(OsStr::new("--size")), Argument::DataType(DataType::Size));
        assert_eq!(Argument::classify(OsStr::new("--transpass")), Argument::Transpass(TranspassMode::Transpassing));
        assert_eq!(Argument::classify(OsStr::new("--license")), Argument::Metadata(MetadataFlag::License));
        assert_eq!(Argument::classify(OsStr::new("--SIZE")), Argument::Path(OsString::from("--SIZE")));
        assert_eq!(Argument::classify(OsStr::new("--sizes")), Argument::Path(OsString::from("--sizes")));
        assert_eq!(Argument::classify(OsStr::new("-h")), Argument::Path(OsString::from("-h")));
    }

    #[test]
    fn defaults_apply_before_any_flag() {
        let requests = plan(&args(&["a"]));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].selection.data_type, DataType::Contents);
        assert_eq!(requests[0].selection.transpass, TranspassMode::Untranspassing);
    }

    #[test]
    fn selectors_only_affect_later_paths() {
        let requests = plan(&args(&["a", "--size", "b", "--transpass", "c", "--type", "--untranspass", "d"]));
        let seen: Vec<(&str, DataType, TranspassMode)> = requests
            .iter()
            .map(|r| (r.path.to_str().unwrap(), r.selection.data_type, r.selection.transpass))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("a", DataType::Contents, TranspassMode::Untranspassing),
                ("b", DataType::Size, TranspassMode::Untranspassing),
                ("c", DataType::Size, TranspassMode::Transpassing),
                ("d", DataType::Type, TranspassMode::Untranspassing),
            ]
        );
    }

    #[test]
    fn most_recent_data_type_wins() {
        let requests = plan(&args(&["--size", "--inode", "--group", "x"]));
        assert_eq!(requests[0].selection.data_type, DataType::Group);
    }

    #[test]
    fn first_metadata_flag_wins_regardless_of_position() {
        assert_eq!(first_metadata_flag(&args(&["a", "--version", "--help"])), Some(MetadataFlag::Version));
        assert_eq!(first_metadata_flag(&args(&["a", "--size", "b"])), None);
    }

    #[test]
    fn metadata_texts() {
        assert_eq!(MetadataFlag::Version.text(), format!("v{VERSION}\n"));
        assert!(MetadataFlag::License.text().contains("MIT license."));
        let help = MetadataFlag::Help.text();
        assert!(help.starts_with("Usage: reveal [FLAGS]... [PATHS]...\n"));
        for data_type in DataType::ALL {
            assert!(help.contains(data_type.flag()), "{}", data_type.flag());
        }
    }
}
