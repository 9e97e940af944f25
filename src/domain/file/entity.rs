use serde::{Deserialize, Serialize};

/// An entry in the case's file catalog.
/// Entries are identified by (name, parent_path); the catalog does not
/// guarantee that pair is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Catalog row identifier
    pub id: i64,

    /// Base name ("x.bin"), empty for a directory's own entry
    pub name: String,

    /// Path of the containing folder, always ending in '/'
    pub parent_path: String,

    /// Catalog id of the parent entry, if the entry was attached to one
    pub parent_id: Option<i64>,

    /// Size in bytes
    pub size: u64,

    pub times: FileTimes,

    pub is_file: bool,

    pub known: KnownStatus,

    /// Backing file, relative to the case directory (derived files only)
    pub local_path: Option<String>,

    pub derivation: DerivationInfo,
}

/// The four catalog timestamps, as Unix epoch seconds.
/// Zero means "not available".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTimes {
    pub ctime: i64,
    pub crtime: i64,
    pub atime: i64,
    pub mtime: i64,
}

/// Known-file classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownStatus {
    #[default]
    Unknown,
    Known,
    KnownBad,
}

/// Provenance of a derived file (the tool that produced it)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationInfo {
    pub tool_name: String,
    pub tool_version: String,
    pub other_details: String,
    pub rederive_details: String,
}

/// A derived file about to be registered under a parent entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDerivedFile {
    pub name: String,
    /// Local path relative to the case directory
    pub relative_path: String,
    pub size: u64,
    pub times: FileTimes,
    pub is_file: bool,
    pub known: KnownStatus,
    pub derivation: DerivationInfo,
}

impl FileEntry {
    /// Full catalog path of this entry ("/img/dir/" + "x.bin")
    pub fn full_path(&self) -> String {
        format!("{}{}", self.parent_path, self.name)
    }

    /// The parent_path value children of this entry are catalogued under
    pub fn child_parent_path(&self) -> String {
        if self.name.is_empty() {
            self.parent_path.clone()
        } else {
            format!("{}{}/", self.parent_path, self.name)
        }
    }
}

impl FileTimes {
    /// All four timestamps unset
    pub fn unknown() -> Self {
        Self::default()
    }
}

impl KnownStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownStatus::Unknown => "unknown",
            KnownStatus::Known => "known",
            KnownStatus::KnownBad => "known_bad",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unknown" => Some(KnownStatus::Unknown),
            "known" => Some(KnownStatus::Known),
            "known_bad" => Some(KnownStatus::KnownBad),
            _ => None,
        }
    }
}

impl std::fmt::Display for KnownStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DerivationInfo {
    pub fn is_empty(&self) -> bool {
        self.tool_name.is_empty()
            && self.tool_version.is_empty()
            && self.other_details.is_empty()
            && self.rederive_details.is_empty()
    }
}

impl NewDerivedFile {
    /// A derived file as produced by an external tool: no timestamps,
    /// default known status and no derivation provenance.
    pub fn from_external_tool(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            size,
            times: FileTimes::unknown(),
            is_file: true,
            known: KnownStatus::default(),
            derivation: DerivationInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, parent_path: &str) -> FileEntry {
        FileEntry {
            id: 1,
            name: name.to_string(),
            parent_path: parent_path.to_string(),
            parent_id: None,
            size: 0,
            times: FileTimes::unknown(),
            is_file: false,
            known: KnownStatus::Unknown,
            local_path: None,
            derivation: DerivationInfo::default(),
        }
    }

    #[test]
    fn test_child_parent_path_of_named_entry() {
        let dir = entry("dir", "/img/");
        assert_eq!(dir.full_path(), "/img/dir");
        assert_eq!(dir.child_parent_path(), "/img/dir/");
    }

    #[test]
    fn test_child_parent_path_of_unnamed_entry() {
        let dir = entry("", "/img/dir/");
        assert_eq!(dir.child_parent_path(), "/img/dir/");
    }

    #[test]
    fn test_external_tool_defaults() {
        let file = NewDerivedFile::from_external_tool("x.bin", "out/x.bin", 12);
        assert_eq!(file.times, FileTimes { ctime: 0, crtime: 0, atime: 0, mtime: 0 });
        assert_eq!(file.known, KnownStatus::Unknown);
        assert!(file.derivation.is_empty());
        assert!(file.is_file);
    }

    #[test]
    fn test_known_status_round_trip_through_labels() {
        for status in [KnownStatus::Unknown, KnownStatus::Known, KnownStatus::KnownBad] {
            assert_eq!(KnownStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(KnownStatus::parse("bogus"), None);
    }
}
