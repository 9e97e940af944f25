// src/domain/artifact/standard.rs
//
// Well-known artifact types shipped with the case store.
//
// The store seeds these at initialization with fixed ids. Anything else an
// import references is registered dynamically as a custom type.

use std::collections::HashSet;

use super::entity::ArtifactTypeId;

macro_rules! standard_artifact_types {
    ($($variant:ident = $id:literal, $name:literal, $display:literal;)+) => {
        /// Artifact types known to the store in advance
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StandardArtifactType {
            $($variant,)+
        }

        impl StandardArtifactType {
            pub const ALL: &'static [StandardArtifactType] = &[
                $(StandardArtifactType::$variant,)+
            ];

            pub fn type_id(&self) -> ArtifactTypeId {
                match self {
                    $(StandardArtifactType::$variant => ArtifactTypeId($id),)+
                }
            }

            /// Programmatic name, e.g. "TSK_WEB_BOOKMARK"
            pub fn name(&self) -> &'static str {
                match self {
                    $(StandardArtifactType::$variant => $name,)+
                }
            }

            pub fn display_name(&self) -> &'static str {
                match self {
                    $(StandardArtifactType::$variant => $display,)+
                }
            }
        }
    };
}

standard_artifact_types! {
    GenInfo = 1, "TSK_GEN_INFO", "General Info";
    WebBookmark = 2, "TSK_WEB_BOOKMARK", "Web Bookmarks";
    WebCookie = 3, "TSK_WEB_COOKIE", "Web Cookies";
    WebHistory = 4, "TSK_WEB_HISTORY", "Web History";
    WebDownload = 5, "TSK_WEB_DOWNLOAD", "Web Downloads";
    RecentObject = 6, "TSK_RECENT_OBJECT", "Recent Documents";
    GpsTrackpoint = 7, "TSK_GPS_TRACKPOINT", "GPS Trackpoints";
    InstalledProgram = 8, "TSK_INSTALLED_PROG", "Installed Programs";
    KeywordHit = 9, "TSK_KEYWORD_HIT", "Keyword Hits";
    HashsetHit = 10, "TSK_HASHSET_HIT", "Hashset Hits";
    DeviceAttached = 11, "TSK_DEVICE_ATTACHED", "Devices Attached";
    InterestingFileHit = 12, "TSK_INTERESTING_FILE_HIT", "Interesting Files";
    EmailMessage = 13, "TSK_EMAIL_MSG", "E-Mail Messages";
    ExtractedText = 14, "TSK_EXTRACTED_TEXT", "Extracted Text";
    WebSearchQuery = 15, "TSK_WEB_SEARCH_QUERY", "Web Search";
    MetadataExif = 16, "TSK_METADATA_EXIF", "EXIF Metadata";
    TagFile = 17, "TSK_TAG_FILE", "Tagged Files";
    TagArtifact = 18, "TSK_TAG_ARTIFACT", "Tagged Results";
    OsInfo = 19, "TSK_OS_INFO", "Operating System Information";
    OsAccount = 20, "TSK_OS_ACCOUNT", "Operating System User Account";
    ServiceAccount = 21, "TSK_SERVICE_ACCOUNT", "Web Accounts";
    ToolOutput = 22, "TSK_TOOL_OUTPUT", "Raw Tool Output";
    Contact = 23, "TSK_CONTACT", "Contacts";
    Message = 24, "TSK_MESSAGE", "Messages";
    CallLog = 25, "TSK_CALLLOG", "Call Logs";
    CalendarEntry = 26, "TSK_CALENDAR_ENTRY", "Calendar Entries";
    SpeedDialEntry = 27, "TSK_SPEED_DIAL_ENTRY", "Speed Dial Entries";
    BluetoothPairing = 28, "TSK_BLUETOOTH_PAIRING", "Bluetooth Pairings";
    GpsBookmark = 29, "TSK_GPS_BOOKMARK", "GPS Bookmarks";
    GpsLastKnownLocation = 30, "TSK_GPS_LAST_KNOWN_LOCATION", "GPS Last Known Location";
    GpsSearch = 31, "TSK_GPS_SEARCH", "GPS Searches";
    ProgramRun = 32, "TSK_PROG_RUN", "Run Programs";
    EncryptionDetected = 33, "TSK_ENCRYPTION_DETECTED", "Encryption Detected";
    ExtensionMismatch = 34, "TSK_EXT_MISMATCH_DETECTED", "Extension Mismatch Detected";
    InterestingArtifactHit = 35, "TSK_INTERESTING_ARTIFACT_HIT", "Interesting Results";
}

impl StandardArtifactType {
    pub fn from_type_id(id: ArtifactTypeId) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.type_id() == id)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

/// Immutable set of artifact type ids treated as standard.
/// Built once and handed to the importer; tests may supply their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardArtifactTypes {
    ids: HashSet<ArtifactTypeId>,
}

impl StandardArtifactTypes {
    /// Every type in [`StandardArtifactType::ALL`]
    pub fn builtin() -> Self {
        Self::from_ids(StandardArtifactType::ALL.iter().map(|t| t.type_id()))
    }

    pub fn from_ids(ids: impl IntoIterator<Item = ArtifactTypeId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::from_ids(std::iter::empty())
    }

    pub fn contains(&self, id: ArtifactTypeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for StandardArtifactTypes {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_and_names_are_unique() {
        let ids: HashSet<_> = StandardArtifactType::ALL.iter().map(|t| t.type_id()).collect();
        let names: HashSet<_> = StandardArtifactType::ALL.iter().map(|t| t.name()).collect();

        assert_eq!(ids.len(), StandardArtifactType::ALL.len());
        assert_eq!(names.len(), StandardArtifactType::ALL.len());
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        assert_eq!(
            StandardArtifactType::from_type_id(ArtifactTypeId(2)),
            Some(StandardArtifactType::WebBookmark)
        );
        assert_eq!(
            StandardArtifactType::from_name("TSK_KEYWORD_HIT"),
            Some(StandardArtifactType::KeywordHit)
        );
        assert_eq!(StandardArtifactType::from_name("CustomType"), None);
    }

    #[test]
    fn test_builtin_set_membership() {
        let set = StandardArtifactTypes::builtin();

        assert_eq!(set.len(), StandardArtifactType::ALL.len());
        assert!(set.contains(StandardArtifactType::GenInfo.type_id()));
        assert!(!set.contains(ArtifactTypeId(10_000)));
    }

    #[test]
    fn test_custom_set() {
        let set = StandardArtifactTypes::from_ids([ArtifactTypeId(42)]);

        assert!(set.contains(ArtifactTypeId(42)));
        assert!(!set.contains(StandardArtifactType::GenInfo.type_id()));
        assert!(StandardArtifactTypes::empty().is_empty());
    }
}
