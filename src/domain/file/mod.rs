pub mod entity;
pub mod invariants;

pub use entity::{DerivationInfo, FileEntry, FileTimes, KnownStatus, NewDerivedFile};
pub use invariants::validate_derived_file;
