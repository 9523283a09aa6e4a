//! JSON-mapped records mirroring the cluster's resources.

pub mod export;
pub mod persona;
pub mod quota;
pub mod snapshot;
pub mod volume;

pub use export::{Export, ExportList, UserMapping};
pub use persona::{PersonaId, PersonaIdType};
pub use quota::{Quota, QuotaThresholds, QuotaType, QuotaUsage, Thresholds};
pub use snapshot::{Snapshot, SnapshotList};
pub use volume::{AclRequest, Ownership, Volume, VolumeAttribute};
