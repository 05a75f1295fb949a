//! Branch metadata domain type.

/// Metadata attached to a branch. Immutable once appended to a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub owner: String,
    pub permissions: String,
    pub timestamp: String,
    pub size: u64,
}

impl MetadataRecord {
    pub fn new(
        owner: impl Into<String>,
        permissions: impl Into<String>,
        timestamp: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            owner: owner.into(),
            permissions: permissions.into(),
            timestamp: timestamp.into(),
            size,
        }
    }
}
