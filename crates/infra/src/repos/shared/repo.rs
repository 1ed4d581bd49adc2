/// Outcome of an optimistic update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateResult {
    Updated,
    /// The stored version no longer matched, somebody else updated it first
    VersionConflict,
}
