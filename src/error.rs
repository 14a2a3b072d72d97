/// Errors raised by ring and holder configuration calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RingError {
    /// A replica (virtual node) count below zero was requested.
    #[error("illegal virtual node count: {0}")]
    InvalidReplicaCount(i64),
}

pub type Result<T> = std::result::Result<T, RingError>;

/// Converts a caller-supplied replica count into a usable one.
pub(crate) fn check_replicas(count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|_| RingError::InvalidReplicaCount(count))
}
