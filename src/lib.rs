//! Consistent hash routing of string keys onto a dynamic set of nodes.
//!
//! [`HashRing`] places each physical node at many virtual positions and
//! routes a key to the first position at or after the key's hash.
//! [`RouterHolder`] keeps one ring per named shard and rebuilds it only when
//! that shard's group membership changes.

pub mod error;
pub mod hash_ring;
pub mod hasher;
pub mod holder;
pub mod log;
pub mod node;

pub use error::RingError;
pub use hash_ring::{HashRing, DEFAULT_REPLICAS};
pub use hasher::{HashFunction, Md5Hash, Murmur3Hash};
pub use holder::{RouterHolder, HOLDER_REPLICAS};
pub use node::{GroupNode, Node, VirtualNode};
