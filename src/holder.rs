use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::{check_replicas, Result};
use crate::hash_ring::HashRing;
use crate::hasher::{HashFunction, Md5Hash};
use crate::node::GroupNode;

/// Virtual nodes given to each group on a holder-built ring.
pub const HOLDER_REPLICAS: usize = 320;

/// Group membership of one shard.
///
/// `groups` is copy-on-write: readers clone the `Arc` and iterate a stable
/// snapshot while writers swap in a modified copy. `version` goes up by one
/// on every change to the set.
#[derive(Debug, Default)]
struct Membership {
    version: u64,
    groups: Arc<BTreeSet<String>>,
}

#[derive(Debug)]
struct CachedRouter<H> {
    version: u64,
    ring: Arc<HashRing<GroupNode, H>>,
}

/// Registry of per-shard rings, rebuilt lazily when a shard's membership
/// changes.
///
/// All methods take `&self` and may be called from many threads. Rings are
/// handed out as shared snapshots and never mutated once cached.
#[derive(Debug)]
pub struct RouterHolder<H = Md5Hash> {
    hasher: H,
    replicas: usize,
    members: DashMap<String, Membership>,
    routers: DashMap<String, CachedRouter<H>>,
}

impl Default for RouterHolder {
    fn default() -> Self {
        RouterHolder::with_hasher(Md5Hash::new())
    }
}

impl RouterHolder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: HashFunction + Clone> RouterHolder<H> {
    pub fn with_hasher(hasher: H) -> Self {
        RouterHolder {
            hasher,
            replicas: HOLDER_REPLICAS,
            members: DashMap::new(),
            routers: DashMap::new(),
        }
    }

    /// Overrides the per-group replica count used for new rings.
    pub fn with_replicas(mut self, replicas: i64) -> Result<Self> {
        self.replicas = check_replicas(replicas)?;
        Ok(self)
    }

    /// Adds `group_id` to `shard`'s membership. Empty ids are ignored.
    pub fn add_group(&self, shard: &str, group_id: &str) {
        if group_id.is_empty() {
            return;
        }
        let mut membership = self.members.entry(shard.to_owned()).or_default();
        if membership.groups.contains(group_id) {
            return;
        }
        Arc::make_mut(&mut membership.groups).insert(group_id.to_owned());
        membership.version += 1;
        debug!(
            "Group added: [{}] shard = {} version = {}",
            group_id, shard, membership.version
        );
    }

    /// Returns the ring for `shard`, rebuilding it if membership changed
    /// since the cached one was built. Unknown shards get an empty ring.
    pub fn get_router(&self, shard: &str) -> Arc<HashRing<GroupNode, H>> {
        let (version, groups) = self.snapshot(shard);

        if let Some(cached) = self.routers.get(shard) {
            if cached.version == version {
                return Arc::clone(&cached.ring);
            }
        }

        let ring = self.build(&groups);
        debug!(
            "Router rebuilt: shard = {} version = {} groups = {} len = {}",
            shard,
            version,
            groups.len(),
            ring.len()
        );
        self.cache(shard, version, Arc::new(ring))
    }

    /// Current members of `shard`, sorted.
    pub fn groups(&self, shard: &str) -> Vec<String> {
        self.snapshot(shard).1.iter().cloned().collect()
    }

    /// Membership version of `shard`; 0 until its first group is added.
    pub fn version(&self, shard: &str) -> u64 {
        self.snapshot(shard).0
    }

    fn snapshot(&self, shard: &str) -> (u64, Arc<BTreeSet<String>>) {
        match self.members.get(shard) {
            Some(membership) => (membership.version, Arc::clone(&membership.groups)),
            None => (0, Arc::default()),
        }
    }

    fn build(&self, groups: &BTreeSet<String>) -> HashRing<GroupNode, H> {
        let mut ring = HashRing::with_hasher(self.hasher.clone());
        for group in groups {
            ring.insert_replicas(Arc::new(GroupNode::new(group.as_str())), self.replicas);
        }
        ring
    }

    /// Stores `ring` unless a ring built from a newer version is already
    /// cached. Concurrent rebuilds of the same version simply overwrite.
    fn cache(
        &self,
        shard: &str,
        version: u64,
        ring: Arc<HashRing<GroupNode, H>>,
    ) -> Arc<HashRing<GroupNode, H>> {
        match self.routers.entry(shard.to_owned()) {
            Entry::Occupied(mut entry) => {
                if entry.get().version <= version {
                    entry.insert(CachedRouter {
                        version,
                        ring: Arc::clone(&ring),
                    });
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(CachedRouter {
                    version,
                    ring: Arc::clone(&ring),
                });
            }
        }
        ring
    }
}
