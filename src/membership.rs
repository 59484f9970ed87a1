use std::collections::HashSet;

use tracing::debug;

use crate::model::{Group, Id, User};

/// Group ids this session believes the viewer has joined. Lives only as long
/// as the process; a fresh session starts empty.
#[derive(Debug, Clone, Default)]
pub struct JoinCache {
    joined: HashSet<Id<Group>>,
}

impl JoinCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the id was not already cached.
    pub fn insert(&mut self, group_id: Id<Group>) -> bool {
        self.joined.insert(group_id)
    }

    /// Returns true if the id was cached.
    pub fn remove(&mut self, group_id: &Id<Group>) -> bool {
        self.joined.remove(group_id)
    }

    pub fn contains(&self, group_id: &Id<Group>) -> bool {
        self.joined.contains(group_id)
    }

    pub fn len(&self) -> usize {
        self.joined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joined.is_empty()
    }

    pub fn clear(&mut self) {
        self.joined.clear();
    }
}

/// The three independent signals that say a viewer belongs to a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MembershipSignals {
    pub in_local_cache: bool,
    pub is_creator: bool,
    pub in_member_array: bool,
}

impl MembershipSignals {
    /// Monotonic OR: any positive signal asserts membership.
    pub fn is_member(&self) -> bool {
        self.in_local_cache || self.is_creator || self.in_member_array
    }
}

/// Decide whether `viewer` belongs to `group`.
pub fn reconcile(group: &Group, viewer: &Id<User>, cache: &JoinCache) -> MembershipSignals {
    let signals = MembershipSignals {
        in_local_cache: cache.contains(&group.id),
        is_creator: group
            .creator_id
            .as_ref()
            .map(|creator| viewer.matches(creator))
            .unwrap_or(false),
        in_member_array: group.members.iter().any(|m| viewer.matches(m)),
    };

    debug!(
        group = %group.id,
        viewer = %viewer,
        cache = signals.in_local_cache,
        creator = signals.is_creator,
        members = signals.in_member_array,
        "membership reconciled"
    );
    signals
}

/// Attach membership signals to every group, keeping server order.
pub fn annotate(groups: Vec<Group>, viewer: &Id<User>, cache: &JoinCache) -> Vec<Group> {
    groups
        .into_iter()
        .map(|mut g| {
            g.membership = reconcile(&g, viewer, cache);
            g
        })
        .collect()
}
