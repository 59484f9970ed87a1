use chrono::{DateTime, Utc};

use crate::membership::{annotate, JoinCache};
use crate::model::{Group, Id, User};

/// The three published views over one fetch.
#[derive(Debug, Clone, Default)]
pub struct GroupViews {
    pub all: Vec<Group>,
    /// Groups the viewer belongs to but did not create.
    pub mine: Vec<Group>,
    pub created: Vec<Group>,
}

/// Split annotated groups into the published views. Relative order of the
/// input is kept in every view.
pub fn partition(groups: Vec<Group>) -> GroupViews {
    let created: Vec<Group> = groups.iter().filter(|g| g.is_creator()).cloned().collect();
    let mine: Vec<Group> = groups
        .iter()
        .filter(|g| g.is_user_member() && !g.is_creator())
        .cloned()
        .collect();

    GroupViews {
        all: groups,
        mine,
        created,
    }
}

/// Session-scoped holder of group state. Every writer takes `&mut self`, so
/// exactly one owner mutates while any number of readers observe.
#[derive(Debug, Default)]
pub struct GroupsState {
    join_cache: JoinCache,
    views: GroupViews,
    loading: bool,
    error: Option<String>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl GroupsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_groups(&self) -> &[Group] {
        &self.views.all
    }

    pub fn my_groups(&self) -> &[Group] {
        &self.views.mine
    }

    pub fn my_created_groups(&self) -> &[Group] {
        &self.views.created
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn join_cache(&self) -> &JoinCache {
        &self.join_cache
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    /// Look up a published group by id.
    pub fn find(&self, group_id: &Id<Group>) -> Option<&Group> {
        self.views.all.iter().find(|g| &g.id == group_id)
    }

    /// Replace all published views with a fresh server response.
    pub fn publish(&mut self, groups: Vec<Group>, viewer: &Id<User>) {
        let annotated = annotate(groups, viewer, &self.join_cache);
        self.views = partition(annotated);
        self.loading = false;
        self.error = None;
        self.last_refreshed = Some(Utc::now());
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// End a load without touching views or the error message.
    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Record a failure; published views stay as they were.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn remember_joined(&mut self, group_id: Id<Group>) {
        self.join_cache.insert(group_id);
    }

    pub fn forget_joined(&mut self, group_id: &Id<Group>) {
        self.join_cache.remove(group_id);
    }

    /// Drop everything tied to the current viewer, e.g. on logout.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
