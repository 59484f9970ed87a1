use tracing::{debug, warn};

use crate::api::GroupsApi;
use crate::error::TmResult;
use crate::model::{Group, GroupMember, Id, Session};
use crate::state::GroupsState;

/// Fetch the authoritative list and publish it. On failure the error is
/// recorded and the previously published views stay visible.
pub fn load_groups(api: &dyn GroupsApi, state: &mut GroupsState, session: &Session) -> TmResult<()> {
    state.begin_loading();
    match api.list_groups() {
        Ok(groups) => {
            debug!(count = groups.len(), "groups fetched");
            state.publish(groups, &session.user_id);
            Ok(())
        }
        Err(e) => {
            state.fail(e.to_string());
            Err(e)
        }
    }
}

/// Best-effort refresh after a mutation. A failure is logged and otherwise
/// ignored; it never replaces the mutation's own outcome.
pub fn refresh_quietly(api: &dyn GroupsApi, state: &mut GroupsState, session: &Session) {
    state.begin_loading();
    match api.list_groups() {
        Ok(groups) => state.publish(groups, &session.user_id),
        Err(e) => {
            warn!(error = %e, "refresh after mutation failed; keeping previous lists");
            state.finish_loading();
        }
    }
}

pub fn group_members(api: &dyn GroupsApi, group_id: &Id<Group>) -> TmResult<Vec<GroupMember>> {
    api.group_members(group_id)
}

/// Ask the members endpoint directly whether the viewer belongs to a group,
/// independent of the join cache and the published lists.
pub fn verify_membership(api: &dyn GroupsApi, session: &Session, group_id: &Id<Group>) -> TmResult<bool> {
    let members = api.group_members(group_id)?;
    let is_member = members.iter().any(|m| session.user_id.matches(&m.id));
    debug!(group = %group_id, is_member, "membership verified against members endpoint");
    Ok(is_member)
}
