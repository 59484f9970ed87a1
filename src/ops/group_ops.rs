use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::GroupsApi;
use crate::error::{TmError, TmResult};
use crate::model::{Group, Id, MembershipRecord, NewGroup, Session};
use crate::queries::group_queries;
use crate::state::GroupsState;
use crate::validation::{self, trim_optional};

pub fn create_group(
    api: &dyn GroupsApi,
    state: &mut GroupsState,
    session: &Session,
    name: &str,
    description: &str,
    image: Option<&str>,
) -> TmResult<Group> {
    let valid_name = validation::non_blank(name, "name").map_err(|e| fail(state, e))?;
    let new_group = NewGroup {
        name: valid_name,
        description: description.trim().to_string(),
        image: trim_optional(image),
    };

    match api.create_group(&new_group) {
        Ok(created) => {
            info!(group = %created.id, name = %created.name, "group created");
            // The creator is a member from the start.
            state.remember_joined(created.id.clone());
            state.clear_error();
            group_queries::refresh_quietly(api, state, session);

            Ok(match state.find(&created.id) {
                Some(published) => published.clone(),
                None => created,
            })
        }
        Err(e) => {
            group_queries::refresh_quietly(api, state, session);
            Err(fail(state, e))
        }
    }
}

/// Join a group. A refusal because the viewer already belongs to it still
/// heals the join cache, but is reported to the caller as an error.
pub fn join_group(
    api: &dyn GroupsApi,
    state: &mut GroupsState,
    session: &Session,
    group_id: &Id<Group>,
    settle_delay: Duration,
) -> TmResult<MembershipRecord> {
    match api.join_group(group_id) {
        Ok(mut record) => {
            info!(group = %group_id, "joined group");
            if record.user_id.is_empty() {
                record.user_id = session.user_id.clone();
            }
            state.remember_joined(group_id.clone());
            state.clear_error();
            if !settle_delay.is_zero() {
                thread::sleep(settle_delay);
            }
            group_queries::refresh_quietly(api, state, session);
            Ok(record)
        }
        Err(e) => {
            if e.is_conflict() {
                info!(group = %group_id, "already a member; correcting join cache");
                state.remember_joined(group_id.clone());
            }
            group_queries::refresh_quietly(api, state, session);
            Err(fail(state, e))
        }
    }
}

pub fn leave_group(
    api: &dyn GroupsApi,
    state: &mut GroupsState,
    session: &Session,
    group_id: &Id<Group>,
) -> TmResult<String> {
    if state.find(group_id).map(Group::is_creator).unwrap_or(false) {
        warn!(group = %group_id, "creator is leaving their own group");
    }

    match api.leave_group(group_id) {
        Ok(message) => {
            info!(group = %group_id, "left group");
            state.forget_joined(group_id);
            state.clear_error();
            group_queries::refresh_quietly(api, state, session);
            Ok(message)
        }
        Err(e) => {
            group_queries::refresh_quietly(api, state, session);
            Err(fail(state, e))
        }
    }
}

/// Delete a group. Only its creator may do so; the backend enforces that.
pub fn delete_group(
    api: &dyn GroupsApi,
    state: &mut GroupsState,
    session: &Session,
    group_id: &Id<Group>,
) -> TmResult<String> {
    match api.delete_group(group_id) {
        Ok(message) => {
            info!(group = %group_id, "deleted group");
            state.forget_joined(group_id);
            state.clear_error();
            group_queries::refresh_quietly(api, state, session);
            Ok(message)
        }
        Err(e) => {
            group_queries::refresh_quietly(api, state, session);
            Err(fail(state, e))
        }
    }
}

fn fail(state: &mut GroupsState, e: TmError) -> TmError {
    state.fail(e.to_string());
    e
}
