pub mod http;

use crate::error::TmResult;
use crate::model::{Group, GroupMember, Id, MembershipRecord, NewGroup};

pub use http::HttpGroupsApi;

/// The backend operations the groups logic depends on.
///
/// Implementations report a join refused because the viewer already belongs
/// to the group as `TmError::AlreadyMember`, never as a plain HTTP error.
pub trait GroupsApi {
    /// `GET /groups`
    fn list_groups(&self) -> TmResult<Vec<Group>>;

    /// `POST /groups`
    fn create_group(&self, group: &NewGroup) -> TmResult<Group>;

    /// `POST /groups/{id}/join`
    fn join_group(&self, group_id: &Id<Group>) -> TmResult<MembershipRecord>;

    /// `POST /groups/{id}/leave`; returns the server's message.
    fn leave_group(&self, group_id: &Id<Group>) -> TmResult<String>;

    /// `GET /groups/{id}/members`
    fn group_members(&self, group_id: &Id<Group>) -> TmResult<Vec<GroupMember>>;

    /// `DELETE /groups/{id}`; returns the server's message.
    fn delete_group(&self, group_id: &Id<Group>) -> TmResult<String>;
}
