use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::user::User;
use crate::membership::MembershipSignals;

/// A travel group as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GroupWire")]
pub struct Group {
    pub id: Id<Group>,
    pub name: String,
    pub description: String,
    pub creator_id: Option<Id<User>>,
    pub members: Vec<Id<User>>,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Client-side membership annotation; never read from the server.
    #[serde(skip)]
    pub membership: MembershipSignals,
}

// Mongo-backed endpoints may send `_id` and `id` together, `creator` next to
// `creatorId`, and null for empty fields.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupWire {
    #[serde(rename = "_id")]
    mongo_id: Option<Id<Group>>,
    id: Option<Id<Group>>,
    name: Option<String>,
    description: Option<String>,
    creator_id: Option<Id<User>>,
    creator: Option<Id<User>>,
    members: Option<Vec<Id<User>>>,
    image: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<GroupWire> for Group {
    type Error = String;

    fn try_from(wire: GroupWire) -> Result<Self, Self::Error> {
        let id = wire
            .mongo_id
            .or(wire.id)
            .ok_or_else(|| "group record has neither _id nor id".to_string())?;
        Ok(Self {
            id,
            name: wire.name.unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            creator_id: wire.creator_id.or(wire.creator),
            members: wire.members.unwrap_or_default(),
            image: wire.image,
            created_at: wire.created_at,
            membership: MembershipSignals::default(),
        })
    }
}

impl Group {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_user_member(&self) -> bool {
        self.membership.is_member()
    }

    pub fn is_creator(&self) -> bool {
        self.membership.is_creator
    }
}

/// Payload for creating a group. The image is an already-uploaded URL.
#[derive(Debug, Clone, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Returned by a successful join. Backends differ in what they send back,
/// so every field is optional on the wire; ids the body leaves out come back
/// empty and are filled in by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MembershipWire")]
pub struct MembershipRecord {
    pub group_id: Id<Group>,
    pub user_id: Id<User>,
    pub role: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl MembershipRecord {
    pub fn new(group_id: Id<Group>, user_id: Id<User>) -> Self {
        Self {
            group_id,
            user_id,
            role: None,
            joined_at: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembershipWire {
    group_id: Option<Id<Group>>,
    group: Option<Id<Group>>,
    user_id: Option<Id<User>>,
    user: Option<Id<User>>,
    role: Option<String>,
    joined_at: Option<DateTime<Utc>>,
}

impl From<MembershipWire> for MembershipRecord {
    fn from(wire: MembershipWire) -> Self {
        Self {
            group_id: wire.group_id.or(wire.group).unwrap_or_else(Id::empty),
            user_id: wire.user_id.or(wire.user).unwrap_or_else(Id::empty),
            role: wire.role,
            joined_at: wire.joined_at,
        }
    }
}

/// An entry of the members endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MemberWire")]
pub struct GroupMember {
    pub id: Id<User>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct MemberWire {
    #[serde(rename = "_id")]
    mongo_id: Option<Id<User>>,
    id: Option<Id<User>>,
    name: Option<String>,
    email: Option<String>,
}

impl TryFrom<MemberWire> for GroupMember {
    type Error = String;

    fn try_from(wire: MemberWire) -> Result<Self, Self::Error> {
        let id = wire
            .mongo_id
            .or(wire.id)
            .ok_or_else(|| "member record has neither _id nor id".to_string())?;
        Ok(Self {
            id,
            name: wire.name,
            email: wire.email,
        })
    }
}
