use travelmate::model::*;

// ==========================================================================
// ID TESTS
// ==========================================================================

#[test]
fn id_equality_ignores_case_and_whitespace() {
    let a = Id::<User>::new(" 65F0A1B2C3D4E5F6A7B8C9D0 ");
    let b = Id::<User>::new("65f0a1b2c3d4e5f6a7b8c9d0");
    assert_eq!(a, b);
    assert!(a.matches(&b));
}

#[test]
fn ids_match_is_symmetric() {
    let samples = ["u1", "U1", " u1", "u2", "", "  ", "65F0A1B2C3D4E5F6A7B8C9D0", "65f0a1b2c3d4e5f6a7b8c9d0"];
    for a in samples {
        for b in samples {
            assert_eq!(ids_match(a, b), ids_match(b, a), "asymmetric for {:?} / {:?}", a, b);
        }
    }
}

#[test]
fn ids_match_whenever_trimmed_case_insensitive_equal() {
    assert!(ids_match("  abc", "ABC  "));
    assert!(ids_match("Ärger", "ärger"));
}

#[test]
fn ids_match_rejects_different_ids() {
    assert!(!ids_match("65f0a1b2c3d4e5f6a7b8c9d0", "65f0a1b2c3d4e5f6a7b8c9d1"));
}

#[test]
fn empty_id_never_matches() {
    let anon = Id::<User>::empty();
    assert!(!anon.matches(&Id::new("")));
    assert!(!ids_match("", "   "));
}

// ==========================================================================
// GROUP TESTS
// ==========================================================================

#[test]
fn group_deserializes_backend_shape() {
    let json = r#"{
        "_id": "65f0a1b2c3d4e5f6a7b8c9d0",
        "name": "Sahara trek",
        "description": "Ten days in Morocco",
        "creatorId": "u1",
        "members": ["u1", "u2"],
        "createdAt": "2024-03-01T10:00:00Z"
    }"#;
    let group: Group = serde_json::from_str(json).unwrap();
    assert_eq!(group.id.as_str(), "65f0a1b2c3d4e5f6a7b8c9d0");
    assert_eq!(group.creator_id, Some(Id::new("u1")));
    assert_eq!(group.member_count(), 2);
    assert!(group.created_at.is_some());
    assert!(!group.is_user_member());
}

#[test]
fn group_accepts_populated_references() {
    let json = r#"{
        "id": "g1",
        "name": "Alps",
        "creator": {"_id": "u1", "name": "Ana"},
        "members": [{"_id": "u1"}, "u2"]
    }"#;
    let group: Group = serde_json::from_str(json).unwrap();
    assert_eq!(group.creator_id, Some(Id::new("u1")));
    assert_eq!(group.members, vec![Id::new("u1"), Id::new("u2")]);
    assert_eq!(group.description, "");
}

#[test]
fn group_without_creator_or_members() {
    let group: Group = serde_json::from_str(r#"{"_id": "g1", "name": "Solo", "creatorId": null}"#).unwrap();
    assert_eq!(group.creator_id, None);
    assert_eq!(group.member_count(), 0);
}

#[test]
fn group_with_both_id_fields_decodes() {
    let json = r#"{
        "_id": "65f0a1b2c3d4e5f6a7b8c9d0",
        "id": "65f0a1b2c3d4e5f6a7b8c9d0",
        "name": "Porto",
        "creator": {"_id": "u1", "id": "u1", "name": "Ana"},
        "members": [{"_id": "u1", "id": "u1"}, "u2"]
    }"#;
    let group: Group = serde_json::from_str(json).unwrap();
    assert_eq!(group.id.as_str(), "65f0a1b2c3d4e5f6a7b8c9d0");
    assert_eq!(group.creator_id, Some(Id::new("u1")));
    assert_eq!(group.member_count(), 2);
}

#[test]
fn group_prefers_mongo_id_when_ids_disagree() {
    let group: Group = serde_json::from_str(r#"{"_id": "g-mongo", "id": "g-virtual", "name": "x"}"#).unwrap();
    assert_eq!(group.id.as_str(), "g-mongo");
}

#[test]
fn group_accepts_null_fields() {
    let json = r#"{"_id": "g1", "name": "Alps", "description": null, "members": null, "creatorId": null, "image": null}"#;
    let group: Group = serde_json::from_str(json).unwrap();
    assert_eq!(group.description, "");
    assert!(group.members.is_empty());
    assert_eq!(group.creator_id, None);
}

#[test]
fn group_list_survives_mixed_record_shapes() {
    let json = r#"[
        {"_id": "g1", "name": "Alps"},
        {"_id": "g2", "id": "g2", "name": "Porto", "description": null, "members": null},
        {"id": "g3", "name": "Crete", "creator": "u1", "creatorId": "u1"}
    ]"#;
    let groups: Vec<Group> = serde_json::from_str(json).unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[2].creator_id, Some(Id::new("u1")));
}

#[test]
fn group_without_any_id_is_rejected() {
    assert!(serde_json::from_str::<Group>(r#"{"name": "Nowhere"}"#).is_err());
}

#[test]
fn group_member_accepts_both_id_fields() {
    let member: GroupMember =
        serde_json::from_str(r#"{"_id": "u1", "id": "u1", "name": "Ana", "email": null}"#).unwrap();
    assert_eq!(member.id, Id::new("u1"));
    assert_eq!(member.email, None);
}

#[test]
fn membership_record_tolerates_missing_ids() {
    let record: MembershipRecord = serde_json::from_str(r#"{"message": "Joined"}"#).unwrap();
    assert!(record.group_id.is_empty());
    assert!(record.user_id.is_empty());
}

#[test]
fn new_group_omits_missing_image() {
    let new_group = NewGroup {
        name: "Crete".into(),
        description: "Beach week".into(),
        image: None,
    };
    let json = serde_json::to_value(&new_group).unwrap();
    assert_eq!(json, serde_json::json!({"name": "Crete", "description": "Beach week"}));
}

#[test]
fn membership_record_accepts_aliases() {
    let record: MembershipRecord =
        serde_json::from_str(r#"{"group": "g1", "user": {"_id": "u1"}, "role": "member"}"#).unwrap();
    assert_eq!(record.group_id, Id::new("g1"));
    assert_eq!(record.user_id, Id::new("u1"));
    assert_eq!(record.role.as_deref(), Some("member"));
}

// ==========================================================================
// SESSION TESTS
// ==========================================================================

#[test]
fn anonymous_session_is_not_authenticated() {
    let session = Session::anonymous();
    assert!(!session.is_authenticated());
    assert!(session.user_id.is_empty());
}

#[test]
fn blank_token_is_dropped() {
    let session = Session::new("u1", "   ");
    assert_eq!(session.token, None);
    assert!(!session.is_authenticated());
}
