use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::GroupsApi;
use crate::config::Config;
use crate::error::{TmError, TmResult};
use crate::model::{Group, GroupMember, Id, MembershipRecord, NewGroup};
use crate::validation::truncate_chars;

/// Structured code the backend uses for a duplicate join.
pub const ALREADY_MEMBER_CODE: &str = "ALREADY_MEMBER";

// Older backend builds only say it in prose.
const ALREADY_MEMBER_PHRASES: &[&str] = &["already a member", "déjà membre", "already member"];

const MAX_ERROR_BODY: usize = 200;

/// Blocking HTTP client for the groups endpoints.
pub struct HttpGroupsApi {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpGroupsApi {
    pub fn new(config: &Config, token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.request_timeout)
            .build();
        Self {
            agent,
            base_url: config.api_url.clone(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> TmResult<T> {
        debug!(path, "GET");
        let response = self
            .authorize(self.agent.get(&self.url(path)))
            .call()
            .map_err(map_call_error)?;
        decode(response)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: Option<serde_json::Value>) -> TmResult<T> {
        debug!(path, "POST");
        let request = self
            .authorize(self.agent.post(&self.url(path)))
            .set("Content-Type", "application/json");
        let result = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };
        decode(result.map_err(map_call_error)?)
    }

    fn delete(&self, path: &str) -> TmResult<String> {
        debug!(path, "DELETE");
        let response = self
            .authorize(self.agent.delete(&self.url(path)))
            .call()
            .map_err(map_call_error)?;
        decode_message(response)
    }
}

impl GroupsApi for HttpGroupsApi {
    fn list_groups(&self) -> TmResult<Vec<Group>> {
        self.get("/groups")
    }

    fn create_group(&self, group: &NewGroup) -> TmResult<Group> {
        self.post("/groups", Some(serde_json::to_value(group)?))
    }

    fn join_group(&self, group_id: &Id<Group>) -> TmResult<MembershipRecord> {
        let path = format!("/groups/{}/join", group_id);
        debug!(path = %path, "POST");
        let response = self
            .authorize(self.agent.post(&self.url(&path)))
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => {
                    let body = read_body(resp);
                    classify_join_failure(group_id, code, &body)
                }
                other => map_call_error(other),
            })?;
        Ok(decode_join(group_id, &read_body(response)))
    }

    fn leave_group(&self, group_id: &Id<Group>) -> TmResult<String> {
        let path = format!("/groups/{}/leave", group_id);
        debug!(path = %path, "POST");
        let response = self
            .authorize(self.agent.post(&self.url(&path)))
            .call()
            .map_err(map_call_error)?;
        decode_message(response)
    }

    fn group_members(&self, group_id: &Id<Group>) -> TmResult<Vec<GroupMember>> {
        self.get(&format!("/groups/{}/members", group_id))
    }

    fn delete_group(&self, group_id: &Id<Group>) -> TmResult<String> {
        self.delete(&format!("/groups/{}", group_id))
    }
}

// Responses come either bare or wrapped as `{"success": true, "data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> TmResult<T> {
    let body = response
        .into_string()
        .map_err(|e| TmError::Decode(format!("Failed to read response: {}", e)))?;
    parse_body(&body)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> TmResult<T> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| TmError::Decode(format!("{} in {}", e, truncate_chars(body, MAX_ERROR_BODY))))
}

fn decode_message(response: ureq::Response) -> TmResult<String> {
    Ok(message_from_body(&read_body(response)))
}

/// The `message` field of a JSON body, or an empty string.
pub fn message_from_body(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_default()
}

/// Any 2xx join is a success. The record is decoded when the body carries
/// one; otherwise it is built from the requested group id. The user id may
/// come back empty for the caller to fill in.
pub fn decode_join(group_id: &Id<Group>, body: &str) -> MembershipRecord {
    let mut record = match parse_body::<MembershipRecord>(body) {
        Ok(record) => record,
        Err(e) => {
            debug!(group = %group_id, error = %e, "join body carries no membership record");
            MembershipRecord::new(group_id.clone(), Id::empty())
        }
    };
    if record.group_id.is_empty() {
        record.group_id = group_id.clone();
    }
    record
}

// Body of a response whose content is best-effort; a read failure is logged
// and treated as an empty body.
fn read_body(response: ureq::Response) -> String {
    match response.into_string() {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "failed to read response body; treating it as empty");
            String::new()
        }
    }
}

fn map_call_error(e: ureq::Error) -> TmError {
    match e {
        ureq::Error::Status(code, resp) => {
            let body = read_body(resp);
            http_error(code, &body)
        }
        ureq::Error::Transport(t) => {
            if t.to_string().contains("timed out") {
                TmError::Network("Request timed out".into())
            } else {
                TmError::Network(format!("Could not reach the server: {}", t))
            }
        }
    }
}

/// Build a human-readable HTTP error from a status and response body.
pub fn http_error(status: u16, body: &str) -> TmError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| truncate_chars(body.trim(), MAX_ERROR_BODY));
    TmError::Http { status, message }
}

/// Map a refused join to `AlreadyMember` when the backend says the viewer is
/// already in the group, and to a plain HTTP error otherwise.
pub fn classify_join_failure(group_id: &Id<Group>, status: u16, body: &str) -> TmError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let conflict_status = status == 400 || status == 409;

    if conflict_status && parsed.code.as_deref() == Some(ALREADY_MEMBER_CODE) {
        return already_member(group_id, status, body);
    }

    let lower = body.to_lowercase();
    if conflict_status && ALREADY_MEMBER_PHRASES.iter().any(|p| lower.contains(p)) {
        warn!(
            group = %group_id,
            status,
            "join conflict detected from message text; backend sent no {} code",
            ALREADY_MEMBER_CODE
        );
        return already_member(group_id, status, body);
    }

    http_error(status, body)
}

fn already_member(group_id: &Id<Group>, status: u16, body: &str) -> TmError {
    let message = match http_error(status, body) {
        TmError::Http { message, .. } => message,
        other => other.to_string(),
    };
    TmError::AlreadyMember {
        group_id: group_id.to_string(),
        message,
    }
}
