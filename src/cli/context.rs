use rusqlite::Connection;
use std::io::{self, Write};

use crate::api::HttpGroupsApi;
use crate::config::Config;
use crate::model::*;
use crate::state::GroupsState;

pub struct CLIContext {
    pub conn: Connection,
    pub config: Config,
    pub session: Session,
    pub api: HttpGroupsApi,
    pub state: GroupsState,
}

impl CLIContext {
    pub fn new(conn: Connection, config: Config, session: Session) -> Self {
        let api = HttpGroupsApi::new(&config, session.token.clone());
        Self {
            conn,
            config,
            session,
            api,
            state: GroupsState::new(),
        }
    }

    /// Switch to a different viewer. Session-scoped state starts over.
    pub fn set_session(&mut self, session: Session) {
        self.api = HttpGroupsApi::new(&self.config, session.token.clone());
        self.session = session;
        self.state.reset();
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// True when logged in; prints a hint otherwise.
    pub fn require_login(&self) -> bool {
        if self.session.is_authenticated() {
            true
        } else {
            println!("Not logged in. Use 'login <user-id> <token>' first.");
            false
        }
    }

    /// Resolve a group by id or by name among the published groups. Falls back
    /// to treating the argument as a raw id the list hasn't seen yet.
    pub fn resolve_group(&self, args: &str) -> Option<Id<Group>> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let by_id = Id::<Group>::new(query);
        if self.state.find(&by_id).is_some() {
            return Some(by_id);
        }

        let lower = query.to_lowercase();
        let matches: Vec<&Group> = self
            .state
            .all_groups()
            .iter()
            .filter(|g| g.name.to_lowercase().contains(&lower))
            .collect();

        match matches.len() {
            0 => Some(by_id),
            1 => Some(matches[0].id.clone()),
            _ => {
                if let Some(exact) = matches.iter().find(|g| g.name.eq_ignore_ascii_case(query)) {
                    return Some(exact.id.clone());
                }
                println!("Multiple matches found:");
                for g in &matches {
                    println!("  {} ({})", g.name, g.id);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Print an error.
    pub fn print_error(&self, e: &crate::error::TmError) {
        println!("Error: {}", e);
    }
}
