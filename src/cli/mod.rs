pub mod context;
pub mod group_commands;
pub mod session_commands;

use std::path::Path;
use rusqlite::Connection;
use tracing::warn;

use crate::config::Config;
use crate::db::{prefs_repo, schema};
use crate::model::Session;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path, config: Config) {
    println!("TravelMate groups");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error opening preferences: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing preferences: {}", e);
        return;
    }

    let session = match prefs_repo::load_session(&conn) {
        Ok(Some(session)) => {
            println!("Logged in as {}", session.user_id);
            session
        }
        Ok(None) => {
            println!("Not logged in. Use 'login <user-id> <token>'.");
            Session::anonymous()
        }
        Err(e) => {
            warn!(error = %e, "could not read saved session");
            Session::anonymous()
        }
    };

    let mut ctx = CLIContext::new(conn, config, session);
    repl_loop(&mut ctx);
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Session
            "login" => session_commands::login(ctx, args),
            "logout" => session_commands::logout(ctx),
            "whoami" => session_commands::whoami(ctx),

            // Listing
            "groups" | "list" | "ls" => group_commands::list(ctx),
            "mine" | "my-groups" => group_commands::mine(ctx),
            "created" | "my-created" => group_commands::created(ctx),
            "refresh" => group_commands::refresh(ctx),

            // Membership
            "create" => group_commands::create(ctx, args),
            "join" => group_commands::join(ctx, args),
            "leave" => group_commands::leave(ctx, args),
            "delete" => group_commands::delete(ctx, args),
            "members" => group_commands::members(ctx, args),
            "verify" => group_commands::verify(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and args.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Session:
    login <user-id> <token> Save credentials and log in
    logout                  Forget saved credentials
    whoami                  Show the current viewer

  Groups:
    groups                  List all groups
    mine                    Groups you joined
    created                 Groups you created
    refresh                 Reload groups from the server
    create [name]           Create a group
    join <group>            Join a group
    leave <group>           Leave a group
    delete <group>          Delete a group you created
    members <group>         List a group's members
    verify <group>          Ask the server if you are a member

  Other:
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - <group> is an id or part of a group name"#);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_splits_on_first_space() {
        assert_eq!(parse_command("join  Lisbon crew "), ("join", "Lisbon crew"));
    }

    #[test]
    fn parse_command_without_args() {
        assert_eq!(parse_command("groups"), ("groups", ""));
    }
}
