use crate::cli::context::CLIContext;
use crate::db::prefs_repo;
use crate::model::Session;

pub fn login(ctx: &mut CLIContext, args: &str) {
    let mut parts = args.split_whitespace();
    let (user_id, token) = match (parts.next(), parts.next()) {
        (Some(u), Some(t)) => (u.to_string(), t.to_string()),
        _ => { println!("Usage: login <user-id> <token>"); return; }
    };

    let session = Session::new(&user_id, &token);
    if let Err(e) = prefs_repo::save_session(&ctx.conn, &session) {
        ctx.print_error(&e);
        return;
    }
    ctx.set_session(session);
    println!("Logged in as {}.", user_id);
}

pub fn logout(ctx: &mut CLIContext) {
    if let Err(e) = prefs_repo::clear_session(&ctx.conn) {
        ctx.print_error(&e);
        return;
    }
    ctx.set_session(Session::anonymous());
    println!("Logged out.");
}

pub fn whoami(ctx: &CLIContext) {
    if ctx.session.is_authenticated() {
        println!("Logged in as {}", ctx.session.user_id);
        println!("API: {}", ctx.config.api_url);
        println!("Joined this session: {}", ctx.state.join_cache().len());
    } else {
        println!("Not logged in.");
    }
}
