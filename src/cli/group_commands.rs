use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::*;
use crate::queries::*;

fn print_groups(title: &str, groups: &[Group], empty_hint: &str) {
    if groups.is_empty() {
        println!("{}", empty_hint);
        return;
    }
    println!("{} ({}):", title, groups.len());
    for g in groups {
        let marker = if g.is_creator() {
            " [owner]"
        } else if g.is_user_member() {
            " [member]"
        } else {
            ""
        };
        println!("  {} - {} ({} members){}", g.id, g.name, g.member_count(), marker);
    }
}

/// Load the list once per session before showing anything.
fn ensure_loaded(ctx: &mut CLIContext) {
    if ctx.state.last_refreshed().is_none() {
        refresh(ctx);
    }
}

pub fn refresh(ctx: &mut CLIContext) {
    match group_queries::load_groups(&ctx.api, &mut ctx.state, &ctx.session) {
        Ok(()) => println!("Loaded {} groups.", ctx.state.all_groups().len()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn list(ctx: &mut CLIContext) {
    ensure_loaded(ctx);
    print_groups("Groups", ctx.state.all_groups(), "No groups yet. Use 'create' to start one.");
}

pub fn mine(ctx: &mut CLIContext) {
    ensure_loaded(ctx);
    print_groups("Groups you joined", ctx.state.my_groups(), "You haven't joined any groups.");
}

pub fn created(ctx: &mut CLIContext) {
    ensure_loaded(ctx);
    print_groups("Groups you created", ctx.state.my_created_groups(), "You haven't created any groups.");
}

pub fn create(ctx: &mut CLIContext, args: &str) {
    if !ctx.require_login() {
        return;
    }

    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Group name: ") {
            Some(s) if !s.is_empty() => s,
            _ => { println!("Name cannot be empty."); return; }
        }
    };
    let description = ctx.prompt("Description: ").unwrap_or_default();
    let image = ctx.prompt("Image URL (optional): ").unwrap_or_default();
    let image_opt = if image.is_empty() { None } else { Some(image.as_str()) };

    match group_ops::create_group(&ctx.api, &mut ctx.state, &ctx.session, &name, &description, image_opt) {
        Ok(group) => println!("Created group: {} ({})", group.name, group.id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn join(ctx: &mut CLIContext, args: &str) {
    if !ctx.require_login() {
        return;
    }
    let group_id = match if args.is_empty() { println!("Usage: join <group>"); return; } else { ctx.resolve_group(args) } {
        Some(id) => id,
        None => return,
    };

    let delay = ctx.config.join_settle_delay;
    match group_ops::join_group(&ctx.api, &mut ctx.state, &ctx.session, &group_id, delay) {
        Ok(_) => println!("Joined group {}.", group_id),
        Err(e) if e.is_conflict() => println!("You are already a member of {}.", group_id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn leave(ctx: &mut CLIContext, args: &str) {
    if !ctx.require_login() {
        return;
    }
    let group_id = match if args.is_empty() { println!("Usage: leave <group>"); return; } else { ctx.resolve_group(args) } {
        Some(id) => id,
        None => return,
    };

    match group_ops::leave_group(&ctx.api, &mut ctx.state, &ctx.session, &group_id) {
        Ok(message) if !message.is_empty() => println!("{}", message),
        Ok(_) => println!("Left group {}.", group_id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &mut CLIContext, args: &str) {
    if !ctx.require_login() {
        return;
    }
    let group_id = match if args.is_empty() { println!("Usage: delete <group>"); return; } else { ctx.resolve_group(args) } {
        Some(id) => id,
        None => return,
    };

    let confirm = ctx.prompt(&format!("Delete group {}? (y/N): ", group_id)).unwrap_or_default();
    if !confirm.eq_ignore_ascii_case("y") {
        println!("Cancelled.");
        return;
    }

    match group_ops::delete_group(&ctx.api, &mut ctx.state, &ctx.session, &group_id) {
        Ok(message) if !message.is_empty() => println!("{}", message),
        Ok(_) => println!("Deleted group {}.", group_id),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn members(ctx: &mut CLIContext, args: &str) {
    let group_id = match if args.is_empty() { println!("Usage: members <group>"); return; } else { ctx.resolve_group(args) } {
        Some(id) => id,
        None => return,
    };

    match group_queries::group_members(&ctx.api, &group_id) {
        Ok(members) if members.is_empty() => println!("No members."),
        Ok(members) => {
            println!("Members ({}):", members.len());
            for m in &members {
                println!("  {} {}", m.id, m.name.as_deref().unwrap_or(""));
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn verify(ctx: &mut CLIContext, args: &str) {
    let group_id = match if args.is_empty() { println!("Usage: verify <group>"); return; } else { ctx.resolve_group(args) } {
        Some(id) => id,
        None => return,
    };

    match group_queries::verify_membership(&ctx.api, &ctx.session, &group_id) {
        Ok(true) => println!("Server lists you as a member of {}.", group_id),
        Ok(false) => println!("Server does not list you as a member of {}.", group_id),
        Err(e) => ctx.print_error(&e),
    }
}
