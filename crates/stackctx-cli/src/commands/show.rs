//! Show command implementation

use colored::Colorize;
use stackctx_core::SharedProvisioningContext;

use crate::error::Result;

/// Run the show command
pub fn run_show(context: &SharedProvisioningContext, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(context)?);
        return Ok(());
    }

    let identity = context.identity();

    println!("{}", "Provisioning Context".bold());
    println!();
    println!("{}:   {}", "Prefix".dimmed(), context.project_prefix().cyan());
    println!("{}:  {} ({})", "Project".dimmed(), identity.name, identity.stage);
    println!(
        "{}:   {} ({})",
        "Config".dimmed(),
        context.config_source_path(),
        context.config_source()
    );
    println!("{}:  {}", "Account".dimmed(), context.target_account());
    println!("{}:   {}", "Region".dimmed(), context.target_region());
    if let Some(profile) = &identity.profile {
        println!("{}:  {}", "Profile".dimmed(), profile);
    }
    println!();

    println!("{}:", "Stacks".bold());
    let stacks = context.stacks();
    if stacks.is_empty() {
        println!("  {}", "None".dimmed());
    } else {
        for name in stacks {
            println!("  {} {}", "+".green(), name.cyan());
        }
    }

    Ok(())
}
