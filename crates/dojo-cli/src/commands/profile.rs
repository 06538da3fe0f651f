use super::context::CommandContext;
use crate::GlobalArgs;
use anyhow::{Context, Result};
use dojo_core::identity::{Identity, Role};
use dojo_infrastructure::ProfileConfig;

/// Registers the profile with the backend, then stores it as the default
/// identity in `config.toml`.
pub async fn run(
    global: &GlobalArgs,
    email: String,
    name: String,
    team: Option<String>,
    role: Role,
) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    let mut identity = Identity::seller(email.trim(), name.trim()).with_role(role);
    identity.team = team.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());

    ctx.client
        .save_profile(identity.clone())
        .await
        .context("Profile was not saved")?;

    ctx.config_service
        .update(|config| config.profile = Some(ProfileConfig::from(&identity)))
        .with_context(|| format!("Failed to write {}", ctx.config_service.path().display()))?;

    println!("Profile saved for {} ({}).", identity.email, identity.role);
    if let Some(status) = ctx.client.premium_status().await {
        println!(
            "Premium: {}",
            if status.eligible { "eligible" } else { "not eligible" }
        );
    }
    Ok(())
}
