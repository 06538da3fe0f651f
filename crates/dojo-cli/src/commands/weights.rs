use super::context::CommandContext;
use crate::GlobalArgs;
use anyhow::{Context, Result};
use dojo_core::weights::{ResolvedWeights, WeightScope, WeightTarget, WeightVector};

pub async fn show(global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    ctx.require_identity().await?;

    let resolved = ctx.client.resolve_weights().await;
    print_weights(&resolved);
    Ok(())
}

pub async fn set(
    global: &GlobalArgs,
    scope: WeightScope,
    target: Option<String>,
    vector: WeightVector,
) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    let identity = ctx.require_identity().await?;

    // Default the target to the acting identity's own user or team.
    let target = match (scope, target.as_deref()) {
        (WeightScope::User, None) => Some(identity.email.clone()),
        (WeightScope::Team, None) => identity.team().map(str::to_string),
        (_, explicit) => explicit.map(str::to_string),
    };
    let target = WeightTarget::from_parts(scope, target.as_deref())?;

    ctx.client
        .save_weights(&target, vector)
        .await
        .with_context(|| format!("Weights were not saved at {target}"))?;
    println!("Saved weights at {target}.");

    let resolved = ctx.client.resolve_weights().await;
    print_weights(&resolved);
    Ok(())
}

fn print_weights(resolved: &ResolvedWeights) {
    let source = match resolved.scope {
        Some(scope) => scope.to_string(),
        None => "built-in default".to_string(),
    };
    println!("Weights in effect (from {source}):");
    for (name, value) in resolved.vector.components() {
        println!("  {name:<10} {value:.2}");
    }
}
