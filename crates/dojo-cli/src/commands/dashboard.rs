use super::context::CommandContext;
use crate::GlobalArgs;
use anyhow::Result;
use dojo_core::performance::LeaderboardPeriod;
use dojo_core::session::round_one_decimal;

pub async fn history(global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    let identity = ctx.require_identity().await?;

    let entries = ctx.client.refresh_history().await?;
    if entries.is_empty() {
        println!("No finished sessions yet for {}.", identity.email);
        return Ok(());
    }
    for entry in entries {
        println!(
            "{}  {:<20} {:>5.1}",
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.persona_key,
            entry.display_score()
        );
    }
    Ok(())
}

pub async fn leaderboard(
    global: &GlobalArgs,
    period: Option<LeaderboardPeriod>,
    team: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    let period = period.unwrap_or(ctx.config.leaderboard_period);

    let entries = ctx
        .client
        .refresh_leaderboard(period, team.as_deref())
        .await?;
    println!("Leaderboard ({period})");
    if entries.is_empty() {
        println!("No ranked sellers yet.");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{:>3}. {:<30} {:>4} sessions  {:>5.1}",
            entry.rank,
            entry.seller_email,
            entry.session_count,
            round_one_decimal(entry.average_score)
        );
    }
    Ok(())
}

pub async fn premium(global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    ctx.require_identity().await?;

    let status = ctx.client.refresh_premium().await?;
    if status.eligible {
        println!("Premium unlocked.");
    } else {
        println!("Premium locked.");
    }
    println!(
        "Average {:.1} over {} sessions",
        round_one_decimal(status.average),
        status.sample_size
    );
    if let Some(reason) = status.reason {
        println!("{reason}");
    }
    Ok(())
}
