use super::context::CommandContext;
use crate::GlobalArgs;
use anyhow::{Context, Result};
use dojo_application::{SessionView, TrainingClient};
use dojo_core::session::{MessageRole, Reconciliation, SessionPhase, round_one_decimal};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Type a message and press Enter. Commands: /finish, /abandon, /retry, /help";

pub async fn run(global: &GlobalArgs, persona: Option<String>) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    ctx.require_identity().await?;
    ctx.client.bootstrap().await?;
    let client = &ctx.client;

    if client.start(persona.as_deref()).await? == Reconciliation::Discarded {
        anyhow::bail!("Session start was superseded");
    }
    let view = client.session_view().await;
    let persona_key = view.persona_key.clone().unwrap_or_default();
    let persona_name = client
        .persona_name(&persona_key)
        .await
        .unwrap_or_else(|| persona_key.clone());
    println!("Training with {persona_name}. {HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let input = line.trim();
        match input {
            "" => continue,
            "/help" => println!("{HELP}"),
            "/finish" => match client.finish().await {
                Ok(_) => {
                    print_summary(client).await;
                    return Ok(());
                }
                Err(e) => eprintln!("Could not finish: {e}"),
            },
            "/abandon" => {
                let session = client.abandon().await?;
                println!("Session {} abandoned.", session.id);
                return Ok(());
            }
            "/retry" => match client.retry_failed().await {
                Ok(_) => print_reply(&client.session_view().await),
                Err(e) => eprintln!("Retry failed: {e}"),
            },
            text => match client.send_message(text).await {
                Ok(_) => print_reply(&client.session_view().await),
                Err(e) if e.is_transport() => {
                    eprintln!("Message not delivered: {e}. Type /retry to resend.")
                }
                Err(e) => eprintln!("{e}"),
            },
        }
    }

    if client.phase().await == SessionPhase::Active {
        println!("Input closed; session left unfinished.");
    }
    Ok(())
}

fn print_reply(view: &SessionView) {
    if let Some(reply) = view
        .transcript
        .iter()
        .rev()
        .find(|line| line.message.role == MessageRole::Counterpart)
    {
        println!("> {}", reply.message.text);
    }
    if let Some(metrics) = view.metrics {
        println!(
            "  rapport {:.1} | discovery {:.1} | objection {:.1} | closing {:.1} | score {:.1}",
            round_one_decimal(metrics.rapport),
            round_one_decimal(metrics.discovery),
            round_one_decimal(metrics.objection),
            round_one_decimal(metrics.closing),
            view.display_score
        );
    }
}

async fn print_summary(client: &TrainingClient) {
    let view = client.session_view().await;
    println!(
        "Session finished with score {:.1} after {} messages.",
        view.display_score,
        view.transcript.len()
    );
    if let Some(status) = client.premium_status().await {
        println!(
            "Premium: {} (average {:.1} over {} sessions)",
            if status.eligible { "eligible" } else { "not eligible" },
            round_one_decimal(status.average),
            status.sample_size
        );
    }
}
