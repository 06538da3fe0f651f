use super::context::CommandContext;
use crate::GlobalArgs;
use anyhow::Result;

pub async fn run(global: &GlobalArgs) -> Result<()> {
    let ctx = CommandContext::load(global)?;
    ctx.client.bootstrap().await?;

    let personas = ctx.client.personas().await;
    if personas.is_empty() {
        println!("No personas available.");
        return Ok(());
    }
    for (index, persona) in personas.iter().enumerate() {
        let marker = if index == 0 { "*" } else { " " };
        match persona.description() {
            Some(description) => println!("{marker} {:<20} {} - {}", persona.key, persona.name, description),
            None => println!("{marker} {:<20} {}", persona.key, persona.name),
        }
    }
    println!("\n* default persona");
    Ok(())
}
