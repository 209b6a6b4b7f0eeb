use anyhow::Result;
use healthflow::cli;

#[tokio::main]
async fn main() -> Result<()> {
    let (action, globals) = cli::start()?;

    cli::actions::handle(action, &globals).await?;

    Ok(())
}
