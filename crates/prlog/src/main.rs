use clap::Parser;
use miette::Result;
use prlog::{init_logging, run, Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load(cli)?;
    run(config).await?;
    Ok(())
}
