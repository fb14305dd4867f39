use cardiocheck_lib::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cardiocheck_lib::run(&cli.form, cli.config.as_deref()).await
}
