use clap::Parser;
use std::process::ExitCode;
use summit_logger::Logger;
use summit_shell::args::{Cli, Commands};
use summit_shell::submit;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let _logger =
        Logger::builder().name(env!("CARGO_PKG_NAME")).stderr(true).level(cli.log_level).init()?;

    match cli.command {
        Commands::Submit(args) => {
            let outcome = submit::run(args, &mut std::io::stdout().lock()).await?;
            Ok(if outcome.primary_succeeded() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        },
    }
}
