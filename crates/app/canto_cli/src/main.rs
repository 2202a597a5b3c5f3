// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use canto_core::client::HttpRelay;
use canto_core::session::ChatSession;
use clap::Parser;
use cli::{Cli, Commands};
use tokio::io::BufReader;

mod chat;
mod cli;
mod logging;

fn main() -> Result<()> {
    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
        Commands::Chat { url } => {
            let session = ChatSession::new(HttpRelay::new(url)?);
            log::info!("relay at {}", session.transport().endpoint());

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(chat::run(
                &session,
                BufReader::new(tokio::io::stdin()),
                std::io::stdout(),
            ))?;
        }
    }

    Ok(())
}
