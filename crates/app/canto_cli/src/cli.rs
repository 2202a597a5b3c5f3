use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "canto", about = "Canto terminal chat client", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with the singing coach through a running relay server.
    Chat {
        /// Base URL of the relay server.
        #[arg(long, default_value = "http://127.0.0.1:3100")]
        url: String,
    },
    /// Print the version.
    Version,
}
