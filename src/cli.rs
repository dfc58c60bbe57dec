use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pixtag")]
#[command(author, version, about = "Image and tag management backend")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Socket address to bind to (overrides PIXTAG_LISTEN)
        #[arg(long)]
        listen: Option<String>,

        /// Path to the SQLite database file (overrides PIXTAG_DB_PATH)
        #[arg(long)]
        db: Option<String>,
    },

    /// Print the version and exit
    Version,
}
