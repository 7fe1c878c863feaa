// crates/guess-client/src/bin/guess-admin.rs

use anyhow::Result;
use clap::Parser;
use guess_client::list_players;

#[derive(Parser)]
#[clap(name = "guess-admin")]
#[clap(about = "List the players currently in a game")]
struct Cli {
    /// Server host
    #[clap(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Observer port
    #[clap(short, long, default_value = "4001")]
    port: u16,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt::init();
    }

    let players = list_players(&format!("{}:{}", cli.host, cli.port)).await?;

    println!("The players currently playing are:");
    if players.is_empty() {
        println!("  (none)");
    }
    for player in players {
        println!("  {}", player);
    }

    Ok(())
}
