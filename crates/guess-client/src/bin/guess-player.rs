// crates/guess-client/src/bin/guess-player.rs

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use guess_client::PlayerClient;
use guess_core::{GuessOutcome, TARGET_MAX, TARGET_MIN};

#[derive(Parser)]
#[clap(name = "guess-player")]
#[clap(about = "Play the number guessing game")]
struct Cli {
    /// Server host
    #[clap(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Player port
    #[clap(short, long, default_value = "4000")]
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

    let mut player = PlayerClient::start(&format!("{}:{}", cli.host, cli.port)).await?;
    println!("Welcome to the guess the number game!");

    let stdin = io::stdin();
    while !player.is_finished() {
        print!("What is your guess? ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\nEOF on stdin, leaving the game.");
            break;
        }

        let guess: i64 = match line.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                println!(
                    "The number you entered was not valid. Please enter an integer between {} and {}!",
                    TARGET_MIN, TARGET_MAX
                );
                continue;
            }
        };

        match player.guess(guess).await? {
            GuessOutcome::Correct => println!("You guessed correctly!"),
            GuessOutcome::Close => println!("You are close!"),
            GuessOutcome::Far => println!("You are way off."),
        }
    }

    Ok(())
}
