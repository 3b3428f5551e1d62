//! One-shot command sender for scripting and for poking a running daemon.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shared::protocol::{translate, Key, Message, DEFAULT_CONTROL_ADDR};
use transport::{DatagramSender, UdpSender};

#[derive(Parser, Debug)]
struct Cli {
    /// Actuator control endpoint.
    #[arg(long, default_value = DEFAULT_CONTROL_ADDR)]
    target: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a key character and send its command byte.
    Send { key: char },
    /// Send an absolute focus target in [0, 1023].
    Focus { value: u16 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let link = UdpSender::connect(&cli.target).await?;

    let message = match cli.command {
        Command::Send { key } => {
            let Some(code) = translate(Key::Char(key)) else {
                bail!("key '{key}' is not in the command alphabet");
            };
            Message::Command(code)
        }
        Command::Focus { value } => Message::FocusTarget(value),
    };

    link.send(&message.encode()).await?;
    println!("sent {:?} to {}", message, link.target());
    Ok(())
}
