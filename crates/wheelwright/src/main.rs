use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wheelwright::intent::Intent;
use wheelwright::protocol::{self, SOCKET_PATH};
use wheelwright::slot::SlotIndex;

#[derive(Parser, Debug)]
#[command(name = "wheelwright", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the running chakra instance
    #[arg(short = 's', long, default_value = SOCKET_PATH)]
    socket: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Leave the start screen
    Advance,
    /// Return to the start screen
    Back,
    /// Rotate the wheel to the next slot
    Next,
    /// Rotate the wheel to the previous slot
    Prev,
    /// Open a slot's detail panel
    Select {
        /// Slot number, 0-9
        slot: usize,
    },
    /// Close the detail panel
    Close,
}

impl Commands {
    fn intent(&self) -> anyhow::Result<Intent> {
        Ok(match self {
            Commands::Advance => Intent::Advance,
            Commands::Back => Intent::Back,
            Commands::Next => Intent::RotateNext,
            Commands::Prev => Intent::RotatePrev,
            Commands::Select { slot } => Intent::Select(SlotIndex::new(*slot)?),
            Commands::Close => Intent::Close,
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let intent = cli.command.intent()?;
    log::debug!("Sending '{}' to {}", intent, cli.socket.display());
    protocol::send(&cli.socket, intent)?;
    Ok(())
}
