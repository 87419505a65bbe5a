//! CLI for randln — print the lines of a file in random order.

mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(name = "randln")]
#[command(about = "randln — print the lines of a file in random order")]
#[command(version = randln_core::VERSION)]
struct Cli {
    /// File whose lines are shuffled
    input: PathBuf,

    /// Entropy device to read random words from
    #[arg(long, default_value = randln_core::DEFAULT_DEVICE, conflicts_with = "os_entropy")]
    device: PathBuf,

    /// Use the OS random number generator instead of an entropy device
    #[arg(long)]
    os_entropy: bool,

    /// Log more to stderr (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let config = commands::shuffle::ShuffleCommandConfig {
        input: &cli.input,
        device: &cli.device,
        os_entropy: cli.os_entropy,
    };

    match commands::shuffle::run(&config) {
        Ok(()) => {}
        // Reader closed early (`randln file | head`); stop quietly.
        Err(e) if e.is_broken_pipe() => log::debug!("output closed: {e}"),
        Err(e) => {
            eprintln!("randln: {e}");
            std::process::exit(1);
        }
    }
}
