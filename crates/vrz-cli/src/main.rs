mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use commands::Commands;

#[derive(Parser)]
#[command(name = "vrz", about = "A content-addressed version control store")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run as if started in <directory>
    #[arg(short = 'C', global = true)]
    directory: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.directory {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("fatal: cannot change to '{}': {}", dir.display(), e);
            process::exit(1);
        }
    }

    match commands::run(&cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("fatal: {e}");
            process::exit(1);
        }
    }
}
