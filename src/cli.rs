use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "foyerbot",
    about = "Finds the provider's household-confirmation email and clicks it for you"
)]
pub struct Cli {
    /// Override the run-lock marker path
    #[arg(long)]
    pub lock_file: Option<PathBuf>,

    /// Overall automation deadline in seconds
    #[arg(long)]
    pub deadline: Option<u64>,
}
