use clap::{Args, Parser, Subcommand};
use rti_portal::config::AppConfig;
use rti_portal::error::AppError;
use rti_portal::telemetry;
use std::path::PathBuf;

use crate::commands;

#[derive(Parser, Debug)]
#[command(
    name = "RTI Portal",
    about = "Sign in, check dashboard counters, and submit RTI applications from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and print the stored session identity
    Login(AccountArgs),
    /// Sign in and print the application counters
    Dashboard(AccountArgs),
    /// Sign in and create or update an application from a draft file
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
pub(crate) struct AccountArgs {
    /// User name or email for sign-in
    #[arg(long)]
    pub(crate) user: String,
    /// Account password
    #[arg(long)]
    pub(crate) password: String,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    #[command(flatten)]
    pub(crate) account: AccountArgs,
    /// JSON file holding the application draft
    #[arg(long)]
    pub(crate) draft: PathBuf,
    /// Update this existing application instead of creating a new one
    #[arg(long)]
    pub(crate) application_id: Option<String>,
    /// BPL certificate to attach (required when the draft sets bpl=true)
    #[arg(long)]
    pub(crate) bpl_file: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Login(args) => commands::run_login(&config, args).await,
        Command::Dashboard(args) => commands::run_dashboard(&config, args).await,
        Command::Submit(args) => commands::run_submit(&config, args).await,
    }
}
