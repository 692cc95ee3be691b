use crate::demo::{run_projection, run_seed, ProjectArgs, SeedArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use franchise_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Franchise Hub",
    about = "Run the franchise listing platform backend from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Load franchise listings into the catalog from a CSV export or the
    /// built-in samples
    Seed(SeedArgs),
    /// Compute a one-off return projection without touching the database
    Project(ProjectArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seed(args) => run_seed(args),
        Command::Project(args) => run_projection(args),
    }
}
