use clap::{Parser, Subcommand};
use ddh_fetch::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ddh-fetch")]
#[command(version)]
#[command(about = "Download the quarterly DDH dataset files into data/", long_about = None)]
struct Cli {
    /// Quarter identifier substituted into the quarterly file names [env: DDH_QUARTER, default: 20Q1]
    #[arg(short, long, global = true)]
    quarter: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download every manifest file (the default)
    #[clap(visible_alias = "f")]
    Fetch,
    /// Print the manifest without downloading
    #[clap(visible_alias = "ls")]
    List,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command.unwrap_or(Commands::Fetch) {
        Commands::Fetch => ddh_fetch::fetch(cli.quarter),
        Commands::List => ddh_fetch::list(cli.quarter).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
