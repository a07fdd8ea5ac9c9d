mod bills;
mod cli;
mod db;
mod error;
mod fmt;
mod models;
mod new_bill;
mod routes;
mod session;
mod settings;
mod store;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Login { email, user_type } => cli::login::login(&email, &user_type),
        Commands::Logout => cli::login::logout(),
        Commands::Bills => cli::bills::list(),
        Commands::New(args) => cli::new_bill::run(args),
        Commands::Show { id } => cli::bills::show(&id),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
