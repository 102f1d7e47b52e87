use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "blablabil")]
#[command(about = "BlaBlaBil - ride sharing from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a phone number and password
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and discard stored credentials
    Logout,
    /// Show the currently signed-in user
    Whoami,
    /// Search published trips
    Search {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Travel date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, default_value_t = 1)]
        passengers: u32,
        /// Highest acceptable price per seat, in NOK
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Book seats on a trip
    Book {
        trip_id: String,
        #[arg(long, default_value_t = 1)]
        seats: u32,
        /// Payment method: vipps or cash
        #[arg(long, default_value = "cash")]
        payment: String,
    },
    /// Show what a route guard decides for a path
    Guard {
        path: String,
        /// Evaluate the admin guard instead of the authenticated one
        #[arg(long)]
        admin: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { phone, password } => commands::auth::login(&phone, &password).await?,
        Commands::Logout => commands::auth::logout().await?,
        Commands::Whoami => commands::auth::whoami().await?,
        Commands::Search {
            from,
            to,
            date,
            passengers,
            max_price,
        } => commands::trips::search(from, to, date, passengers, max_price).await?,
        Commands::Book {
            trip_id,
            seats,
            payment,
        } => commands::bookings::book(&trip_id, seats, &payment).await?,
        Commands::Guard { path, admin } => commands::guard::evaluate(&path, admin).await?,
    }

    Ok(())
}
