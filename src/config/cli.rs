use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-reservations")]
#[command(about = "Manage hotels, customers and reservations stored as JSON files")]
pub struct CliConfig {
    /// Directory holding hotels.json, customers.json and reservations.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Hotel(HotelCommand),
    #[command(subcommand)]
    Customer(CustomerCommand),
    #[command(subcommand)]
    Reservation(ReservationCommand),
}

#[derive(Debug, Clone, Subcommand)]
pub enum HotelCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        rooms: i64,
    },
    Get {
        id: String,
    },
    List,
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        rooms: Option<i64>,
    },
    /// Deletes the hotel and all of its reservations
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CustomerCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    Get {
        id: String,
    },
    List,
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Deletes the customer and all of their reservations
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ReservationCommand {
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        hotel: String,
        /// YYYY-MM-DD
        #[arg(long)]
        check_in: String,
        /// YYYY-MM-DD, exclusive
        #[arg(long)]
        check_out: String,
    },
    Get {
        id: String,
    },
    List {
        #[arg(long, conflicts_with = "customer")]
        hotel: Option<String>,
        #[arg(long)]
        customer: Option<String>,
    },
    Cancel {
        id: String,
    },
    Availability {
        #[arg(long)]
        hotel: String,
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
    },
}

impl CliConfig {
    /// Merges flags over the optional config file. Flags win.
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => {
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                file_config.to_settings()
            }
            None => Settings::default(),
        };

        let settings = Settings {
            data_dir: self.data_dir.clone().unwrap_or(base.data_dir),
            verbose: self.verbose || base.verbose,
            json_logs: self.json_logs || base.json_logs,
        };
        settings.validate()?;
        Ok(settings)
    }
}
