use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use client::http::DEFAULT_API_URL;
use shared::{EntityId, ItineraryStatus, NewTruck, Theme, WasteType};
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "greenlog", version, about = "GreenLog waste-collection back office")]
pub struct Config {
    #[arg(long, env = "GREENLOG_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: Url,

    /// Where the session token and preferences are kept, `~/.greenlog` by default
    #[arg(long, env = "GREENLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => home::home_dir()
                .map(|home| home.join(".greenlog"))
                .context("Cannot resolve the home directory, pass --data-dir"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and keep the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "GREENLOG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a manager account and sign in with it
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GREENLOG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show who is signed in
    Whoami,
    #[command(subcommand)]
    Trucks(TruckCommand),
    #[command(subcommand)]
    Points(PointCommand),
    #[command(subcommand)]
    Routes(RouteCommand),
    /// Collection schedule and driver status board
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    #[command(subcommand)]
    Theme(ThemeCommand),
}

#[derive(Subcommand, Debug)]
pub enum TruckCommand {
    List,
    Add {
        #[arg(long)]
        plate: String,
        #[arg(long)]
        driver: String,
        #[arg(long, default_value_t = NewTruck::DEFAULT_CAPACITY)]
        capacity: u32,
        /// Accepted waste, repeat for several; PLASTICO and PAPEL when omitted
        #[arg(long = "waste-type")]
        waste_types: Vec<WasteType>,
    },
    Remove {
        id: EntityId,
    },
}

/// Placeholder phone number the back office registers points with.
pub const DEFAULT_CONTACT: &str = "12345678";

#[derive(Subcommand, Debug)]
pub enum PointCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value = "Admin")]
        responsible: String,
        #[arg(long, default_value = DEFAULT_CONTACT)]
        contact: String,
        #[arg(long = "waste-type")]
        waste_types: Vec<WasteType>,
    },
    Remove {
        id: EntityId,
    },
}

#[derive(Subcommand, Debug)]
pub enum RouteCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        distance_km: f64,
        /// Collection point ids in visiting order
        #[arg(long = "point", required = true)]
        point_ids: Vec<EntityId>,
    },
    Remove {
        id: EntityId,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
    List,
    /// Assign a truck to a route on a date (YYYY-MM-DD)
    Create {
        #[arg(long)]
        truck: EntityId,
        #[arg(long)]
        route: EntityId,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Move an itinerary from SCHEDULED to IN_PROGRESS
    Start { id: EntityId },
    /// Move an itinerary from IN_PROGRESS to COMPLETED
    Finish { id: EntityId },
    /// Request a specific status; only the next step of the lifecycle is sent
    SetStatus { id: EntityId, status: ItineraryStatus },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    Show,
    Toggle,
    Set { theme: Theme },
}
