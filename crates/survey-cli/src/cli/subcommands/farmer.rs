use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Farmer commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FarmerCommands {
    /// Register a farmer.
    Register(RegisterArgs),
    /// Get a farmer by ID.
    Get { id: String },
    /// Update a farmer's name or phone.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a farmer record.
    Delete { id: String },
    /// List farmers in registration order.
    List {
        /// Case-insensitive match on name or woreda.
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

/// Arguments for `survey farmer register`.
#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    /// smallholder, commercial, large-scale, or subsistence
    #[arg(long = "type")]
    pub farmer_type: Option<String>,
    #[arg(long)]
    pub woreda: String,
    #[arg(long)]
    pub kebele: Option<String>,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Audio note to upload (mp3, wav, or m4a).
    #[arg(long)]
    pub audio: Option<PathBuf>,
}
