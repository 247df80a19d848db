use clap::Subcommand;

/// Woreda commands. `WOREDA` arguments accept an id or an exact name.
#[derive(Clone, Debug, Subcommand)]
pub enum WoredaCommands {
    /// Add a woreda.
    Add { name: String },
    /// Rename a woreda. Existing farmer records keep the old name.
    Rename { woreda: String, new_name: String },
    /// Delete a woreda together with all of its kebeles.
    Delete { woreda: String },
    /// List woredas.
    List {
        /// Include each woreda's kebeles.
        #[arg(long)]
        tree: bool,
    },
}
