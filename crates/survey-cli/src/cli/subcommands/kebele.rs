use clap::Subcommand;

/// Kebele commands.
#[derive(Clone, Debug, Subcommand)]
pub enum KebeleCommands {
    /// Add a kebele to a woreda (id or name).
    Add { woreda: String, name: String },
    /// Rename a kebele by id.
    Rename { id: String, new_name: String },
    /// Delete a kebele by id.
    Delete { id: String },
    /// List the kebeles of a woreda (id or name).
    List { woreda: String },
}
