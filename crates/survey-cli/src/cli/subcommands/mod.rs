mod farmer;
mod kebele;
mod woreda;

pub use farmer::{FarmerCommands, RegisterArgs};
pub use kebele::KebeleCommands;
pub use woreda::WoredaCommands;
