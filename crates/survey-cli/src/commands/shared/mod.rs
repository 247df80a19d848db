pub mod limit;
pub mod locate;
pub mod parse;
