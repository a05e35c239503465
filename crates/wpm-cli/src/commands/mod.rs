pub mod input;
pub mod inspect;
pub mod merge;
pub mod translate;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
