mod cli;
pub mod error;
pub mod parse;
pub mod report;

pub use cli::Cli;
pub use error::Error;
pub use parse::Argument;
pub use report::{Report, Verdict};
