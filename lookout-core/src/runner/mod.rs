mod config;
mod executor;

pub use config::{Profile, RunConfig};
pub use executor::{RunEvent, Runner, TargetReport};
