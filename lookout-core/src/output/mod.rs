//! Rendering of check results as terminal text

mod human;

pub use human::HumanFormatter;
