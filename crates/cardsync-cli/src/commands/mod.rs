pub mod common;
pub mod config;
pub mod list;
pub mod reset;
pub mod sync;
