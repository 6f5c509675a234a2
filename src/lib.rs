pub mod cli;
pub mod config;
pub mod core;
pub mod python;
pub mod resolve;
pub mod store;
