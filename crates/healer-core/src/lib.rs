pub mod catalog;
pub mod config;
pub mod error;
pub mod layer;
pub mod names;
pub mod provision;
pub mod report;
