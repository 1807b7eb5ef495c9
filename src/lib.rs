pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod influence;
pub mod output;
pub mod pipeline;
pub mod reports;
pub mod schema;
pub mod stats;
