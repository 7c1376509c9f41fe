pub mod config;
pub mod error;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod series;
