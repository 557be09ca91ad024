pub mod config;
pub mod contest;
pub mod error;
pub mod output;
pub mod scoring;
pub mod source;
pub mod standings;
