pub mod bootstrap;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metadata;
pub mod predictor;
pub mod server;
pub mod service;

pub use error::{Error, Result};
