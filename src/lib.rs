pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod registry;
pub mod stats;
pub mod units;

pub use config::EngineConfig;
pub use dataset::Dataset;
pub use error::DatasetError;
pub use filter::FilterState;
