#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod render;
pub mod scanning;
pub mod writer;

pub use builder::{ManifestBuilder, ManifestReport};
pub use config::{ConfigError, ManifestConfig};
pub use error::{ManifestError, ManifestResult};
pub use render::ManifestDocument;
