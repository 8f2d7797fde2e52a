//! Splicer
//!
//! Queues video and audio edits against a media file and renders them with as
//! few ffmpeg passes as possible. Edits that cannot share an invocation are split
//! into ordered stages, each stage feeding the next through a scratch file.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod media;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use config::SplicerConfig;
pub use domain::errors::DomainError;
pub use domain::model::{Category, EditRequest, MediaInfo, MediaKind, TimeSpec};
pub use error::{SplicerError, SplicerResult};
pub use media::{EditDirective, MediaAsset, MediaSource};
