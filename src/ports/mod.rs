// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::model::{Invocation, InvocationOutput, MediaInfo};

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file and return its metadata
    async fn probe_media(&self, file_path: &Path) -> Result<MediaInfo, DomainError>;
}

/// Port for running external tool invocations
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run to completion. A non-zero exit is reported in the output, not as an error;
    /// `Err` means the process could not be run at all.
    async fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, DomainError>;
}
