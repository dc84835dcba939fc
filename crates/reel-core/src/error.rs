use thiserror::Error;

pub type Result<T> = std::result::Result<T, AudioError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("audio unavailable: {0}")]
    PlatformUnavailable(String),

    #[error("could not create {node}: {reason}")]
    NodeCreation { node: &'static str, reason: String },

    #[error("could not schedule automation: {0}")]
    Scheduling(String),

    #[error("audio context already closed")]
    Closed,
}

impl AudioError {
    pub fn node(node: &'static str, reason: impl Into<String>) -> Self {
        Self::NodeCreation {
            node,
            reason: reason.into(),
        }
    }
}
