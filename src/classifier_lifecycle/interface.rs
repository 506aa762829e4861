use crate::error::InitializationError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LifecycleStatus {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    /// Ready through the fallback configuration.
    Degraded,
    Failed(InitializationError),
}

impl LifecycleStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, LifecycleStatus::Ready | LifecycleStatus::Degraded)
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleStatus::Uninitialized => write!(f, "uninitialized"),
            LifecycleStatus::Initializing => write!(f, "initializing"),
            LifecycleStatus::Ready => write!(f, "ready"),
            LifecycleStatus::Degraded => write!(f, "degraded"),
            LifecycleStatus::Failed(_) => write!(f, "failed"),
        }
    }
}
