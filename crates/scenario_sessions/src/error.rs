use scenario_core::ScenarioError;

/// Why a simulation ended in the error state. The `Display` text is what
/// clients read back as the session error.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Server busy (timeout)")]
    Busy,

    #[error(transparent)]
    Computation(#[from] ScenarioError),

    #[error("Simulation panicked: {0}")]
    Panicked(String),

    #[error("Simulation scheduler is shut down")]
    SchedulerClosed,
}

impl SessionError {
    /// Status line shown next to the error.
    pub fn status_message(&self) -> String {
        match self {
            SessionError::Busy => self.to_string(),
            _ => format!("Error: {self}"),
        }
    }
}
