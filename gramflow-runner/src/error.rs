//! Runner error taxonomy
//!
//! Platform errors are fatal to the run and carry the phase they occurred in.
//! Enrichment and persistence failures are deliberately absent here: they
//! degrade the outcome instead of ending the run.

use thiserror::Error;

use gramflow_client::ClientError;
use gramflow_core::domain::job::RunStatus;

/// Phase of the platform conversation in which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Submit,
    Poll,
    Fetch,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Submit => write!(f, "submit"),
            Phase::Poll => write!(f, "poll"),
            Phase::Fetch => write!(f, "fetch"),
        }
    }
}

/// Errors that can end a scrape run
#[derive(Debug, Error)]
pub enum RunError {
    /// The request failed validation; the platform is never contacted
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A platform call failed (transport fault or non-success status)
    #[error("platform error during {phase}: {source}")]
    Platform {
        phase: Phase,
        #[source]
        source: ClientError,
    },

    /// The remote run itself reported a failed terminal state
    #[error("actor run ended with status {0:?}")]
    JobFailed(RunStatus),

    /// The poll budget ran out before the run reached a terminal state
    #[error(
        "actor run timed out after {attempts} status checks; try again with a smaller result cap"
    )]
    Timeout { attempts: u32 },

    /// The run succeeded but produced zero records
    ///
    /// A distinguished business outcome (private or nonexistent profile),
    /// not a transport fault.
    #[error("no data found for this subject")]
    NoData,
}

impl RunError {
    pub(crate) fn platform(phase: Phase, source: ClientError) -> Self {
        Self::Platform { phase, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_suggests_smaller_cap() {
        let err = RunError::Timeout { attempts: 30 };
        assert!(err.to_string().contains("smaller result cap"));
    }

    #[test]
    fn test_platform_error_names_phase() {
        let err = RunError::platform(Phase::Poll, ClientError::api_error(502, "bad gateway"));
        let text = err.to_string();
        assert!(text.contains("poll"));
    }
}
