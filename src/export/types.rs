//! Data types for saving and printing drawings.

use thiserror::Error;

use crate::draw::SurfaceError;

/// Errors that can occur while exporting a drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to save drawing: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),

    #[error("Print transport failed: {0}")]
    Transport(String),

    #[error("A print is already in progress")]
    PrintInFlight,

    #[error("Print manager not running")]
    ManagerStopped,
}

/// Result of one print submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// The endpoint accepted the drawing.
    Printed,
    /// The endpoint answered but refused the drawing.
    Rejected {
        /// HTTP status code of the response
        status: u16,
        /// Short description of why the drawing was refused
        reason: String,
    },
    /// The request never got an answer (connection refused, DNS, reset...).
    TransportFailed(String),
}

/// Status of the print control, observed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PrintStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A submission is in flight; the print control is disabled.
    Pending,
    /// Last submission succeeded.
    Printed,
    /// Last submission was refused by the endpoint.
    Rejected { status: u16, reason: String },
    /// Last submission could not reach the endpoint.
    TransportFailed(String),
}

impl PrintStatus {
    /// True while a submission is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, PrintStatus::Pending)
    }

    /// User-facing notification text. Every settled status has its own wording.
    pub fn message(&self) -> String {
        match self {
            PrintStatus::Idle => "Ready to print.".to_string(),
            PrintStatus::Pending => "Sending drawing to the printer...".to_string(),
            PrintStatus::Printed => "Drawing printed successfully!".to_string(),
            PrintStatus::Rejected { status, reason } => {
                format!("Failed to print drawing: the printer refused it ({status}: {reason}).")
            }
            PrintStatus::TransportFailed(err) => {
                format!("Could not reach the printer: {err}")
            }
        }
    }
}

impl From<PrintOutcome> for PrintStatus {
    fn from(outcome: PrintOutcome) -> Self {
        match outcome {
            PrintOutcome::Printed => PrintStatus::Printed,
            PrintOutcome::Rejected { status, reason } => PrintStatus::Rejected { status, reason },
            PrintOutcome::TransportFailed(err) => PrintStatus::TransportFailed(err),
        }
    }
}
