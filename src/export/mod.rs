//! Export and print submission for drawings.
//!
//! This module provides:
//! - Saving the drawing as a PNG file (the save control)
//! - Submitting the drawing to a remote print endpoint (the print control)
//! - A background manager reporting distinct success, rejection and transport-failure statuses

pub mod file;
pub mod transport;
pub mod types;

mod manager;
mod pipeline;

pub use file::{DownloadConfig, is_valid_template, to_download};
pub use manager::PrintManager;
pub use transport::{HttpTransport, PrintRequest, PrintResponse, PrintTransport};
pub use types::{ExportError, PrintOutcome, PrintStatus};
