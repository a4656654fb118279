use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::config::PrintConfig;
use crate::export::{
    pipeline::perform_print,
    transport::{HttpTransport, PrintRequest, PrintTransport},
    types::{ExportError, PrintStatus},
};

/// Runs print submissions in the background and publishes their status.
///
/// This bridges the synchronous host thread, which owns the surface, with the
/// async HTTP client. Only encoded PNG bytes cross over.
#[derive(Clone)]
pub struct PrintManager {
    /// Channel for sending print requests.
    request_tx: mpsc::UnboundedSender<PrintRequest>,
    /// Status of the latest submission.
    status: Arc<watch::Sender<PrintStatus>>,
}

impl PrintManager {
    /// Create a manager that POSTs to the configured endpoint.
    ///
    /// Spawns the submission task on `runtime_handle`.
    pub fn new(
        runtime_handle: &tokio::runtime::Handle,
        config: &PrintConfig,
    ) -> Result<Self, ExportError> {
        let transport = HttpTransport::from_config(config)?;
        log::debug!("Print endpoint: {}", transport.endpoint());
        Ok(Self::with_transport(runtime_handle, Arc::new(transport)))
    }

    /// Create a manager with a custom transport (useful for testing).
    pub fn with_transport(
        runtime_handle: &tokio::runtime::Handle,
        transport: Arc<dyn PrintTransport>,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<PrintRequest>();
        let (status_tx, _) = watch::channel(PrintStatus::Idle);
        let status = Arc::new(status_tx);

        let status_clone = Arc::clone(&status);
        runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let outcome = perform_print(request, Arc::clone(&transport)).await;
                let settled = PrintStatus::from(outcome);
                match &settled {
                    PrintStatus::Printed => log::info!("Drawing printed"),
                    other => log::error!("Print failed: {}", other.message()),
                }
                status_clone.send_replace(settled);
            }
        });

        Self { request_tx, status }
    }

    /// Request a print of the given PNG bytes.
    ///
    /// Returns immediately; the result shows up in [`PrintManager::status`].
    /// Refused with [`ExportError::PrintInFlight`] while an earlier request is pending.
    pub fn request_print(&self, png: Vec<u8>) -> Result<(), ExportError> {
        let accepted = self.status.send_if_modified(|status| {
            if status.is_pending() {
                false
            } else {
                *status = PrintStatus::Pending;
                true
            }
        });
        if !accepted {
            log::warn!("Print requested while another print is pending");
            return Err(ExportError::PrintInFlight);
        }

        if self.request_tx.send(PrintRequest { png }).is_err() {
            self.status.send_replace(PrintStatus::Idle);
            return Err(ExportError::ManagerStopped);
        }
        Ok(())
    }

    /// Current status of the print control.
    pub fn status(&self) -> PrintStatus {
        self.status.borrow().clone()
    }

    /// Resolves once no submission is pending and returns the resulting status.
    pub async fn wait_until_settled(&self) -> PrintStatus {
        let mut rx = self.status.subscribe();
        match rx.wait_for(|status| !status.is_pending()).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        }
    }
}

#[cfg(test)]
impl PrintManager {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<PrintRequest>();
        drop(rx);
        let (status_tx, _) = watch::channel(PrintStatus::Idle);
        Self {
            request_tx: tx,
            status: Arc::new(status_tx),
        }
    }
}
