//! System-info display state.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::backend::{CommandBackend, SystemInfo};

/// The two numeric display fields fed by the system-info poll.
///
/// Fields absent from a snapshot leave the current value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusPanel {
    pub cpu: Option<f64>,
    pub ram: Option<f64>,
}

impl StatusPanel {
    /// Merges one snapshot into the panel.
    pub fn apply(&mut self, info: &SystemInfo) {
        if let Some(cpu) = info.cpu {
            self.cpu = Some(cpu);
        }
        if let Some(ram) = info.ram {
            self.ram = Some(ram);
        }
    }
}

/// Polls the backend's status endpoint and keeps the panel current.
///
/// The poll shares no state with the command channel and never touches the
/// transcript; failures are logged and otherwise ignored.
pub struct SystemMonitor {
    backend: Arc<dyn CommandBackend>,
    panel: Arc<RwLock<StatusPanel>>,
}

impl SystemMonitor {
    pub fn new(backend: Arc<dyn CommandBackend>) -> Self {
        Self {
            backend,
            panel: Arc::new(RwLock::new(StatusPanel::default())),
        }
    }

    /// Fetches one snapshot and merges it into the panel.
    pub async fn refresh(&self) {
        match self.backend.system_info().await {
            Ok(info) => self.panel.write().await.apply(&info),
            Err(err) => tracing::debug!(error = %err, "system info poll failed"),
        }
    }

    /// The current panel values.
    pub async fn snapshot(&self) -> StatusPanel {
        *self.panel.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_leave_the_display_untouched() {
        let mut panel = StatusPanel::default();
        panel.apply(&SystemInfo {
            cpu: Some(12.0),
            ram: Some(40.0),
        });
        panel.apply(&SystemInfo {
            cpu: Some(37.0),
            ram: None,
        });

        assert_eq!(panel.cpu, Some(37.0));
        assert_eq!(panel.ram, Some(40.0));
    }
}
