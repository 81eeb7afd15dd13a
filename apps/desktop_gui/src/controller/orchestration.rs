//! Command orchestration from UI actions to the worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues without blocking the frame. Returns whether the command was queued.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->worker command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "La cola de trabajo está llena; intente de nuevo".to_string();
            tracing::warn!(command = cmd_name, "ui->worker command queue is full");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "El proceso de lectura de archivos se detuvo; reinicie la aplicación"
                .to_string();
            tracing::error!(command = cmd_name, "ui->worker command queue disconnected");
            false
        }
    }
}
