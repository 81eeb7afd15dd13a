//! Worker thread that reads picked files and decodes their previews off the UI thread.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use delivery_core::attachment::decode_ticket;
use shared::{error::CaptureError, DataUri};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{DecodedAttachment, UiError, UiErrorContext, UiEvent};
use crate::ui::previews::decode_preview_image;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("decode worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build decode runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("decode worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::DecodeAttachment(ticket) => {
                        // No cancellation: a superseded decode still runs and
                        // is dropped by generation on the UI side.
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let generation = ticket.generation;
                            let read = decode_ticket(&ticket).await;
                            let delivered = tokio::task::spawn_blocking(move || {
                                let result = read.map(decode_for_display);
                                deliver_decoded(&ui_tx, generation, result)
                            })
                            .await;
                            if let Err(err) = delivered {
                                tracing::warn!(generation, "attachment preview task failed: {err}");
                            }
                        });
                    }
                }
            }
            tracing::debug!("decode worker command queue closed");
        });
    });
}

fn decode_for_display(uri: DataUri) -> DecodedAttachment {
    let preview = uri
        .decode()
        .map_err(|err| err.to_string())
        .and_then(|bytes| decode_preview_image(&bytes));
    if let Err(reason) = &preview {
        tracing::warn!(mime = uri.mime(), "attachment preview decode failed: {reason}");
    }
    DecodedAttachment { uri, preview }
}

/// Waits for room in the UI queue: this event is the only way the slot
/// leaves `Loading`. Returns `false` once the UI side is gone.
fn deliver_decoded(
    ui_tx: &Sender<UiEvent>,
    generation: u64,
    result: Result<DecodedAttachment, CaptureError>,
) -> bool {
    let ok = result.is_ok();
    match ui_tx.send(UiEvent::AttachmentDecoded { generation, result }) {
        Ok(()) => {
            tracing::debug!(generation, ok, "attachment decode finished");
            true
        }
        Err(_) => {
            tracing::warn!(generation, "ui event queue closed; attachment decode dropped");
            false
        }
    }
}
