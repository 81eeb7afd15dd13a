//! Delivery form controller: the single draft, its attachment and signature
//! preview slots, and the append-only ledger of submissions.

use std::path::Path;

use chrono::Local;
use shared::{error::CaptureError, DataUri};
use tracing::{debug, info, warn};

pub mod attachment;
pub mod draft;
pub mod ledger;
pub mod signature;
pub mod view;

pub use attachment::{decode_attachment, AttachmentPreview, DecodeTicket};
pub use draft::{DraftRecord, FieldUpdate, SubmittedRecord};
pub use ledger::SubmissionLedger;
pub use signature::{PenStyle, Point, SignaturePad};

#[derive(Debug, Default)]
pub struct DeliveryForm {
    draft: DraftRecord,
    attachment: AttachmentPreview,
    attachment_generation: u64,
    signature: Option<DataUri>,
    signature_pad: Option<SignaturePad>,
    ledger: SubmissionLedger,
}

impl DeliveryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signature_pad(pad: SignaturePad) -> Self {
        let mut form = Self::new();
        form.mount_signature_pad(pad);
        form
    }

    pub fn mount_signature_pad(&mut self, pad: SignaturePad) {
        self.signature_pad = Some(pad);
    }

    pub fn signature_pad(&self) -> Option<&SignaturePad> {
        self.signature_pad.as_ref()
    }

    pub fn signature_pad_mut(&mut self) -> Option<&mut SignaturePad> {
        self.signature_pad.as_mut()
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    pub fn attachment_preview(&self) -> &AttachmentPreview {
        &self.attachment
    }

    /// Generation of the latest attachment selection or reset.
    pub fn attachment_generation(&self) -> u64 {
        self.attachment_generation
    }

    pub fn signature_preview(&self) -> Option<&DataUri> {
        self.signature.as_ref()
    }

    pub fn ledger(&self) -> &SubmissionLedger {
        &self.ledger
    }

    pub fn set_field(&mut self, update: FieldUpdate) {
        debug!(field = update.field_name(), "draft field updated");
        update.apply(&mut self.draft);
    }

    /// Restores the empty draft and clears both previews and the drawing surface.
    /// Any decode still in flight becomes stale.
    pub fn reset_draft(&mut self) {
        self.draft = DraftRecord::default();
        self.attachment = AttachmentPreview::Empty;
        self.attachment_generation += 1;
        self.signature = None;
        if let Some(pad) = self.signature_pad.as_mut() {
            pad.clear();
        }
    }

    /// Records the picked file name right away and hands back the ticket the
    /// caller should decode in the background.
    pub fn select_attachment(&mut self, path: impl AsRef<Path>) -> DecodeTicket {
        let path = path.as_ref();
        self.attachment_generation += 1;
        let generation = self.attachment_generation;
        self.draft.attachment_name = Some(attachment::file_name_of(path));
        self.attachment = AttachmentPreview::Loading { generation };
        info!(generation, path = %path.display(), "attachment selected");
        DecodeTicket {
            generation,
            path: path.to_path_buf(),
        }
    }

    /// Applies a finished decode if it belongs to the latest selection.
    /// Returns `false` when the result was stale and dropped.
    pub fn complete_attachment(
        &mut self,
        generation: u64,
        result: Result<DataUri, CaptureError>,
    ) -> bool {
        if generation != self.attachment_generation {
            debug!(
                generation,
                latest = self.attachment_generation,
                "discarding stale attachment decode"
            );
            return false;
        }
        self.attachment = match result {
            Ok(uri) => {
                debug!(generation, mime = uri.mime(), "attachment preview ready");
                AttachmentPreview::Ready(uri)
            }
            Err(err) => {
                warn!(generation, "attachment decode failed: {err}");
                AttachmentPreview::Failed(err.to_string())
            }
        };
        true
    }

    /// Encodes the drawing surface into the signature slot. `Ok(false)` when no
    /// surface is mounted.
    pub fn save_signature(&mut self) -> Result<bool, CaptureError> {
        let Some(pad) = self.signature_pad.as_ref() else {
            debug!("save_signature without a mounted surface");
            return Ok(false);
        };
        let uri = pad.to_data_uri()?;
        debug!(strokes = pad.strokes().len(), "signature saved");
        self.signature = Some(uri);
        Ok(true)
    }

    pub fn clear_signature(&mut self) -> bool {
        let Some(pad) = self.signature_pad.as_mut() else {
            debug!("clear_signature without a mounted surface");
            return false;
        };
        pad.clear();
        self.signature = None;
        true
    }

    /// Snapshots the draft and both previews into the ledger, then resets the
    /// form. Returns the ledger index of the new record.
    pub fn submit(&mut self) -> usize {
        let record = SubmittedRecord::snapshot(
            self.ledger.next_index(),
            &self.draft,
            self.attachment.ready().cloned(),
            self.signature.clone(),
            Local::now(),
        );
        let has_attachment = record.attachment.is_some();
        let has_signature = record.signature.is_some();
        let index = self.ledger.append(record);
        info!(index, has_attachment, has_signature, "delivery record submitted");
        self.reset_draft();
        index
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
