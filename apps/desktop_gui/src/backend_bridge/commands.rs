//! Commands queued from the UI thread to the decode worker.

use delivery_core::DecodeTicket;

pub enum BackendCommand {
    DecodeAttachment(DecodeTicket),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::DecodeAttachment(_) => "decode_attachment",
        }
    }
}
