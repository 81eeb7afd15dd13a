//! Window-independent projection of the ledger into display rows.

use shared::{domain::FormOption, DataUri};

use crate::{draft::SubmittedRecord, ledger::SubmissionLedger};

/// One entry of the submissions list. The signature is kept in the record but
/// not listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub index: usize,
    pub heading: String,
    pub seller_code: String,
    pub client_code: String,
    pub brand: String,
    pub activity: String,
    pub description: Option<String>,
    pub submitted_at: String,
    pub attachment: Option<DataUri>,
}

impl LedgerRow {
    pub fn from_record(record: &SubmittedRecord) -> Self {
        let description = record.description.trim();
        Self {
            index: record.index,
            heading: format!("Venta: {}", record.index + 1),
            seller_code: recorded_value(record.seller_code),
            client_code: recorded_value(record.client_code),
            brand: recorded_value(record.brand),
            activity: recorded_value(record.activity),
            description: (!description.is_empty()).then(|| description.to_string()),
            submitted_at: record.submitted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            attachment: record.attachment.clone(),
        }
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Código del vendedor: {}", self.seller_code),
            format!("Código del cliente: {}", self.client_code),
            format!("Marca: {}", self.brand),
            format!("Actividad: {}", self.activity),
        ];
        if let Some(description) = &self.description {
            lines.push(format!("Descripción: {description}"));
        }
        lines
    }
}

pub fn ledger_rows(ledger: &SubmissionLedger) -> Vec<LedgerRow> {
    ledger.iter().map(LedgerRow::from_record).collect()
}

pub fn recorded_value<T: FormOption>(value: Option<T>) -> String {
    value.map(|v| v.value().to_string()).unwrap_or_default()
}

/// Combo box caption for the current selection.
pub fn selected_label<T: FormOption>(value: Option<T>) -> &'static str {
    value.map(|v| v.label()).unwrap_or("Seleccionar…")
}
