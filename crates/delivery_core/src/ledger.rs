use crate::draft::SubmittedRecord;

/// Append-only list of submitted records, kept in submission order.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLedger {
    records: Vec<SubmittedRecord>,
}

impl SubmissionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next appended record will get.
    pub fn next_index(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn append(&mut self, record: SubmittedRecord) -> usize {
        let index = self.records.len();
        debug_assert_eq!(record.index, index);
        self.records.push(record);
        index
    }

    pub fn records(&self) -> &[SubmittedRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SubmittedRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubmittedRecord> {
        self.records.iter()
    }
}
