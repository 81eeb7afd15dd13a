//! Draft being edited and the snapshot produced when it is submitted.

use chrono::{DateTime, Local};
use serde::Serialize;
use shared::{
    domain::{Activity, Brand, ClientCode, SellerCode},
    DataUri,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftRecord {
    pub seller_code: Option<SellerCode>,
    pub client_code: Option<ClientCode>,
    pub brand: Option<Brand>,
    pub activity: Option<Activity>,
    pub description: String,
    /// Name of the last picked file. Set on selection, before its bytes are read.
    pub attachment_name: Option<String>,
}

impl DraftRecord {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Replacement value for exactly one draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    SellerCode(Option<SellerCode>),
    ClientCode(Option<ClientCode>),
    Brand(Option<Brand>),
    Activity(Option<Activity>),
    Description(String),
}

impl FieldUpdate {
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::SellerCode(_) => "seller_code",
            Self::ClientCode(_) => "client_code",
            Self::Brand(_) => "brand",
            Self::Activity(_) => "activity",
            Self::Description(_) => "description",
        }
    }

    pub(crate) fn apply(self, draft: &mut DraftRecord) {
        match self {
            Self::SellerCode(value) => draft.seller_code = value,
            Self::ClientCode(value) => draft.client_code = value,
            Self::Brand(value) => draft.brand = value,
            Self::Activity(value) => draft.activity = value,
            Self::Description(value) => draft.description = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedRecord {
    pub index: usize,
    pub seller_code: Option<SellerCode>,
    pub client_code: Option<ClientCode>,
    pub brand: Option<Brand>,
    pub activity: Option<Activity>,
    pub description: String,
    pub attachment: Option<DataUri>,
    pub signature: Option<DataUri>,
    pub submitted_at: DateTime<Local>,
}

impl SubmittedRecord {
    pub(crate) fn snapshot(
        index: usize,
        draft: &DraftRecord,
        attachment: Option<DataUri>,
        signature: Option<DataUri>,
        submitted_at: DateTime<Local>,
    ) -> Self {
        Self {
            index,
            seller_code: draft.seller_code,
            client_code: draft.client_code,
            brand: draft.brand,
            activity: draft.activity,
            description: draft.description.clone(),
            attachment,
            signature,
            submitted_at,
        }
    }
}
