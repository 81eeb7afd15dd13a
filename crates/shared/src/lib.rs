pub mod data_uri;
pub mod domain;
pub mod error;

pub use data_uri::DataUri;
