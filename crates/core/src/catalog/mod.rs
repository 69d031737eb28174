//! Object code catalog: levels, object codes and bulk import parsing.

pub mod error;
pub mod import;
pub mod service;
pub mod types;

pub use error::CatalogError;
pub use import::parse_import;
pub use service::{CatalogService, MAX_CODE_LEN, MAX_HEAD_LEN, MAX_LEVEL_NAME_LEN};
pub use types::{
    ImportIssue, ImportReport, ImportRow, LevelInput, ObjectCode, ObjectCodeInput,
    ObjectCodeLevel,
};
