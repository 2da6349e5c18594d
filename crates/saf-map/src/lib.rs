pub mod canonical;
pub mod dublin_core;
pub mod required;

pub use canonical::{base_column, canonical_column, is_placeholder_column, normalize_key};
pub use dublin_core::{DcField, decompose, filename_columns, is_filename_column, is_metadata_column};
pub use required::missing_required_fields;
