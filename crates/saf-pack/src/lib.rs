pub mod associate;
pub mod filename;
pub mod metadata_xml;
pub mod pipeline;

pub use associate::{associate_files, extract_file_tokens};
pub use filename::{clean_filename, rename_bitstreams, retarget_raw_extensions, RenameSummary};
pub use metadata_xml::{metadata_document, write_metadata_document};
pub use pipeline::{PipelineOptions, RecordPipeline, RunResult, write_run_report_json};
