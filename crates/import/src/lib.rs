pub mod csv;
pub mod transform;

pub use csv::{read_raw_rows, ImportError};
pub use transform::{
    transform_file, transform_reader, transform_rows, FileTransform, SkipReason, SkippedRow,
    DATE_FORMAT,
};
