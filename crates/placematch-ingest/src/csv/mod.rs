//! CSV reading and writing.

mod reader;
mod writer;

pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_dataset,
    read_dataset_from_reader, validate_encoding,
};
pub use writer::{write_dataset, write_dataset_to_writer};
