pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{DATA_DIR_ENV, get_data_dir};
pub use paths::{
    DEFAULT_MAX_FILE_BYTES, base_name, check_file_size, final_extension, format_path_with_tilde,
    strip_final_extension,
};
