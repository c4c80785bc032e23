mod load;
mod types;

pub use load::{get_annotate_data_dir, load_default, load_from_path};
pub use types::{AppConfig, ColorMode, LoggingConfig, TtyState, DEFAULT_PREFIX};
