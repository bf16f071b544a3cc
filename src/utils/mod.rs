pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::{collapse_whitespace, safe_truncate_chars};
pub use url_utils::{base_filename, is_valid_url};
