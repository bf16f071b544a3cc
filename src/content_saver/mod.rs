//! Output writers: per-target CSVs, raw markup archive, master dataset

pub(crate) mod csv_io;
mod csv_saver;
mod filenames;
mod html_saver;

pub use csv_saver::{RECORD_COLUMNS, append_to_master_dataset, write_batch_output};
pub use filenames::candidate_name;
pub use html_saver::archive_raw_markup;
