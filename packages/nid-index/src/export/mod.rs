//! Export formatters: CSV serialization and the printable server copy.

pub mod csv;
pub mod print;

pub use csv::{export_file_name, to_csv, write_csv};
pub use print::render_server_copy;
