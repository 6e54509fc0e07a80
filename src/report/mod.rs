// Status reporting: the fixed-width table of per-instance fault booleans.

pub mod table;

pub use table::{format_elapsed, header_row, print_cycle, status_row};
