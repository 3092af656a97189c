//! Filesystem operations: directory listing and collision-safe renames.

mod apply;
mod atomic;
mod helpers;
mod listing;
mod util;

pub use apply::apply_plan;
pub use atomic::rename_no_clobber;
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use listing::{list_children, list_subdirs, sibling_names};
