//! Interactive command-line interface
//!
//! Bridges console input with the entry service and the report filters.

pub mod entry;
pub mod menu;
pub mod prompt;

pub use entry::{run_entry_dialog, EntryKind};
pub use menu::{local_today, Screen, Session};
pub use prompt::Console;
