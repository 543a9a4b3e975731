//! Frame rendering.
//!
//! Pure functions that turn a frame into the text consumers display or
//! export. `write_frame` writes to a caller-supplied writer; nothing here
//! opens files or sockets.

mod hexdump;
mod summary;

pub use hexdump::{format_frame, is_printable, write_frame, BYTES_PER_ROW};
pub use summary::{describe_frame, format_mac, FrameRow};
