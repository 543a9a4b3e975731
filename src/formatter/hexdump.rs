//! Canonical hex + ASCII dump.

use std::fmt::Write as _;
use std::io;

use crate::domain::Frame;

/// Bytes shown per dump row.
pub const BYTES_PER_ROW: usize = 16;

/// Indent before the hex column.
const ROW_INDENT: &str = "   ";
/// Placeholder for a missing byte in a short final row.
const BLANK_BYTE: &str = "   ";
/// Gap between the hex and ASCII columns.
const COLUMN_GAP: &str = "         ";

/// Whether a byte is rendered as itself in the ASCII column.
///
/// The upper bound is 128 inclusive, one past DEL; existing dumps depend on
/// this range.
pub fn is_printable(byte: u8) -> bool {
    (32..=128).contains(&byte)
}

/// Render a frame as a byte-count header followed by rows of 16 bytes,
/// each row showing zero-padded lowercase hex then the ASCII rendering.
///
/// ```text
/// Packet size: 17
/// Packet content:
///     00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f         ................
///     10                                                      .
/// ```
pub fn format_frame(frame: &Frame) -> String {
    let bytes = frame.bytes();
    let rows = bytes.len().div_ceil(BYTES_PER_ROW);
    // header + per row: indent, 3 chars per byte, gap, ascii, newline
    let mut output = String::with_capacity(48 + rows * 80);
    output.push_str(&header(bytes.len()));

    for row in bytes.chunks(BYTES_PER_ROW) {
        output.push_str(&hex_column(row));
        output.extend(row.iter().map(|&byte| {
            if is_printable(byte) {
                char::from(byte)
            } else {
                '.'
            }
        }));
        output.push('\n');
    }

    output
}

/// Write the same dump as [`format_frame`] as raw bytes.
///
/// Printable bytes go into the ASCII column unchanged, so byte 128 is a
/// single 0x80 byte in the output rather than the two-byte UTF-8 encoding
/// of U+0080. Exported files use this form.
pub fn write_frame<W: io::Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    let bytes = frame.bytes();
    out.write_all(header(bytes.len()).as_bytes())?;

    for row in bytes.chunks(BYTES_PER_ROW) {
        out.write_all(hex_column(row).as_bytes())?;
        let ascii: Vec<u8> = row
            .iter()
            .map(|&byte| if is_printable(byte) { byte } else { b'.' })
            .collect();
        out.write_all(&ascii)?;
        out.write_all(b"\n")?;
    }

    Ok(())
}

fn header(size: usize) -> String {
    format!("Packet size: {}\nPacket content:\n", size)
}

/// Indent, hex bytes, padding for a short row, and the gap before ASCII.
fn hex_column(row: &[u8]) -> String {
    let mut column = String::with_capacity(ROW_INDENT.len() + BYTES_PER_ROW * 3 + COLUMN_GAP.len());
    column.push_str(ROW_INDENT);
    for byte in row {
        // Writing into a String cannot fail.
        let _ = write!(column, " {:02x}", byte);
    }
    for _ in row.len()..BYTES_PER_ROW {
        column.push_str(BLANK_BYTE);
    }
    column.push_str(COLUMN_GAP);
    column
}
