//! Export of captured frames to a text file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::Frame;
use crate::error::ExportError;
use crate::formatter::write_frame;

/// Write the hex dump of every frame, in order, to `path`.
///
/// The file is created or truncated. The ASCII column holds the frame's
/// printable bytes as-is, so the file is not necessarily valid UTF-8. Returns the number of frames written.
/// Failures are returned as-is; nothing is retried.
pub fn export_frames(frames: &[Arc<Frame>], path: impl AsRef<Path>) -> Result<usize, ExportError> {
    let path = path.as_ref();
    write_dumps(frames, path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Exported {} frames to {:?}", frames.len(), path);
    Ok(frames.len())
}

fn write_dumps(frames: &[Arc<Frame>], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for frame in frames {
        write_frame(&mut writer, frame)?;
    }
    writer.flush()
}
