//! Shared, append-only frame collection.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::warn;

use crate::domain::Frame;
use crate::error::ExportError;
use crate::export::export_frames;

/// Ordered list of captured frames shared between the capture thread and
/// its consumer.
///
/// Cloning the sink clones the handle, not the frames. The capture engine
/// only appends; consumers read and may clear. Frames are fully built
/// before the write lock is taken, so a reader never sees a partial frame,
/// and `clear` cannot interleave with an append.
#[derive(Debug, Clone, Default)]
pub struct FrameSink {
    frames: Arc<RwLock<Vec<Arc<Frame>>>>,
}

impl FrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame, returning the new length.
    pub fn append(&self, frame: Frame) -> usize {
        let frame = Arc::new(frame);
        let mut frames = self.write();
        frames.push(frame);
        frames.len()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The frame at `index`, if captured yet.
    pub fn get(&self, index: usize) -> Option<Arc<Frame>> {
        self.read().get(index).cloned()
    }

    /// Point-in-time copy of every frame handle.
    ///
    /// Take one snapshot per render pass; later appends do not affect it.
    pub fn snapshot(&self) -> Vec<Arc<Frame>> {
        self.read().clone()
    }

    /// Frames from `start` onward, for consumers that poll incrementally.
    pub fn since(&self, start: usize) -> Vec<Arc<Frame>> {
        self.read().get(start..).map(|frames| frames.to_vec()).unwrap_or_default()
    }

    /// Drop every frame, returning how many were removed.
    pub fn clear(&self) -> usize {
        let mut frames = self.write();
        let removed = frames.len();
        frames.clear();
        removed
    }

    /// Write the hex dump of every frame currently held to `path`.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<usize, ExportError> {
        export_frames(&self.snapshot(), path)
    }

    // A push or clear is a single Vec operation, so a poisoned lock still
    // guards a consistent list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Frame>>> {
        self.frames.read().unwrap_or_else(|poisoned| {
            warn!("Frame sink lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Frame>>> {
        self.frames.write().unwrap_or_else(|poisoned| {
            warn!("Frame sink lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn numbered_frame(n: usize) -> Frame {
        // every byte carries the tag and the length derives from it, so a
        // torn frame cannot pass the checks below
        let tag = (n % 256) as u8;
        Frame::new(vec![tag; 14 + usize::from(tag) % 50])
    }

    #[test]
    fn test_append_preserves_order() {
        let sink = FrameSink::new();
        for n in 0..10 {
            assert_eq!(sink.append(numbered_frame(n)), n + 1);
        }

        assert_eq!(sink.len(), 10);
        for (i, frame) in sink.snapshot().iter().enumerate() {
            assert_eq!(**frame, numbered_frame(i));
        }
    }

    #[test]
    fn test_get_and_since() {
        let sink = FrameSink::new();
        sink.append(Frame::new(vec![1]));
        sink.append(Frame::new(vec![2]));
        sink.append(Frame::new(vec![3]));

        assert_eq!(sink.get(1).unwrap().bytes(), &[2]);
        assert!(sink.get(3).is_none());
        assert_eq!(sink.since(1).len(), 2);
        assert!(sink.since(3).is_empty());
        assert!(sink.since(10).is_empty());
    }

    #[test]
    fn test_clear_returns_removed_count() {
        let sink = FrameSink::new();
        sink.append(Frame::new(vec![0; 20]));
        sink.append(Frame::new(vec![0; 20]));

        assert_eq!(sink.clear(), 2);
        assert!(sink.is_empty());
        assert_eq!(sink.clear(), 0);
    }

    #[test]
    fn test_clones_share_storage() {
        let sink = FrameSink::new();
        let consumer = sink.clone();
        sink.append(Frame::new(vec![7; 14]));
        assert_eq!(consumer.len(), 1);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_appends() {
        let sink = FrameSink::new();
        sink.append(Frame::new(vec![1; 14]));
        let snapshot = sink.snapshot();
        sink.append(Frame::new(vec![2; 14]));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_concurrent_append_and_iteration() {
        const TOTAL: usize = 2000;
        let sink = FrameSink::new();

        let writer = {
            let sink = sink.clone();
            thread::spawn(move || {
                for n in 0..TOTAL {
                    sink.append(numbered_frame(n));
                }
            })
        };

        let mut last_len = 0;
        while last_len < TOTAL {
            let snapshot = sink.snapshot();
            assert!(snapshot.len() >= last_len);
            for (i, frame) in snapshot.iter().enumerate() {
                assert_eq!(frame.len(), frame.bytes().len());
                assert_eq!(**frame, numbered_frame(i));
            }
            last_len = snapshot.len();
        }

        writer.join().unwrap();
        assert_eq!(sink.len(), TOTAL);
    }

    #[test]
    fn test_concurrent_clear_never_exposes_partial_frames() {
        let sink = FrameSink::new();

        let writer = {
            let sink = sink.clone();
            thread::spawn(move || {
                for n in 0..1000 {
                    sink.append(numbered_frame(n));
                }
            })
        };

        let mut cleared = 0;
        for _ in 0..200 {
            for frame in sink.snapshot() {
                let first = frame.bytes()[0];
                assert!(frame.bytes().iter().all(|&b| b == first));
                assert_eq!(frame.len(), 14 + usize::from(first) % 50);
            }
            cleared += sink.clear();
        }

        writer.join().unwrap();
        assert_eq!(cleared + sink.len(), 1000);
    }
}
