//! Background capture loop with start/stop controls.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info, warn};

use super::{CaptureState, FrameSink, FrameSource};
use crate::error::{CaptureError, SocketError};

/// Slot the capture thread fills when it stops on a fatal read error.
type ErrorSlot = Arc<Mutex<Option<SocketError>>>;

/// Owns a frame source and the single worker thread that reads from it.
///
/// The source moves into the worker while capture runs and comes back when
/// the worker is joined, so at most one loop ever reads from it. Dropping
/// the engine stops the loop and joins the worker before the source (and
/// its socket) is released.
pub struct CaptureEngine {
    source: Option<Box<dyn FrameSource>>,
    worker: Option<JoinHandle<Box<dyn FrameSource>>>,
    active: Arc<AtomicBool>,
    last_error: ErrorSlot,
}

impl CaptureEngine {
    /// Create an inactive engine around an opened source.
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source: Some(source),
            worker: None,
            active: Arc::new(AtomicBool::new(false)),
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Current state of the capture loop.
    pub fn state(&self) -> CaptureState {
        if self.is_active() {
            CaptureState::Active
        } else {
            CaptureState::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Start capturing into `sink`.
    ///
    /// Returns immediately. A no-op while already active. If a previous
    /// loop was stopped but is still finishing its last read, this waits
    /// for it (at most one poll interval) before starting the new one.
    pub fn start_capture(&mut self, sink: &FrameSink) -> Result<(), CaptureError> {
        if self.is_active() {
            debug!("Capture already active, ignoring start");
            return Ok(());
        }

        self.reclaim_source()?;
        let source = self.source.take().ok_or(CaptureError::NoSource)?;
        let name = source.name().to_string();

        let worker = CaptureWorker {
            source,
            sink: sink.clone(),
            active: Arc::clone(&self.active),
            last_error: Arc::clone(&self.last_error),
        };

        self.active.store(true, Ordering::SeqCst);
        let spawned = thread::Builder::new()
            .name("rawsniff-capture".to_string())
            .spawn(move || worker.run());

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                info!("Capture started on {}", name);
                Ok(())
            }
            Err(e) => {
                self.active.store(false, Ordering::SeqCst);
                error!("Failed to spawn capture worker: {}", e);
                Err(CaptureError::Spawn(e))
            }
        }
    }

    /// Ask the capture loop to stop after its current read.
    ///
    /// Does not wait; one more frame may still be appended after this
    /// returns. Safe to call when already inactive.
    pub fn stop_capture(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            info!("Capture stop requested");
        } else {
            debug!("Capture already inactive, ignoring stop");
        }
    }

    /// Stop capturing and wait for the worker's last read to settle.
    ///
    /// Unlike [`stop_capture`](Self::stop_capture) this blocks for up to one
    /// poll interval. Afterwards no further frame will be appended and any
    /// capture error is in the error slot. The source stays open.
    pub fn wait_stopped(&mut self) -> Result<(), CaptureError> {
        self.stop_capture();
        self.reclaim_source()
    }

    /// Take the error that ended the last capture session, if any.
    pub fn take_error(&self) -> Option<SocketError> {
        lock_slot(&self.last_error).take()
    }

    /// Stop capturing, wait for the worker to finish, and release the
    /// source.
    pub fn close(mut self) -> Result<(), CaptureError> {
        self.shutdown()
    }

    /// Join a finished or stopping worker and take its source back.
    fn reclaim_source(&mut self) -> Result<(), CaptureError> {
        if let Some(handle) = self.worker.take() {
            let source = handle.join().map_err(|_| CaptureError::WorkerPanicked)?;
            self.source = Some(source);
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), CaptureError> {
        self.active.store(false, Ordering::SeqCst);
        let joined = self.reclaim_source();
        if let Some(source) = self.source.take() {
            debug!("Releasing frame source {}", source.name());
        }
        joined
    }
}

impl Drop for CaptureEngine {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("Capture engine shutdown: {}", e);
        }
    }
}

/// State moved onto the capture thread.
struct CaptureWorker {
    source: Box<dyn FrameSource>,
    sink: FrameSink,
    active: Arc<AtomicBool>,
    last_error: ErrorSlot,
}

impl CaptureWorker {
    /// Read frames until stopped or a read fails, then hand the source back.
    fn run(mut self) -> Box<dyn FrameSource> {
        let mut captured: u64 = 0;

        while self.active.load(Ordering::SeqCst) {
            match self.source.read_frame() {
                Ok(Some(frame)) => {
                    let len = frame.len();
                    let total = self.sink.append(frame);
                    captured += 1;
                    debug!(len, total, "Captured frame");
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Capture on {} failed: {}", self.source.name(), e);
                    *lock_slot(&self.last_error) = Some(e);
                    self.active.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }

        info!(
            frames = captured,
            "Capture loop on {} stopped",
            self.source.name()
        );
        self.source
    }
}

fn lock_slot(slot: &ErrorSlot) -> MutexGuard<'_, Option<SocketError>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
