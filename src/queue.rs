use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Sender, TrySendError};
use tracing::{error, trace, warn};

use crate::config::WriteQueueConfig;
use crate::native::HidLink;
use crate::result::{WiimoteError, WiimoteResult};

/// Paces output reports to a Wii remote.
///
/// Frames are sent in order by a worker thread that waits the configured interval after every write.
/// Enqueueing never blocks, a full queue is reported as `QueueFull`.
pub struct WriteQueue {
    sender: Option<Sender<Vec<u8>>>,
    worker: Option<JoinHandle<()>>,
}

impl WriteQueue {
    /// Starts the worker thread writing to `link`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the worker thread could not be spawned.
    pub fn spawn(link: Arc<dyn HidLink>, config: WriteQueueConfig) -> WiimoteResult<Self> {
        let (sender, receiver) = crossbeam_channel::bounded::<Vec<u8>>(config.capacity.max(1));
        let interval = config.min_write_interval();

        let worker = std::thread::Builder::new()
            .name("wiimote-write-queue".to_string())
            .spawn(move || {
                for frame in receiver {
                    trace!(frame = ?frame, "queued frame sent");
                    if let Err(error) = link.send(&frame) {
                        error!(%error, report_id = frame.first().copied(), "queued write failed");
                    }
                    std::thread::sleep(interval);
                }
            })?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Adds a frame to the queue.
    ///
    /// # Errors
    ///
    /// Returns `QueueFull` if the queue holds its capacity of frames and `Disconnected` if the worker stopped.
    pub fn enqueue(&self, frame: &[u8]) -> WiimoteResult<()> {
        let Some(sender) = &self.sender else {
            return Err(WiimoteError::Disconnected);
        };
        sender.try_send(frame.to_vec()).map_err(|error| match error {
            TrySendError::Full(frame) => {
                warn!(report_id = frame.first().copied(), "write queue is full, frame dropped");
                WiimoteError::QueueFull
            }
            TrySendError::Disconnected(_) => WiimoteError::Disconnected,
        })
    }

    /// Number of frames waiting to be sent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for WriteQueue {
    fn drop(&mut self) {
        // Closing the channel ends the worker once the remaining frames are sent
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            _ = worker.join();
        }
    }
}
