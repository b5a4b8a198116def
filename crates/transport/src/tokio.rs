//! Frame queue implementation for the Tokio runtime.

use tokio::sync::mpsc::{self, error::TrySendError};
use tuya_leds_core::Frame;

use crate::{FrameSink, QueueError, Transport};

/// Slots kept free for the final frame.
const RESERVED_SLOTS: usize = 1;

/// Creates a frame queue with room for `capacity` frames.
///
/// One more slot is reserved for the final frame, so shutdown never waits
/// for the forwarder. The transport side is given to a device, the forwarder
/// side should be driven by [`FrameForwarder::run`] in its own task.
pub fn channel(capacity: usize) -> (QueuedTransport, FrameForwarder) {
    let (sender, receiver) = mpsc::channel(capacity + RESERVED_SLOTS);
    (QueuedTransport { sender }, FrameForwarder { receiver })
}

/// A transport which only puts frames into the queue.
///
/// The transport is the only producer of its queue, otherwise the reserved
/// slot could be taken by someone else.
#[derive(Debug)]
pub struct QueuedTransport {
    sender: mpsc::Sender<Frame>,
}

impl QueuedTransport {
    fn try_send(&self, frame: &Frame) -> nb::Result<(), QueueError> {
        self.sender.try_send(frame.clone()).map_err(|err| match err {
            TrySendError::Full(_) => nb::Error::WouldBlock,
            TrySendError::Closed(_) => nb::Error::Other(QueueError::Closed),
        })
    }
}

impl Transport for QueuedTransport {
    type Error = QueueError;

    fn send_colors(&mut self, frame: &Frame) -> nb::Result<(), Self::Error> {
        if self.sender.is_closed() {
            return Err(nb::Error::Other(QueueError::Closed));
        }
        if self.sender.capacity() <= RESERVED_SLOTS {
            return Err(nb::Error::WouldBlock);
        }
        self.try_send(frame)
    }

    fn send_final(&mut self, frame: &Frame) -> nb::Result<(), Self::Error> {
        self.try_send(frame)
    }
}

/// Receiving side of the frame queue.
#[derive(Debug)]
pub struct FrameForwarder {
    receiver: mpsc::Receiver<Frame>,
}

impl FrameForwarder {
    /// Delivers queued frames to the sink in order.
    ///
    /// Runs until every transport is dropped and the queue is drained, then
    /// returns the sink back. Delivery failures are logged and the frame is
    /// lost.
    pub async fn run<S: FrameSink>(mut self, mut sink: S) -> S {
        let mut delivered = 0_usize;
        while let Some(frame) = self.receiver.recv().await {
            match sink.send_frame(frame).await {
                Ok(()) => delivered += 1,
                Err(err) => log::warn!("Unable to deliver frame: {err}"),
            }
        }

        log::info!("Frame queue closed after {delivered} frames");
        sink
    }
}
