use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::EngineMessage;
use crate::error::SynthError;

/// Triggers the worker may hold before new ones are rejected. Keeping this
/// small stops rapid key repeats from queueing many seconds of audio.
pub const QUEUE_DEPTH: usize = 8;

/// Bounded trigger queue between the input thread and the audio worker.
///
/// The worker plays queued notes in FIFO order, one at a time. A trigger
/// that arrives while the queue is full is dropped, not blocked on.
pub struct MessageBus {
    sender: Sender<EngineMessage>,
}

impl MessageBus {
    /// Create the bus and the receiving end for the worker thread.
    pub fn channel() -> (MessageBus, Receiver<EngineMessage>) {
        let (sender, receiver) = bounded(QUEUE_DEPTH);
        (MessageBus { sender }, receiver)
    }

    /// Queue a note trigger. Returns `Busy` when the queue is full and
    /// `Device` when the worker is gone.
    pub fn trigger_note(&self, note_index: u8) -> Result<(), SynthError> {
        match self.sender.try_send(EngineMessage::NoteOn(note_index)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SynthError::Busy),
            Err(TrySendError::Disconnected(_)) => {
                Err(SynthError::device("audio worker has shut down"))
            }
        }
    }

    /// Ask the worker to exit once it has drained the queue.
    pub fn shutdown(&self) {
        let _ = self.sender.send(EngineMessage::Shutdown);
    }
}
