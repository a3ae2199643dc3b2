/// Messages delivered to the audio worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMessage {
    /// Trigger a note by chromatic scale degree (0-11).
    NoteOn(u8),
    /// Finish the current note, then exit the worker loop.
    Shutdown,
}
