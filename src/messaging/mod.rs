pub mod bus;
pub mod types;

pub use bus::MessageBus;
pub use types::EngineMessage;
