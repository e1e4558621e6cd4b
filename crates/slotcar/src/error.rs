use slotcar_core::WheelSide;
use thiserror::Error;

/// Errors reported by the controller. None of these abort the tick loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotcarError {
    #[error("Could not find tire for [{joint}]")]
    MissingActuator { side: WheelSide, joint: String },

    #[error("Invalid configuration: `{field}` {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Command inbox for [{robot}] is closed")]
    InboxClosed { robot: String },
}

pub type Result<T> = std::result::Result<T, SlotcarError>;
