use thiserror::Error;

#[derive(Debug, Error)]
pub enum WiimoteError {
    /// The HID link reported a failure, the code is passed through unchanged.
    #[error("HID link reported error code {0}")]
    Transport(i32),
    #[error(transparent)]
    WiimoteDeviceError(#[from] WiimoteDeviceError),
    #[error("Wii remote is disconnected")]
    Disconnected,
    #[error("a register read is already pending")]
    ReadPending,
    #[error("register writes are limited to 16 bytes, got {0}")]
    WritePayloadTooLarge(usize),
    #[error("report type {0:#04x} is not a data reporting mode")]
    InvalidReportMode(u8),
    #[error("write queue is full")]
    QueueFull,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WiimoteDeviceError {
    #[error("unexpected vendor id {0:#06x}")]
    InvalidVendorID(u16),
    #[error("unexpected product id {0:#06x}")]
    InvalidProductID(u16),
    #[error("invalid data received from the Wii remote")]
    InvalidData,
    #[error("checksum mismatch")]
    InvalidChecksum,
    #[error("report is missing data")]
    MissingData,
}

pub type WiimoteResult<T> = Result<T, WiimoteError>;
