use thiserror::Error;

/// Failure reported by the graphics device.
///
/// Every variant is fatal to the object being built; nothing in this crate
/// retries or falls back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("failed to create descriptor heap with {descriptors} descriptors: {reason}")]
    DescriptorHeap { descriptors: u32, reason: String },

    #[error("failed to create pipeline state `{label}`: {reason}")]
    PipelineState { label: String, reason: String },

    #[error("failed to create {size}-byte buffer `{label}`: {reason}")]
    Buffer { label: String, size: u64, reason: String },

    #[error("write of {len} bytes at offset {offset} exceeds buffer size {size}")]
    WriteOutOfBounds { offset: u64, len: u64, size: u64 },

    #[error("unknown device object {0}")]
    UnknownObject(u64),

    #[error("device removed: {0}")]
    DeviceRemoved(String),
}
