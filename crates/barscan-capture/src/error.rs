//! Error types for barscan-capture
//!
//! Device-acquisition failures each map to a distinct user-facing message.
//! They are terminal for one start attempt but never fatal to the
//! controller; the user may retry or switch devices.

use thiserror::Error;

/// Errors from capture device acquisition and streaming
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// Camera permission was refused
    #[error("camera permission denied")]
    PermissionDenied,

    /// No capture device is available
    #[error("no camera found")]
    NoDeviceFound,

    /// The device exists but is held by another application
    #[error("camera is busy")]
    DeviceBusy,

    /// Any other capture failure
    #[error("capture failed: {0}")]
    Failed(String),
}

impl CaptureError {
    /// The message shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => "Grant camera permission to scan.",
            CaptureError::NoDeviceFound => "No camera found. Connect one or use a phone.",
            CaptureError::DeviceBusy => {
                "Camera is busy in another application. Close it and try again."
            }
            CaptureError::Failed(_) => "Camera error. Try again.",
        }
    }
}

/// Result type for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;
