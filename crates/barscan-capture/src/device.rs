//! Capture device collaborator traits
//!
//! Acquisition is by constraint: a facing-mode hint, an explicit device
//! id, or anything available. Providers that cannot interpret a hint are
//! free to reject it; the controller falls back to `Any` on its own.

use crate::error::CaptureError;
use barscan_core::RasterSurface;
use std::future::Future;

/// Identity of one capture device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Provider-scoped stable identifier
    pub id: String,
    /// Human-readable label
    pub label: String,
}

impl DeviceInfo {
    /// Whether the label suggests a rear/environment-facing camera.
    pub fn looks_environment_facing(&self) -> bool {
        let label = self.label.to_lowercase();
        label.contains("back") || label.contains("rear") || label.contains("environment")
    }
}

/// Which way a camera points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    /// Rear camera, pointing away from the user
    Environment,
    /// Front camera, pointing at the user
    User,
}

/// Acquisition constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceConstraint {
    /// Prefer a camera facing the given way
    Facing(CameraFacing),
    /// A specific device by id
    Exact(String),
    /// Whatever is available
    Any,
}

/// An acquired capture stream.
pub trait CaptureDevice: Send {
    /// Identity of the underlying device.
    fn info(&self) -> &DeviceInfo;

    /// Wait for and return the next frame as a luma raster.
    fn next_frame(&mut self) -> impl Future<Output = Result<RasterSurface, CaptureError>> + Send;

    /// Release the device. Must be idempotent.
    fn release(&mut self);
}

/// A source of capture devices.
pub trait DeviceProvider: Send + Sync {
    /// The device type this provider acquires.
    type Device: CaptureDevice + 'static;

    /// Enumerate available devices, in a stable order.
    fn list_devices(&self) -> impl Future<Output = Result<Vec<DeviceInfo>, CaptureError>> + Send;

    /// Acquire a device satisfying the constraint.
    fn acquire(
        &self,
        constraint: &DeviceConstraint,
    ) -> impl Future<Output = Result<Self::Device, CaptureError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_label_detection() {
        let rear = DeviceInfo {
            id: "0".to_string(),
            label: "Back Ultra Wide Camera".to_string(),
        };
        let front = DeviceInfo {
            id: "1".to_string(),
            label: "FaceTime HD Camera".to_string(),
        };
        assert!(rear.looks_environment_facing());
        assert!(!front.looks_environment_facing());
    }
}
