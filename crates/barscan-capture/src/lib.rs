//! Barscan Capture - Live camera capture and continuous decoding
//!
//! Manages the capture device lifecycle as a long-running concurrent
//! process, distinct from the one-shot photo path:
//!
//! ```text
//! Idle -> Acquiring -> Scanning -> Stopped
//! ```
//!
//! While scanning, frames flow through the cascade's live quick path with
//! single-slot backpressure: a frame arriving while a decode is in flight
//! is dropped, never queued behind it. Successful reads fire the result
//! router exactly once per decode event without blocking the frame loop.
//!
//! The capture device is an external collaborator behind the
//! [`DeviceProvider`]/[`CaptureDevice`] traits; the `camera` feature adds a
//! nokhwa-backed implementation.

mod controller;
mod device;
mod error;

#[cfg(feature = "camera")]
pub mod nokhwa_provider;

pub use controller::{CaptureController, ControllerOptions, ControllerState};
pub use device::{CameraFacing, CaptureDevice, DeviceConstraint, DeviceInfo, DeviceProvider};
pub use error::{CaptureError, CaptureResult};
