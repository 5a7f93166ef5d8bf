//! nokhwa-backed capture devices
//!
//! Enabled with the `camera` feature. Acquisition walks a ladder of
//! requested formats from high-rate MJPEG down to whatever the backend
//! offers, and facing hints are resolved by device label since USB/UVC
//! enumeration carries no facing metadata.

use crate::device::{CaptureDevice, DeviceConstraint, DeviceInfo, DeviceProvider};
use crate::error::{CaptureError, CaptureResult};
use barscan_core::RasterSurface;
use nokhwa::pixel_format::LumaFormat;
use nokhwa::utils::{
    ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
    Resolution,
};
use nokhwa::Camera;
use tracing::debug;

/// Device provider over nokhwa.
#[derive(Debug, Default, Clone, Copy)]
pub struct NokhwaProvider;

impl NokhwaProvider {
    /// Create a provider.
    pub fn new() -> Self {
        Self
    }

    fn resolve_index(
        &self,
        devices: &[DeviceInfo],
        constraint: &DeviceConstraint,
    ) -> CaptureResult<u32> {
        let info = match constraint {
            DeviceConstraint::Facing(_) => devices
                .iter()
                .find(|d| d.looks_environment_facing())
                .ok_or(CaptureError::NoDeviceFound)?,
            DeviceConstraint::Exact(id) => devices
                .iter()
                .find(|d| &d.id == id)
                .ok_or(CaptureError::NoDeviceFound)?,
            DeviceConstraint::Any => devices.first().ok_or(CaptureError::NoDeviceFound)?,
        };
        info.id
            .parse::<u32>()
            .map_err(|_| CaptureError::Failed(format!("bad device id: {}", info.id)))
    }
}

impl DeviceProvider for NokhwaProvider {
    type Device = NokhwaDevice;

    async fn list_devices(&self) -> CaptureResult<Vec<DeviceInfo>> {
        let cameras = nokhwa::query(ApiBackend::Auto).map_err(map_error)?;
        Ok(cameras
            .into_iter()
            .map(|info| DeviceInfo {
                id: info.index().to_string(),
                label: info.human_name(),
            })
            .collect())
    }

    async fn acquire(&self, constraint: &DeviceConstraint) -> CaptureResult<Self::Device> {
        let devices = self.list_devices().await?;
        let index = self.resolve_index(&devices, constraint)?;
        let info = devices
            .into_iter()
            .find(|d| d.id == index.to_string())
            .ok_or(CaptureError::NoDeviceFound)?;

        // Format ladder: prefer high-rate MJPEG, degrade gracefully
        let requests = [
            RequestedFormat::new::<LumaFormat>(RequestedFormatType::Closest(CameraFormat::new(
                Resolution::new(1280, 720),
                FrameFormat::MJPEG,
                30,
            ))),
            RequestedFormat::new::<LumaFormat>(RequestedFormatType::Closest(CameraFormat::new(
                Resolution::new(1280, 720),
                FrameFormat::YUYV,
                30,
            ))),
            RequestedFormat::new::<LumaFormat>(RequestedFormatType::Closest(CameraFormat::new(
                Resolution::new(640, 480),
                FrameFormat::MJPEG,
                30,
            ))),
            RequestedFormat::new::<LumaFormat>(RequestedFormatType::None),
        ];

        let mut last_error = CaptureError::NoDeviceFound;
        for (i, requested) in requests.iter().enumerate() {
            debug!(attempt = i + 1, "trying camera format");
            match Camera::new(CameraIndex::Index(index), *requested) {
                Ok(mut camera) => {
                    camera.open_stream().map_err(map_error)?;
                    return Ok(NokhwaDevice {
                        info,
                        camera: Some(camera),
                    });
                }
                Err(e) => last_error = map_error(e),
            }
        }
        Err(last_error)
    }
}

/// An open nokhwa camera stream.
pub struct NokhwaDevice {
    info: DeviceInfo,
    camera: Option<Camera>,
}

impl CaptureDevice for NokhwaDevice {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    async fn next_frame(&mut self) -> CaptureResult<RasterSurface> {
        let camera = self
            .camera
            .as_mut()
            .ok_or_else(|| CaptureError::Failed("device released".to_string()))?;
        let buffer = camera.frame().map_err(map_error)?;
        let decoded = buffer.decode_image::<LumaFormat>().map_err(map_error)?;
        let (width, height) = (decoded.width(), decoded.height());
        RasterSurface::from_raw(width, height, decoded.into_raw())
            .map_err(|e| CaptureError::Failed(e.to_string()))
    }

    fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            let _ = camera.stop_stream();
        }
    }
}

fn map_error(e: nokhwa::NokhwaError) -> CaptureError {
    let message = e.to_string();
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") {
        CaptureError::PermissionDenied
    } else if lower.contains("busy") || lower.contains("in use") {
        CaptureError::DeviceBusy
    } else if lower.contains("not found") || lower.contains("no device") {
        CaptureError::NoDeviceFound
    } else {
        CaptureError::Failed(message)
    }
}
