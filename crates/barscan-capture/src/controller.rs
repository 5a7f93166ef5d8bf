//! The live capture controller
//!
//! Owns the capture device for its lifetime and runs the frame loop as a
//! spawned task. One controller holds at most one active device; starting
//! while already scanning is a no-op, stopping is always safe.

use crate::device::{CameraFacing, CaptureDevice, DeviceConstraint, DeviceInfo, DeviceProvider};
use crate::error::{CaptureError, CaptureResult};
use barscan_cascade::DecodeCascade;
use barscan_route::{DecodeRouter, ProductCatalog, RouteAction, route_detached};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Options for the capture controller.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Preferred camera facing for `start()`
    pub facing: CameraFacing,
    /// Delay between releasing one device and acquiring the next when
    /// switching cameras, so the old stream fully lets go
    pub settle_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Environment,
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No device held
    Idle,
    /// Acquiring a device
    Acquiring,
    /// Previewing and decoding frames
    Scanning,
    /// Stopped after scanning; a new `start()` is allowed
    Stopped,
}

/// Manages a capture device and feeds its frames into the cascade.
pub struct CaptureController<P, C>
where
    P: DeviceProvider,
    C: ProductCatalog + 'static,
{
    provider: P,
    cascade: Arc<DecodeCascade>,
    router: Arc<DecodeRouter<C>>,
    actions: mpsc::Sender<RouteAction>,
    options: ControllerOptions,
    state: ControllerState,
    devices: Vec<DeviceInfo>,
    current_device_id: Option<String>,
    stop_tx: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl<P, C> CaptureController<P, C>
where
    P: DeviceProvider,
    C: ProductCatalog + 'static,
{
    /// Create an idle controller.
    pub fn new(
        provider: P,
        cascade: Arc<DecodeCascade>,
        router: Arc<DecodeRouter<C>>,
        actions: mpsc::Sender<RouteAction>,
    ) -> Self {
        Self {
            provider,
            cascade,
            router,
            actions,
            options: ControllerOptions::default(),
            state: ControllerState::Idle,
            devices: Vec::new(),
            current_device_id: None,
            stop_tx: None,
            task: None,
        }
    }

    /// Set the controller options.
    pub fn with_options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The devices seen at the last enumeration.
    pub fn devices(&self) -> &[DeviceInfo] {
        &self.devices
    }

    /// Acquire a device and start the frame loop.
    ///
    /// Prefers the configured facing and falls back to any available
    /// device when the hint is unavailable or unsupported. On failure the
    /// controller returns to `Idle`; the caller may retry.
    pub async fn start(&mut self) -> CaptureResult<()> {
        if self.state == ControllerState::Scanning {
            return Ok(());
        }
        self.state = ControllerState::Acquiring;

        if let Ok(devices) = self.provider.list_devices().await {
            self.devices = devices;
        }

        let device = match self
            .provider
            .acquire(&DeviceConstraint::Facing(self.options.facing))
            .await
        {
            Ok(device) => device,
            Err(e) => {
                debug!(error = %e, "preferred facing unavailable, falling back to any device");
                match self.provider.acquire(&DeviceConstraint::Any).await {
                    Ok(device) => device,
                    Err(e) => {
                        self.state = ControllerState::Idle;
                        return Err(e);
                    }
                }
            }
        };

        self.spawn_scan_loop(device);
        Ok(())
    }

    /// Stop the frame loop and release the device.
    ///
    /// Safe to call in any state; from `Idle` or `Stopped` this is a
    /// no-op and never fails.
    pub fn stop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(true);
        }
        self.task = None;
        if matches!(
            self.state,
            ControllerState::Scanning | ControllerState::Acquiring
        ) {
            self.state = ControllerState::Stopped;
        }
    }

    /// Switch to the next device in the cyclic device list.
    ///
    /// Equivalent to `stop()` followed by `start()` against the next
    /// device id, with a settle delay in between.
    pub async fn flip_camera(&mut self) -> CaptureResult<()> {
        if self.devices.is_empty() {
            if let Ok(devices) = self.provider.list_devices().await {
                self.devices = devices;
            }
        }
        if self.devices.is_empty() {
            return Err(CaptureError::NoDeviceFound);
        }

        let current = self
            .current_device_id
            .as_ref()
            .and_then(|id| self.devices.iter().position(|d| &d.id == id))
            .unwrap_or(0);
        let next = self.devices[(current + 1) % self.devices.len()].clone();

        self.stop();
        tokio::time::sleep(self.options.settle_delay).await;

        self.state = ControllerState::Acquiring;
        match self
            .provider
            .acquire(&DeviceConstraint::Exact(next.id.clone()))
            .await
        {
            Ok(device) => {
                self.spawn_scan_loop(device);
                Ok(())
            }
            Err(e) => {
                self.state = ControllerState::Idle;
                Err(e)
            }
        }
    }

    fn spawn_scan_loop(&mut self, device: P::Device) {
        self.current_device_id = Some(device.info().id.clone());
        debug!(device = %device.info().label, "scanner started");

        let (stop_tx, stop_rx) = watch::channel(false);
        self.stop_tx = Some(stop_tx);
        self.task = Some(tokio::spawn(scan_loop(
            device,
            self.cascade.clone(),
            self.router.clone(),
            self.actions.clone(),
            stop_rx,
        )));
        self.state = ControllerState::Scanning;
    }
}

impl<P, C> Drop for CaptureController<P, C>
where
    P: DeviceProvider,
    C: ProductCatalog + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}

/// The frame loop: pull frames, decode with single-slot backpressure,
/// route successes.
async fn scan_loop<D, C>(
    mut device: D,
    cascade: Arc<DecodeCascade>,
    router: Arc<DecodeRouter<C>>,
    actions: mpsc::Sender<RouteAction>,
    mut stop_rx: watch::Receiver<bool>,
) where
    D: CaptureDevice,
    C: ProductCatalog + 'static,
{
    let busy = Arc::new(AtomicBool::new(false));

    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    break;
                }
            }
            frame = device.next_frame() => {
                match frame {
                    Ok(surface) => {
                        // Drop the frame while a decode is still in flight
                        if busy.swap(true, Ordering::AcqRel) {
                            continue;
                        }
                        let cascade = cascade.clone();
                        let router = router.clone();
                        let actions = actions.clone();
                        let busy = busy.clone();
                        let stop = stop_rx.clone();
                        tokio::spawn(async move {
                            let decoded = tokio::task::spawn_blocking(move || {
                                cascade.decode_live_frame(&surface)
                            })
                            .await
                            .ok()
                            .flatten();
                            busy.store(false, Ordering::Release);

                            if let Some(read) = decoded {
                                // A read finishing after stop() is discarded
                                if !*stop.borrow() {
                                    route_detached(router, read.text, actions);
                                }
                            }
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "frame capture failed, stopping scan loop");
                        break;
                    }
                }
            }
        }
    }

    device.release();
    debug!("scanner stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ControllerOptions::default();
        assert_eq!(options.facing, CameraFacing::Environment);
        assert_eq!(options.settle_delay, Duration::from_millis(100));
    }
}
