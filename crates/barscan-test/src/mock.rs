//! Scripted collaborators for tests
//!
//! Engines succeed or fail by script, catalogs answer from a fixed map,
//! and capture devices replay canned frames. All of them are deterministic
//! so ordering-sensitive cascade tests stay exact.

use barscan_capture::{
    CaptureDevice, CaptureError, DeviceConstraint, DeviceInfo, DeviceProvider,
};
use barscan_core::RasterSurface;
use barscan_engine::{DecodeEngine, DecodeHints, EngineError, EngineRead, EngineResult};
use barscan_route::{CatalogError, ProductCatalog, ProductRecord};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Script = Box<dyn Fn(usize, &RasterSurface, &DecodeHints) -> Option<EngineRead> + Send + Sync>;

/// An engine whose outcome per call is decided by a script.
///
/// The script receives the 0-based call index, the surface and the hints,
/// and returns a read to succeed or `None` to fail that call.
pub struct ScriptedEngine {
    name: &'static str,
    calls: AtomicUsize,
    script: Script,
}

impl ScriptedEngine {
    /// Create a scripted engine.
    pub fn new<F>(name: &'static str, script: F) -> Self
    where
        F: Fn(usize, &RasterSurface, &DecodeHints) -> Option<EngineRead> + Send + Sync + 'static,
    {
        Self {
            name,
            calls: AtomicUsize::new(0),
            script: Box::new(script),
        }
    }

    /// An engine that never succeeds.
    pub fn always_fail(name: &'static str) -> Self {
        Self::new(name, |_, _, _| None)
    }

    /// An engine succeeding exactly on its `n`-th call (0-based).
    pub fn succeed_on_call(name: &'static str, n: usize, text: &str) -> Self {
        let text = text.to_string();
        Self::new(name, move |i, _, _| {
            (i == n).then(|| EngineRead {
                text: text.clone(),
                symbology: None,
            })
        })
    }

    /// Number of decode calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Acquire)
    }
}

impl DecodeEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(&self, surface: &RasterSurface, hints: &DecodeHints) -> EngineResult<EngineRead> {
        let call = self.calls.fetch_add(1, Ordering::AcqRel);
        match (self.script)(call, surface, hints) {
            Some(read) => Ok(read),
            None => Err(EngineError::NotFound),
        }
    }
}

/// An engine that panics on every call, for containment tests.
#[derive(Debug, Default)]
pub struct PanickingEngine;

impl DecodeEngine for PanickingEngine {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn decode(&self, _surface: &RasterSurface, _hints: &DecodeHints) -> EngineResult<EngineRead> {
        panic!("engine blew up");
    }
}

/// A product record with plausible field values.
pub fn sample_product(barcode: &str) -> ProductRecord {
    ProductRecord {
        barcode: barcode.to_string(),
        name: "Oat flakes 500g".to_string(),
        price: 3.49,
        unit: Some("pack".to_string()),
        category: Some("groceries".to_string()),
        brand: Some("Acme".to_string()),
        stock: 12,
    }
}

/// In-memory product catalog.
#[derive(Default)]
pub struct MockCatalog {
    products: Mutex<HashMap<String, ProductRecord>>,
}

impl MockCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, builder style.
    pub fn with_product(self, product: ProductRecord) -> Self {
        self.insert(product);
        self
    }

    /// Add a product.
    pub fn insert(&self, product: ProductRecord) {
        self.products
            .lock()
            .expect("catalog lock")
            .insert(product.barcode.clone(), product);
    }
}

impl ProductCatalog for MockCatalog {
    async fn find_by_barcode(&self, barcode: &str) -> Result<Option<ProductRecord>, CatalogError> {
        Ok(self
            .products
            .lock()
            .expect("catalog lock")
            .get(barcode)
            .cloned())
    }
}

/// A catalog whose lookups always fail.
#[derive(Debug, Default)]
pub struct FailingCatalog;

impl ProductCatalog for FailingCatalog {
    async fn find_by_barcode(
        &self,
        _barcode: &str,
    ) -> Result<Option<ProductRecord>, CatalogError> {
        Err(CatalogError::Lookup("backend unreachable".to_string()))
    }
}

/// A capture device replaying canned frames cyclically.
pub struct MockDevice {
    info: DeviceInfo,
    frames: Vec<RasterSurface>,
    next: usize,
    interval: Duration,
}

impl CaptureDevice for MockDevice {
    fn info(&self) -> &DeviceInfo {
        &self.info
    }

    async fn next_frame(&mut self) -> Result<RasterSurface, CaptureError> {
        if self.frames.is_empty() {
            // A camera with nothing to show never yields
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(self.interval).await;
        let frame = self.frames[self.next % self.frames.len()].clone();
        self.next += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        self.frames.clear();
    }
}

/// A device provider with a scripted device list and canned frames.
#[derive(Default)]
pub struct MockProvider {
    devices: Vec<DeviceInfo>,
    frames: Vec<RasterSurface>,
    frame_interval: Duration,
    failure: Option<CaptureError>,
}

impl MockProvider {
    /// Create a provider with no devices.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            frames: Vec::new(),
            frame_interval: Duration::from_millis(5),
            failure: None,
        }
    }

    /// Add a device with the given label.
    pub fn with_device(mut self, label: &str) -> Self {
        let id = self.devices.len().to_string();
        self.devices.push(DeviceInfo {
            id,
            label: label.to_string(),
        });
        self
    }

    /// Set the frames every acquired device replays.
    pub fn with_frames(mut self, frames: Vec<RasterSurface>) -> Self {
        self.frames = frames;
        self
    }

    /// Set the inter-frame interval.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Make every acquisition fail with the given error.
    pub fn failing_with(mut self, failure: CaptureError) -> Self {
        self.failure = Some(failure);
        self
    }
}

impl DeviceProvider for MockProvider {
    type Device = MockDevice;

    async fn list_devices(&self) -> Result<Vec<DeviceInfo>, CaptureError> {
        Ok(self.devices.clone())
    }

    async fn acquire(&self, constraint: &DeviceConstraint) -> Result<Self::Device, CaptureError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        let info = match constraint {
            DeviceConstraint::Facing(_) => self
                .devices
                .iter()
                .find(|d| d.looks_environment_facing())
                .ok_or(CaptureError::NoDeviceFound)?,
            DeviceConstraint::Exact(id) => self
                .devices
                .iter()
                .find(|d| &d.id == id)
                .ok_or(CaptureError::NoDeviceFound)?,
            DeviceConstraint::Any => self.devices.first().ok_or(CaptureError::NoDeviceFound)?,
        };

        Ok(MockDevice {
            info: info.clone(),
            frames: self.frames.clone(),
            next: 0,
            interval: self.frame_interval,
        })
    }
}
