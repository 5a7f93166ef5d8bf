//! The decode result router

use crate::catalog::{ProductCatalog, ProductRecord};
use crate::error::{RouteError, RouteResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A form field the UI should focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// The product name input
    Name,
}

/// The next user-facing action after a successful decode.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteAction {
    /// The product exists: navigate to its edit view
    OpenProduct {
        barcode: String,
        product: ProductRecord,
    },
    /// Unknown barcode: populate a blank creation form with it and focus
    /// the given field; nothing else is prefilled
    NewProductForm { barcode: String, focus: FormField },
}

impl RouteAction {
    /// The barcode this action carries.
    pub fn barcode(&self) -> &str {
        match self {
            RouteAction::OpenProduct { barcode, .. } => barcode,
            RouteAction::NewProductForm { barcode, .. } => barcode,
        }
    }
}

/// Routes decoded barcode strings to user-facing actions.
///
/// Also the entry point for manually typed barcodes: the same
/// existence-check-then-branch applies whether the code came from a camera
/// frame, a photo, or the keyboard.
pub struct DecodeRouter<C> {
    catalog: C,
}

impl<C: ProductCatalog> DecodeRouter<C> {
    /// Create a router over a catalog collaborator.
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Decide the action for a decoded (or typed) barcode.
    ///
    /// Input is trimmed; an empty string is rejected without a lookup.
    pub async fn route(&self, barcode: &str) -> RouteResult<RouteAction> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(RouteError::EmptyBarcode);
        }

        match self.catalog.find_by_barcode(barcode).await? {
            Some(product) => {
                debug!(barcode, "product exists, opening edit view");
                Ok(RouteAction::OpenProduct {
                    barcode: barcode.to_string(),
                    product,
                })
            }
            None => {
                debug!(barcode, "unknown product, preparing creation form");
                Ok(RouteAction::NewProductForm {
                    barcode: barcode.to_string(),
                    focus: FormField::Name,
                })
            }
        }
    }
}

/// Route a barcode without blocking the caller.
///
/// Spawns the lookup as its own task and delivers the action through
/// `actions`. Lookup failures are logged and swallowed; the capture loop
/// keeps running either way.
pub fn route_detached<C>(
    router: Arc<DecodeRouter<C>>,
    barcode: String,
    actions: mpsc::Sender<RouteAction>,
) where
    C: ProductCatalog + 'static,
{
    tokio::spawn(async move {
        match router.route(&barcode).await {
            Ok(action) => {
                let _ = actions.send(action).await;
            }
            Err(e) => warn!(error = %e, "routing decoded barcode failed"),
        }
    });
}
