//! Barscan Route - What happens after a successful decode
//!
//! A decoded barcode means one of two user-facing actions: the product is
//! already registered (open its edit view) or it is unknown (populate a
//! blank creation form with the code and put the cursor in the name
//! field). The decision needs one existence query against the product
//! catalog, which is an external collaborator behind the
//! [`ProductCatalog`] trait.
//!
//! Routing is fire-and-forget relative to live capture: the lookup runs as
//! its own task and never blocks frame decoding.

mod catalog;
mod error;
mod router;

pub use catalog::{CatalogError, ProductCatalog, ProductRecord};
pub use error::{RouteError, RouteResult};
pub use router::{DecodeRouter, FormField, RouteAction, route_detached};
