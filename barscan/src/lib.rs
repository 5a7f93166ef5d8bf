//! Barscan - Barcode capture pipeline
//!
//! Takes a camera stream or a phone photo in, hands a product action out:
//!
//! - Input normalization (codec sniffing, external conversion for
//!   HEIC-like formats, decode to luma)
//! - An ordered, short-circuiting decode cascade over multiple
//!   recognition engines and image variants
//! - A live capture controller with single-slot frame backpressure
//! - Result routing against the product catalog (edit existing vs.
//!   create new)
//!
//! # Example
//!
//! ```no_run
//! use barscan::cascade::DecodeCascade;
//! use barscan::io::Normalizer;
//!
//! let photo_bytes: Vec<u8> = std::fs::read("shelf.jpg").unwrap();
//! let surface = Normalizer::new().normalize(&photo_bytes).unwrap();
//!
//! let cascade = DecodeCascade::standard();
//! match cascade.decode_photo(&surface).unwrap() {
//!     barscan::DecodeOutcome::Decoded(read) => {
//!         println!("{} via {}", read.text, read.engine);
//!     }
//!     barscan::DecodeOutcome::Exhausted { attempts } => {
//!         println!("could not read barcode from photo ({attempts} attempts)");
//!     }
//! }
//! ```

// Re-export core types (the shared data model)
pub use barscan_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use barscan_capture as capture;
pub use barscan_cascade as cascade;
pub use barscan_engine as engine;
pub use barscan_io as io;
pub use barscan_route as route;
pub use barscan_transform as transform;
