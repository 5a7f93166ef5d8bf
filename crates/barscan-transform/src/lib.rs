//! Barscan Transform - Surface transforms for the decode cascade
//!
//! Each operation takes a [`RasterSurface`](barscan_core::RasterSurface) and
//! produces a new one; nothing is transformed in place. The cascade combines
//! these to derive its image variants:
//!
//! - [`scale_to_max_edge`] - proportional downscale capping the long edge
//! - [`rotate_orth`] / [`rotate_90`] / [`rotate_180`] - exact orthogonal
//!   rotations
//! - [`rotate_by_degrees`] - arbitrary-angle rotation about the center with
//!   an expanded output canvas
//! - [`crop_center`] / [`crop_hstripe`] - centered region extraction
//! - [`binarize`] - adaptive-local or global-histogram (Otsu) thresholding

pub mod binarize;
pub mod crop;
mod error;
pub mod rotate;
pub mod scale;

pub use binarize::{AdaptiveOptions, binarize, binarize_adaptive, binarize_otsu, otsu_threshold};
pub use crop::{crop_center, crop_hstripe};
pub use error::{TransformError, TransformResult};
pub use rotate::{rotate_180, rotate_90, rotate_by_degrees, rotate_orth};
pub use scale::scale_to_max_edge;
