//! End-to-end pipeline regression test
//!
//! A synthetic product barcode is encoded as a JPEG-quality-agnostic PNG,
//! normalized from bytes, decoded by the full standard cascade, and routed
//! against a catalog - the photo path exactly as the application drives it.

use barscan::DecodeOutcome;
use barscan::cascade::DecodeCascade;
use barscan::io::Normalizer;
use barscan::route::{DecodeRouter, RouteAction};
use barscan_test::synth::render_ean13;
use barscan_test::{MockCatalog, RegParams, sample_product};
use std::io::Cursor;

const CODE: &str = "4006381333931";

/// Encode a luma surface as PNG bytes, standing in for an uploaded photo.
fn as_png(surface: &barscan::RasterSurface) -> Vec<u8> {
    let img = image::GrayImage::from_raw(
        surface.width(),
        surface.height(),
        surface.as_raw().to_vec(),
    )
    .unwrap();
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[tokio::test]
async fn pipeline_reg() {
    barscan_test::init_tracing();
    let mut rp = RegParams::new("pipeline");

    let photo = as_png(&render_ean13(CODE, 3, 80).unwrap());

    let surface = Normalizer::new().normalize(&photo).unwrap();
    let outcome = DecodeCascade::standard().decode_photo(&surface).unwrap();

    let decoded = match outcome {
        DecodeOutcome::Decoded(d) => d,
        DecodeOutcome::Exhausted { attempts } => {
            rp.check(false, "cascade exhausted on a clean synthetic");
            eprintln!("exhausted after {attempts} attempts");
            assert!(!rp.cleanup());
            return;
        }
    };
    rp.compare_text(CODE, &decoded.text);

    let catalog = MockCatalog::new().with_product(sample_product(CODE));
    let router = DecodeRouter::new(catalog);
    match router.route(&decoded.text).await.unwrap() {
        RouteAction::OpenProduct { barcode, .. } => {
            rp.compare_text(CODE, &barcode);
        }
        other => {
            rp.check(false, "expected OpenProduct");
            eprintln!("got {other:?}");
        }
    }

    assert!(rp.cleanup(), "pipeline regression test failed");
}
