//! Image → WebP conversion through the browser's canvas encoder.

use gloo_file::ObjectUrl;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub const WEBP_MIME: &str = "image/webp";
pub const DEFAULT_QUALITY: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub lossless: bool,
    /// 1..=100, ignored when lossless.
    pub quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            lossless: true,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl EncodeOptions {
    /// The `encoderOptions` argument of `canvas.toBlob`, in 0.0..=1.0.
    pub fn encoder_quality(&self) -> f64 {
        if self.lossless {
            1.0
        } else {
            f64::from(self.quality.clamp(1, 100)) / 100.0
        }
    }
}

#[derive(Debug, Error)]
pub enum WebpError {
    #[error("Please select an image file")]
    NotAnImage,
    #[error("Failed to load image")]
    Load,
    #[error("Could not get canvas context")]
    Canvas,
    #[error("This browser cannot encode WebP")]
    Unsupported,
    #[error("Conversion failed: {0}")]
    Browser(String),
}

impl From<JsValue> for WebpError {
    fn from(v: JsValue) -> Self {
        WebpError::Browser(v.as_string().unwrap_or_else(|| format!("{v:?}")))
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}

/// Positive when the result is smaller than the source.
pub fn savings_percent(source: u64, result: u64) -> Option<f64> {
    if source == 0 {
        return None;
    }
    Some((source as f64 - result as f64) / source as f64 * 100.0)
}

/// `photo.png` → `photo.webp`; names without an extension keep their stem.
pub fn output_file_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.webp"),
        _ => format!("{name}.webp"),
    }
}

pub fn object_url(file: web_sys::File) -> ObjectUrl {
    ObjectUrl::from(gloo_file::Blob::from(web_sys::Blob::from(file)))
}

pub struct Converted {
    pub url: ObjectUrl,
    pub size: u64,
}

/// Decode the image behind `source_url` and re-encode it as WebP.
pub async fn convert(source_url: &str, options: EncodeOptions) -> Result<Converted, WebpError> {
    let image = load_image(source_url).await?;
    let canvas = draw(&image)?;
    let blob = encode(&canvas, options).await?;
    // Browsers without a WebP encoder silently fall back to PNG.
    if blob.type_() != WEBP_MIME {
        return Err(WebpError::Unsupported);
    }
    let size = blob.size() as u64;
    Ok(Converted {
        url: ObjectUrl::from(gloo_file::Blob::from(blob)),
        size,
    })
}

async fn load_image(src: &str) -> Result<HtmlImageElement, WebpError> {
    let image = HtmlImageElement::new()?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    let outcome = JsFuture::from(loaded).await;
    image.set_onload(None);
    image.set_onerror(None);
    outcome.map_err(|_| WebpError::Load)?;
    Ok(image)
}

fn draw(image: &HtmlImageElement) -> Result<HtmlCanvasElement, WebpError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(WebpError::Canvas)?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| WebpError::Canvas)?;
    canvas.set_width(image.natural_width());
    canvas.set_height(image.natural_height());

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(WebpError::Canvas)?
        .dyn_into()
        .map_err(|_| WebpError::Canvas)?;
    ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;
    Ok(canvas)
}

async fn encode(
    canvas: &HtmlCanvasElement,
    options: EncodeOptions,
) -> Result<web_sys::Blob, WebpError> {
    let quality = JsValue::from_f64(options.encoder_quality());
    let mut failure = None;
    let encoded = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(e) = canvas.to_blob_with_type_and_encoder_options(&resolve, WEBP_MIME, &quality)
        {
            failure = Some(e);
        }
    });
    if let Some(e) = failure {
        return Err(e.into());
    }
    // toBlob hands back null when encoding fails.
    JsFuture::from(encoded)
        .await?
        .dyn_into::<web_sys::Blob>()
        .map_err(|_| WebpError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_pick_a_unit() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
    }

    #[test]
    fn savings_are_signed() {
        assert_eq!(savings_percent(1000, 250), Some(75.0));
        assert_eq!(savings_percent(1000, 1500), Some(-50.0));
        assert_eq!(savings_percent(0, 10), None);
    }

    #[test]
    fn output_name_swaps_extension() {
        assert_eq!(output_file_name("photo.png"), "photo.webp");
        assert_eq!(output_file_name("archive.tar.jpg"), "archive.tar.webp");
        assert_eq!(output_file_name("scan"), "scan.webp");
        assert_eq!(output_file_name(".hidden"), ".hidden.webp");
    }

    #[test]
    fn quality_maps_to_encoder_range() {
        assert_eq!(EncodeOptions::default().encoder_quality(), 1.0);
        let lossy = EncodeOptions {
            lossless: false,
            quality: 80,
        };
        assert!((lossy.encoder_quality() - 0.8).abs() < f64::EPSILON);
        let zero = EncodeOptions {
            lossless: false,
            quality: 0,
        };
        assert!((zero.encoder_quality() - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn only_image_mimes_are_accepted() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/jpeg"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime(""));
    }
}
