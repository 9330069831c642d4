//! Cover downloads.

use anyhow::{Context, Result, bail};
use image::DynamicImage;
use image::imageops::FilterType;

/// Longest edge kept after decoding
const MAX_DIMENSION: u32 = 800;

/// Download a cover and decode it.
pub async fn fetch_cover(client: &reqwest::Client, url: &str) -> Result<DynamicImage> {
    tracing::debug!("Downloading cover: {url}");

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to request cover")?;

    if !response.status().is_success() {
        bail!("HTTP {}", response.status());
    }

    let bytes = response.bytes().await.context("Failed to read cover body")?;
    let image = image::load_from_memory(&bytes).context("Failed to decode cover")?;

    Ok(resize_if_needed(image))
}

/// Shrink an image so neither edge exceeds the maximum, keeping aspect ratio.
pub fn resize_if_needed(image: DynamicImage) -> DynamicImage {
    let (width, height) = (image.width(), image.height());

    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return image;
    }

    let ratio = f64::from(width) / f64::from(height);
    let (new_width, new_height) = if width > height {
        (MAX_DIMENSION, (f64::from(MAX_DIMENSION) / ratio) as u32)
    } else {
        ((f64::from(MAX_DIMENSION) * ratio) as u32, MAX_DIMENSION)
    };

    image.resize(new_width, new_height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_image_untouched() {
        let image = resize_if_needed(DynamicImage::new_rgb8(225, 318));
        assert_eq!((image.width(), image.height()), (225, 318));
    }

    #[test]
    fn test_tall_image_shrinks_to_max_height() {
        let image = resize_if_needed(DynamicImage::new_rgb8(1000, 1600));
        assert_eq!(image.height(), MAX_DIMENSION);
        assert_eq!(image.width(), 500);
    }
}
