//! Band timeline bars.
//!
//! Renders a band series as a horizontal strip, one colour per band, scaled
//! to the requested width.

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use posex_models::BandLabelSeries;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Render `bands` as a `width` x `height` strip.
///
/// Column `x` shows band `floor(x * n / width)`, so every band gets at least
/// one column when `width >= n` and bands are sampled when it is not.
pub fn render_band_timeline(
    bands: &BandLabelSeries,
    width: u32,
    height: u32,
) -> MediaResult<RgbImage> {
    if bands.is_empty() {
        return Err(MediaError::invalid_input("No bands to render"));
    }
    if width == 0 || height == 0 {
        return Err(MediaError::invalid_input(format!(
            "Timeline size must be non-zero, got {}x{}",
            width, height
        )));
    }

    let labels = bands.labels();
    let n = labels.len() as u64;
    let columns: Vec<Rgb<u8>> = (0..width as u64)
        .map(|x| {
            let index = (x * n / width as u64) as usize;
            Rgb(labels[index].rgb())
        })
        .collect();

    Ok(ImageBuffer::from_fn(width, height, |x, _| columns[x as usize]))
}

/// Render and write a PNG timeline to `path`.
pub fn save_band_timeline<P: AsRef<Path>>(
    path: P,
    bands: &BandLabelSeries,
    width: u32,
    height: u32,
) -> MediaResult<()> {
    let path = path.as_ref();
    let image = render_band_timeline(bands, width, height)?;
    image.save_with_format(path, ImageFormat::Png)?;
    debug!(path = %path.display(), bands = bands.len(), "Saved band timeline");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use posex_models::StabilityBand;

    fn series(labels: &[StabilityBand]) -> BandLabelSeries {
        BandLabelSeries::new(labels.to_vec())
    }

    #[test]
    fn test_columns_follow_bands() {
        let bands = series(&[StabilityBand::Green, StabilityBand::Amber, StabilityBand::Red]);
        let image = render_band_timeline(&bands, 6, 2).unwrap();
        assert_eq!(image.dimensions(), (6, 2));
        assert_eq!(image.get_pixel(0, 0).0, StabilityBand::Green.rgb());
        assert_eq!(image.get_pixel(1, 1).0, StabilityBand::Green.rgb());
        assert_eq!(image.get_pixel(2, 0).0, StabilityBand::Amber.rgb());
        assert_eq!(image.get_pixel(5, 1).0, StabilityBand::Red.rgb());
    }

    #[test]
    fn test_narrower_than_series() {
        let mut labels = vec![StabilityBand::Green; 90];
        labels.extend(vec![StabilityBand::Red; 10]);
        let image = render_band_timeline(&series(&labels), 10, 1).unwrap();
        assert_eq!(image.get_pixel(8, 0).0, StabilityBand::Green.rgb());
        assert_eq!(image.get_pixel(9, 0).0, StabilityBand::Red.rgb());
    }

    #[test]
    fn test_rejects_empty_and_zero_size() {
        assert!(matches!(
            render_band_timeline(&series(&[]), 10, 10),
            Err(MediaError::InvalidInput(_))
        ));
        assert!(matches!(
            render_band_timeline(&series(&[StabilityBand::Red]), 0, 10),
            Err(MediaError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("L_ELBOW.png");
        save_band_timeline(&path, &series(&[StabilityBand::Amber; 4]), 8, 3).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (8, 3));
        assert_eq!(loaded.get_pixel(7, 2).0, StabilityBand::Amber.rgb());
    }
}
