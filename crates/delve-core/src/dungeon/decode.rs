//! Bitmap to tile grid

use image::RgbaImage;

use super::{Level, Tile};

/// Classify each pixel: transparent is `Outside`, anything painted is `Floor`
pub fn decode(image: &RgbaImage, depth: u32) -> Level {
    let mut level = Level::new(image.width() as usize, image.height() as usize, depth);
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] != 0 {
            level.set(x as usize, y as usize, Tile::Floor);
        }
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_transparent_is_outside() {
        let level = decode(&RgbaImage::new(7, 5), 3);
        assert_eq!(level.width(), 7);
        assert_eq!(level.height(), 5);
        assert_eq!(level.depth, 3);
        assert_eq!(level.count(Tile::Outside), 35);
    }

    #[test]
    fn test_alpha_decides() {
        let mut image = RgbaImage::new(3, 1);
        image.put_pixel(0, 0, Rgba([0, 0, 0, 1]));
        // colour without alpha still counts as empty
        image.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
        let level = decode(&image, 0);
        assert_eq!(level.get(0, 0), Some(Tile::Floor));
        assert_eq!(level.get(1, 0), Some(Tile::Outside));
        assert_eq!(decode(&image, 0), level);
    }
}
