//! Draws the spanning tree and its rooms onto a bitmap
//!
//! A pixel is painted when its centre lies inside the shape. Everything is
//! drawn in one opaque colour over a transparent background, so the decoder
//! only needs the alpha channel.

use image::{Rgba, RgbaImage};

use super::mst::SpanningTree;
use super::sampler::Point;
use crate::config::GenConfig;
use crate::rng::MapRng;

/// Colour for corridors and rooms
pub const GROUND: Rgba<u8> = Rgba([0xd8, 0xc8, 0xa8, 0xff]);

/// Chance of drawing a room at a node with `degree` tree edges
///
/// Equals 1 at degree 1. With a negative coefficient, dead ends always get a
/// room and busy junctions rarely do.
pub fn room_probability(coefficient: f64, degree: usize) -> f64 {
    (coefficient * (degree as f64 - 1.0)).exp()
}

/// Rasterize corridors then rooms; returns the bitmap and the rooms drawn
///
/// Consumes two draws per node, in node order, whether or not the room is
/// drawn.
pub fn rasterize(
    points: &[Point],
    tree: &SpanningTree,
    config: &GenConfig,
    rng: &mut MapRng,
) -> (RgbaImage, usize) {
    let mut image = RgbaImage::new(config.map_width as u32, config.map_height as u32);
    let half_width = config.road_width / 2.0;

    for edge in tree.edges() {
        let (from, to) = (points[edge.from], points[edge.to]);
        fill_segment(&mut image, from, to, half_width);
        fill_disc(&mut image, from, half_width);
        fill_disc(&mut image, to, half_width);
    }

    let mut rooms = 0;
    for (node, &point) in points.iter().enumerate() {
        let roll = rng.uniform();
        let jitter = (rng.uniform() - 0.5) * config.room_radius_variance;
        let half_side = config.room_radius + jitter;
        if roll <= room_probability(config.room_probability_coefficient, tree.degree(node)) {
            fill_square(&mut image, point, half_side);
            rooms += 1;
        }
    }

    (image, rooms)
}

/// Paint every pixel whose centre satisfies `inside`, within a bounding box
fn fill_where(
    image: &mut RgbaImage,
    (min_x, min_y): (f64, f64),
    (max_x, max_y): (f64, f64),
    inside: impl Fn(f64, f64) -> bool,
) {
    let clamp = |v: f64, len: u32| v.floor().clamp(0.0, len as f64) as u32;
    let (x0, x1) = (clamp(min_x, image.width()), clamp(max_x + 1.0, image.width()));
    let (y0, y1) = (clamp(min_y, image.height()), clamp(max_y + 1.0, image.height()));

    for y in y0..y1 {
        for x in x0..x1 {
            if inside(x as f64 + 0.5, y as f64 + 0.5) {
                image.put_pixel(x, y, GROUND);
            }
        }
    }
}

fn fill_disc(image: &mut RgbaImage, centre: Point, radius: f64) {
    let (cx, cy) = (centre.x as f64, centre.y as f64);
    fill_where(
        image,
        (cx - radius, cy - radius),
        (cx + radius, cy + radius),
        |px, py| (px - cx).powi(2) + (py - cy).powi(2) <= radius * radius,
    );
}

fn fill_square(image: &mut RgbaImage, centre: Point, half_side: f64) {
    if half_side <= 0.0 {
        return;
    }
    let (cx, cy) = (centre.x as f64, centre.y as f64);
    fill_where(
        image,
        (cx - half_side, cy - half_side),
        (cx + half_side, cy + half_side),
        |px, py| (px - cx).abs() <= half_side && (py - cy).abs() <= half_side,
    );
}

/// Round-capped stroke of `half_width` around the segment `a`-`b`
fn fill_segment(image: &mut RgbaImage, a: Point, b: Point, half_width: f64) {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);
    let (dx, dy) = (bx - ax, by - ay);
    let length_sq = dx * dx + dy * dy;

    fill_where(
        image,
        (ax.min(bx) - half_width, ay.min(by) - half_width),
        (ax.max(bx) + half_width, ay.max(by) + half_width),
        |px, py| {
            let t = if length_sq == 0.0 {
                0.0
            } else {
                (((px - ax) * dx + (py - ay) * dy) / length_sq).clamp(0.0, 1.0)
            };
            let (nx, ny) = (ax + t * dx, ay + t * dy);
            (px - nx).powi(2) + (py - ny).powi(2) <= half_width * half_width
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p.0[3] != 0).count()
    }

    #[test]
    fn test_room_probability_curve() {
        assert_eq!(room_probability(-0.9, 1), 1.0);
        assert!(room_probability(-0.9, 0) > 1.0);
        assert!(room_probability(-0.9, 2) < room_probability(-0.9, 1));
        assert!(room_probability(-0.9, 3) < room_probability(-0.9, 2));
        assert_eq!(room_probability(0.0, 4), 1.0);
    }

    #[test]
    fn test_horizontal_corridor_width() {
        let mut image = RgbaImage::new(24, 16);
        fill_segment(&mut image, Point::new(4, 8), Point::new(16, 8), 1.0);
        // Rows 7 and 8 straddle y = 8
        assert_ne!(image.get_pixel(10, 7).0[3], 0);
        assert_ne!(image.get_pixel(10, 8).0[3], 0);
        assert_eq!(image.get_pixel(10, 6).0[3], 0);
        assert_eq!(image.get_pixel(10, 9).0[3], 0);
        assert_eq!(image.get_pixel(20, 8).0[3], 0);
    }

    #[test]
    fn test_square_room_extent() {
        let mut image = RgbaImage::new(16, 16);
        fill_square(&mut image, Point::new(8, 8), 3.0);
        // Pixel centres 5.5 ..= 10.5
        assert_eq!(painted(&image), 36);
        assert_ne!(image.get_pixel(5, 10).0[3], 0);
        assert_eq!(image.get_pixel(4, 8).0[3], 0);
        assert_eq!(image.get_pixel(11, 8).0[3], 0);
    }

    #[test]
    fn test_shapes_clip_to_canvas() {
        let mut image = RgbaImage::new(4, 4);
        fill_square(&mut image, Point::new(0, 0), 3.0);
        fill_disc(&mut image, Point::new(3, 3), 5.0);
        assert_eq!(painted(&image), 16);
    }

    #[test]
    fn test_lone_node_always_gets_a_room() {
        let config = GenConfig {
            map_width: 16,
            map_height: 16,
            ..GenConfig::default()
        };
        let tree = SpanningTree::empty(1);
        let (image, rooms) = rasterize(&[Point::new(8, 8)], &tree, &config, &mut MapRng::new(5));
        assert_eq!(rooms, 1);
        assert_eq!(painted(&image), 36);
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }
}
