//! Tiled floor used as stand-in world geometry
//!
//! The floor is the plane `z = 0` cut into square tiles. A mark quad is
//! dropped onto the plane along its projection and clipped against every tile
//! it overlaps, so a hit near a tile corner comes back as up to four
//! fragments.

use impact_marks::prelude::*;

/// Flat floor made of square tiles
pub struct TiledFloor {
    tile_size: f32,
}

impl TiledFloor {
    /// Create a floor with tiles of `tile_size` units
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }
}

/// Keep the part of `polygon` on the inside of an axis-aligned edge
fn clip_edge(polygon: &[Vec3], axis: usize, bound: f32, keep_below: bool) -> Vec<Vec3> {
    let inside = |point: &Vec3| {
        if keep_below {
            point[axis] <= bound
        } else {
            point[axis] >= bound
        }
    };

    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    for (i, current) in polygon.iter().enumerate() {
        let previous = &polygon[(i + polygon.len() - 1) % polygon.len()];
        match (inside(previous), inside(current)) {
            (true, true) => clipped.push(*current),
            (true, false) => clipped.push(intersect(previous, current, axis, bound)),
            (false, true) => {
                clipped.push(intersect(previous, current, axis, bound));
                clipped.push(*current);
            }
            (false, false) => {}
        }
    }
    clipped
}

fn intersect(from: &Vec3, to: &Vec3, axis: usize, bound: f32) -> Vec3 {
    let t = (bound - from[axis]) / (to[axis] - from[axis]);
    from + (to - from) * t
}

impl MarkFragmenter for TiledFloor {
    fn mark_fragments(
        &self,
        polygon: &[Vec3],
        projection: &Vec3,
        max_points: usize,
        max_fragments: usize,
        out: &mut FragmentBuffer,
    ) {
        // only projections that reach down through the floor hit it
        if projection.z >= 0.0 || polygon.is_empty() {
            return;
        }

        let flattened: Vec<Vec3> = polygon
            .iter()
            .map(|point| {
                let t = point.z / -projection.z;
                Vec3::new(point.x + projection.x * t, point.y + projection.y * t, 0.0)
            })
            .collect();

        let (mut min, mut max) = (flattened[0], flattened[0]);
        for point in &flattened {
            min = min.inf(point);
            max = max.sup(point);
        }

        let first_x = (min.x / self.tile_size).floor() as i32;
        let last_x = (max.x / self.tile_size).floor() as i32;
        let first_y = (min.y / self.tile_size).floor() as i32;
        let last_y = (max.y / self.tile_size).floor() as i32;

        for tile_x in first_x..=last_x {
            for tile_y in first_y..=last_y {
                let x0 = tile_x as f32 * self.tile_size;
                let y0 = tile_y as f32 * self.tile_size;

                let mut piece = clip_edge(&flattened, 0, x0, false);
                piece = clip_edge(&piece, 0, x0 + self.tile_size, true);
                piece = clip_edge(&piece, 1, y0, false);
                piece = clip_edge(&piece, 1, y0 + self.tile_size, true);

                if piece.len() < 3 {
                    continue;
                }
                if out.fragments.len() >= max_fragments || out.points.len() + piece.len() > max_points {
                    return;
                }
                out.push_fragment(&piece);
            }
        }
    }
}
