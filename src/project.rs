// project.rs - Depth update and perspective projection
//
// Each frame every point moves `depth_step` toward the viewer. Points that
// pass the viewer are recycled to the far plane, so the stream never ends.
//
//   k      = C / z
//   screen = (x*k + w/2, y*k + h/2)
//   size   = max((1 - z/w) * S, 0)
//
// Points projected outside [0,w) x [0,h) are culled.

use crate::config::Config;
use crate::field::{Field, Point};

/// A projected point ready to draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// Advance every point one frame.
pub fn step(field: &mut Field, cfg: &Config) {
    let far = field.width() as f32;

    for i in 0..field.len() {
        let mut z = field.z[i] - cfg.depth_step;

        // Only reachable if depth was pushed past the far plane externally
        if z > far { z = far; }

        if z <= 0.0 {
            field.respawn(i);
            continue;
        }

        field.z[i] = z;
    }
}

/// Project one point onto a `w` x `h` viewport; `None` if culled.
#[inline]
pub fn project_point(p: Point, w: u32, h: u32, cfg: &Config) -> Option<Sprite> {
    let (wf, hf) = (w as f32, h as f32);

    let k = cfg.projection / p.z;
    let x = p.x * k + wf / 2.0;
    let y = p.y * k + hf / 2.0;

    // Written so that NaN (z = 0, zero-area viewport) is culled too
    if !(x >= 0.0 && x < wf && y >= 0.0 && y < hf) {
        return None;
    }

    let size = ((1.0 - p.z / wf) * cfg.max_radius).max(0.0);
    Some(Sprite { x, y, size })
}

/// Lazily project the whole field, in point order, skipping culled points.
pub fn project<'a>(field: &'a Field, cfg: &'a Config) -> impl Iterator<Item = Sprite> + 'a {
    let (w, h) = (field.width(), field.height());
    field.points().filter_map(move |p| project_point(p, w, h, cfg))
}

/// Step then project: one frame's worth of drawable sprites.
pub fn advance<'a>(field: &'a mut Field, cfg: &'a Config) -> impl Iterator<Item = Sprite> + 'a {
    step(field, cfg);
    project(field, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn test_step_decrements_depth() {
        let mut field = Field::new(1, 100, 100, Rng::new(1));
        field.set_point(0, Point { x: 1.0, y: 2.0, z: 40.0 });
        step(&mut field, &cfg());
        assert_eq!(field.point(0), Point { x: 1.0, y: 2.0, z: 39.5 });
    }

    #[test]
    fn test_respawn_at_exact_step() {
        let mut field = Field::new(1, 100, 100, Rng::new(1));
        field.set_point(0, Point { x: 0.0, y: 0.0, z: 0.5 });
        step(&mut field, &cfg());
        assert_eq!(field.point(0).z, 100.0);
    }

    #[test]
    fn test_clamp_restores_far_plane() {
        let mut field = Field::new(1, 100, 100, Rng::new(1));
        field.set_point(0, Point { x: 0.0, y: 0.0, z: 250.0 });
        step(&mut field, &cfg());
        assert_eq!(field.point(0).z, 100.0);
    }

    #[test]
    fn test_depth_invariant_over_many_steps() {
        let cfg = Config { depth_step: 3.7, ..cfg() };
        let mut field = Field::new(300, 200, 150, Rng::new(21));
        for _ in 0..500 {
            step(&mut field, &cfg);
            for p in field.points() {
                assert!(p.z > 0.0 && p.z <= 200.0, "z escaped (0, w]: {:?}", p);
            }
        }
    }

    #[test]
    fn test_project_center() {
        let s = project_point(Point { x: 0.0, y: 0.0, z: 100.0 }, 100, 100, &cfg()).unwrap();
        assert_eq!(s, Sprite { x: 50.0, y: 50.0, size: 0.0 });
    }

    #[test]
    fn test_project_offset() {
        // k = 128 / 64 = 2
        let s = project_point(Point { x: 10.0, y: -5.0, z: 64.0 }, 200, 100, &cfg()).unwrap();
        assert_eq!(s.x, 120.0);
        assert_eq!(s.y, 40.0);
        assert!((s.size - 1.02).abs() < 1e-6);
    }

    #[test]
    fn test_cull_outside_viewport() {
        let c = cfg();
        // k = 128: anything not near the center leaves the screen
        assert!(project_point(Point { x: 10.0, y: 0.0, z: 1.0 }, 100, 100, &c).is_none());
        assert!(project_point(Point { x: 0.0, y: -10.0, z: 1.0 }, 100, 100, &c).is_none());
        // right/bottom edges are exclusive
        assert!(project_point(Point { x: 50.0, y: 0.0, z: 128.0 }, 100, 100, &c).is_none());
        assert!(project_point(Point { x: 0.0, y: 50.0, z: 128.0 }, 100, 100, &c).is_none());
        // left/top edges are inclusive
        assert!(project_point(Point { x: -50.0, y: -50.0, z: 128.0 }, 100, 100, &c).is_some());
    }

    #[test]
    fn test_expired_point_is_culled() {
        let c = cfg();
        // k = C / 0 is infinite: 0 * inf is NaN, anything else is +-inf
        assert!(project_point(Point { x: 0.0, y: 0.0, z: 0.0 }, 100, 100, &c).is_none());
        assert!(project_point(Point { x: 5.0, y: -5.0, z: 0.0 }, 100, 100, &c).is_none());
    }

    #[test]
    fn test_zero_area_field_projects_nothing() {
        let c = cfg();
        let mut field = Field::new(2, 0, 0, Rng::new(1));
        assert_eq!(project(&field, &c).count(), 0);
        assert_eq!(advance(&mut field, &c).count(), 0);
    }

    #[test]
    fn test_size_decreases_with_depth() {
        let c = cfg();
        let mut last = f32::INFINITY;
        for z in 1..=100 {
            let s = project_point(Point { x: 0.0, y: 0.0, z: z as f32 }, 100, 100, &c).unwrap();
            assert!(s.size < last, "size not decreasing at z={}", z);
            last = s.size;
        }
        assert_eq!(last, 0.0);
    }

    #[test]
    fn test_projection_matches_filter() {
        let c = cfg();
        let mut field = Field::new(1000, 320, 240, Rng::new(8));
        for _ in 0..20 {
            let sprites: Vec<Sprite> = advance(&mut field, &c).collect();
            let expected = field
                .points()
                .filter(|&p| project_point(p, 320, 240, &c).is_some())
                .count();
            assert_eq!(sprites.len(), expected);
            for s in &sprites {
                assert!(s.x >= 0.0 && s.x < 320.0 && s.y >= 0.0 && s.y < 240.0);
                assert!(s.size >= 0.0 && s.size <= c.max_radius);
            }
        }
    }

    #[test]
    fn test_project_is_recomputed_after_step() {
        let c = cfg();
        let mut field = Field::new(1, 100, 100, Rng::new(1));
        // k = 1.28 at z=100: x=30 lands at 88.4, on screen
        field.set_point(0, Point { x: 30.0, y: 0.0, z: 100.0 });
        assert_eq!(project(&field, &c).count(), 1);

        // k = 2.56 at z=50: x=30 lands at 126.8, culled
        field.set_point(0, Point { x: 30.0, y: 0.0, z: 50.5 });
        assert_eq!(advance(&mut field, &c).count(), 0);
    }
}
