//! Perspective camera looking down -z at the origin

use crate::config::RenderConfig;
use crate::core_types::{Degrees, Radians, Vec3};
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Rotation3, Vector3, Vector4};

/// A world-space point after projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Normalized device coordinates, each axis in `[-1, 1]`
    pub ndc: Vec3,
    /// Distance in front of the camera (clip-space w)
    pub depth: f32,
}

/// Fixed perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Point3<f32>,
    fov_y: Radians,
    near: f32,
    far: f32,
    aspect: f32,
    view_projection: Matrix4<f32>,
}

impl Camera {
    /// Camera on the +z axis at `camera_distance`, square aspect until resized
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        let mut camera = Camera {
            eye: Point3::new(0.0, 0.0, config.camera_distance),
            fov_y: Degrees::new(config.fov_degrees).to_radians(),
            near: config.near,
            far: config.far,
            aspect: 1.0,
            view_projection: Matrix4::identity(),
        };
        camera.rebuild();
        camera
    }

    /// Update the aspect ratio from the surface size
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 && aspect != self.aspect {
            self.aspect = aspect;
            self.rebuild();
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_projection(&self) -> &Matrix4<f32> {
        &self.view_projection
    }

    /// Project a world-space point after applying the model rotation.
    ///
    /// Returns `None` for points behind the near plane or outside the clip volume.
    pub fn project(&self, model: &Rotation3<f32>, world: &Vec3) -> Option<Projected> {
        let rotated = model * world;
        let clip = self.view_projection * rotated.push(1.0);
        let w = clip.w;
        if w < self.near {
            return None;
        }

        let ndc = clip.xyz() / w;
        if ndc.amax() > 1.0 {
            return None;
        }
        Some(Projected { ndc, depth: w })
    }

    /// Project a world-space segment, clipped to the view volume.
    ///
    /// Endpoints outside the volume are moved along the segment onto its
    /// boundary, so a segment crossing a screen edge keeps its visible part.
    /// Returns `None` when no part of the segment is visible.
    pub fn project_segment(
        &self,
        model: &Rotation3<f32>,
        a: &Vec3,
        b: &Vec3,
    ) -> Option<(Projected, Projected)> {
        let start = self.view_projection * (model * a).push(1.0);
        let end = self.view_projection * (model * b).push(1.0);

        // Signed distance to each clip plane, positive inside
        let planes = |c: &Vector4<f32>| {
            [
                c.w + c.x,
                c.w - c.x,
                c.w + c.y,
                c.w - c.y,
                c.w + c.z,
                c.w - c.z,
            ]
        };
        let (d0, d1) = (planes(&start), planes(&end));

        let mut enter = 0.0_f32;
        let mut exit = 1.0_f32;
        for (&from, &to) in d0.iter().zip(&d1) {
            if from < 0.0 && to < 0.0 {
                return None;
            }
            if from < 0.0 {
                enter = enter.max(from / (from - to));
            } else if to < 0.0 {
                exit = exit.min(from / (from - to));
            }
        }
        if enter > exit {
            return None;
        }

        let at = |t: f32| {
            let clip = start + (end - start) * t;
            (clip.w > 0.0).then(|| Projected {
                ndc: clip.xyz() / clip.w,
                depth: clip.w,
            })
        };
        Some((at(enter)?, at(exit)?))
    }

    fn rebuild(&mut self) {
        let projection = Perspective3::new(self.aspect, self.fov_y.value(), self.near, self.far);
        let view = Isometry3::look_at_rh(&self.eye, &Point3::origin(), &Vector3::y());
        self.view_projection = projection.as_matrix() * view.to_homogeneous();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_projects_to_center() {
        let camera = Camera::new(&RenderConfig::default());
        let p = camera
            .project(&Rotation3::identity(), &Vec3::zeros())
            .expect("origin is in view");
        assert_relative_eq!(p.ndc.x, 0.0);
        assert_relative_eq!(p.ndc.y, 0.0);
        assert_relative_eq!(p.depth, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_point_behind_camera_is_culled() {
        let camera = Camera::new(&RenderConfig::default());
        assert!(camera
            .project(&Rotation3::identity(), &Vec3::new(0.0, 0.0, 6.0))
            .is_none());
    }

    #[test]
    fn test_wide_aspect_narrows_horizontal_ndc() {
        let mut camera = Camera::new(&RenderConfig::default());
        let point = Vec3::new(1.0, 0.0, 0.0);
        let square = camera.project(&Rotation3::identity(), &point).unwrap();
        camera.set_aspect(2.0);
        let wide = camera.project(&Rotation3::identity(), &point).unwrap();
        assert_relative_eq!(wide.ndc.x, square.ndc.x / 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_positive_x_lands_right_of_center() {
        let camera = Camera::new(&RenderConfig::default());
        let p = camera
            .project(&Rotation3::identity(), &Vec3::new(1.0, 1.0, 0.0))
            .unwrap();
        assert!(p.ndc.x > 0.0);
        assert!(p.ndc.y > 0.0);
    }

    #[test]
    fn test_segment_crossing_edge_is_clipped() {
        let camera = Camera::new(&RenderConfig::default());
        let (a, b) = camera
            .project_segment(
                &Rotation3::identity(),
                &Vec3::zeros(),
                &Vec3::new(20.0, 0.0, 0.0),
            )
            .expect("segment starts in view");
        assert_relative_eq!(a.ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(b.ndc.x, 1.0, epsilon = 1e-4);
        assert_relative_eq!(b.ndc.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(b.depth, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_segment_through_near_plane_is_clipped() {
        let camera = Camera::new(&RenderConfig::default());
        let (a, b) = camera
            .project_segment(
                &Rotation3::identity(),
                &Vec3::zeros(),
                &Vec3::new(0.0, 0.0, 10.0),
            )
            .expect("segment starts in view");
        assert_relative_eq!(a.depth, 5.0, epsilon = 1e-4);
        assert_relative_eq!(b.depth, 0.1, epsilon = 1e-3);
        assert!(b.ndc.amax() <= 1.0 + 1e-4);
    }

    #[test]
    fn test_segment_outside_view_is_culled() {
        let camera = Camera::new(&RenderConfig::default());
        let model = Rotation3::identity();
        let offscreen = camera.project_segment(
            &model,
            &Vec3::new(20.0, 0.0, 0.0),
            &Vec3::new(30.0, 0.0, 0.0),
        );
        assert!(offscreen.is_none());
        let behind = camera.project_segment(
            &model,
            &Vec3::new(0.0, 0.0, 6.0),
            &Vec3::new(1.0, 0.0, 8.0),
        );
        assert!(behind.is_none());
    }
}
