//! Frame assembly for the particle cloud and its connectors
//!
//! The renderer is a pull-based consumer: each call reads the current particle
//! buffer, applies the cosmetic cloud rotation, projects everything through the
//! camera and writes screen-space vertices into a reused [`Frame`]. The host's
//! rasterizer draws the frame with the attached materials.

use super::camera::Camera;
use super::material::{LineMaterial, PointMaterial};
use crate::config::RenderConfig;
use crate::core_types::{Radians, Seconds};
use crate::simulation::{ConnectorCloud, ParticleField};
use bytemuck::{Pod, Zeroable};
use nalgebra::{Rotation3, Vector3};

/// Screen-space point sprite
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    /// Pixel position, origin top-left
    pub position: [f32; 2],
    /// Distance from the camera
    pub depth: f32,
    /// Sprite diameter in pixels
    pub size: f32,
}

/// Screen-space line endpoint; consecutive pairs form one segment
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2],
    pub depth: f32,
}

/// Whole-cloud orientation, pitch applied after yaw
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CloudRotation {
    pub yaw: Radians,
    pub pitch: Radians,
}

impl CloudRotation {
    pub fn matrix(&self) -> Rotation3<f32> {
        Rotation3::from_axis_angle(&Vector3::x_axis(), self.pitch.value())
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw.value())
    }
}

/// One drawable frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    points: Vec<PointVertex>,
    lines: Vec<LineVertex>,
    point_rotation: CloudRotation,
    connector_rotation: CloudRotation,
    width: u32,
    height: u32,
    index: u64,
}

impl Frame {
    pub fn points(&self) -> &[PointVertex] {
        &self.points
    }

    /// Segment endpoints, two per visible connector
    pub fn lines(&self) -> &[LineVertex] {
        &self.lines
    }

    /// Point vertices as raw bytes for direct GPU upload
    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Line vertices as raw bytes for direct GPU upload
    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    pub fn point_rotation(&self) -> CloudRotation {
        self.point_rotation
    }

    pub fn connector_rotation(&self) -> CloudRotation {
        self.connector_rotation
    }

    /// Surface size the frame was rendered for
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of frames rendered before this one
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty()
    }
}

/// Projects particles and connectors into a [`Frame`] every display frame
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    camera: Camera,
    point_material: PointMaterial,
    line_material: LineMaterial,
    point_yaw_rate: f32,
    point_pitch_rate: f32,
    point_pitch_amplitude: f32,
    connector_yaw_rate: f32,
    width: u32,
    height: u32,
    frame: Frame,
    rendered: u64,
}

impl SceneRenderer {
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        SceneRenderer {
            camera: Camera::new(config),
            point_material: PointMaterial::from_config(config),
            line_material: LineMaterial::from_config(config),
            point_yaw_rate: config.point_yaw_rate,
            point_pitch_rate: config.point_pitch_rate,
            point_pitch_amplitude: config.point_pitch_amplitude,
            connector_yaw_rate: config.connector_yaw_rate,
            width: 0,
            height: 0,
            frame: Frame::default(),
            rendered: 0,
        }
    }

    /// Match the surface to its container
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if width > 0 && height > 0 {
            self.camera.set_aspect(width as f32 / height as f32);
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn point_material(&self) -> &PointMaterial {
        &self.point_material
    }

    pub fn line_material(&self) -> &LineMaterial {
        &self.line_material
    }

    /// Cloud orientations at `elapsed` seconds of wall-clock time
    pub fn rotations(&self, elapsed: Seconds) -> (CloudRotation, CloudRotation) {
        let t = elapsed.value();
        let points = CloudRotation {
            yaw: Radians::new(t * self.point_yaw_rate),
            pitch: Radians::new((t * self.point_pitch_rate).sin() * self.point_pitch_amplitude),
        };
        let connectors = CloudRotation {
            yaw: Radians::new(t * self.connector_yaw_rate),
            pitch: Radians::new(0.0),
        };
        (points, connectors)
    }

    /// Produce the frame for `elapsed`.
    ///
    /// A missing field renders no points; a zero-sized surface renders nothing.
    pub fn render(
        &mut self,
        field: Option<&ParticleField>,
        connectors: &ConnectorCloud,
        elapsed: Seconds,
    ) -> &Frame {
        let (point_rotation, connector_rotation) = self.rotations(elapsed);

        let frame = &mut self.frame;
        frame.points.clear();
        frame.lines.clear();
        frame.point_rotation = point_rotation;
        frame.connector_rotation = connector_rotation;
        frame.width = self.width;
        frame.height = self.height;
        frame.index = self.rendered;
        self.rendered += 1;

        if self.width == 0 || self.height == 0 {
            return &self.frame;
        }

        let width = self.width as f32;
        let height = self.height as f32;
        let to_pixels = |x: f32, y: f32| [(x + 1.0) * 0.5 * width, (1.0 - y) * 0.5 * height];

        if let Some(field) = field {
            let model = point_rotation.matrix();
            frame.points.extend(field.particles().iter().filter_map(|particle| {
                let projected = self.camera.project(&model, &particle.position())?;
                Some(PointVertex {
                    position: to_pixels(projected.ndc.x, projected.ndc.y),
                    depth: projected.depth,
                    size: self.point_material.pixel_size(projected.depth, height),
                })
            }));
        }

        let model = connector_rotation.matrix();
        for segment in connectors.segments() {
            let Some((a, b)) = self.camera.project_segment(&model, &segment.a, &segment.b) else {
                continue;
            };
            frame.lines.push(LineVertex {
                position: to_pixels(a.ndc.x, a.ndc.y),
                depth: a.depth,
            });
            frame.lines.push(LineVertex {
                position: to_pixels(b.ndc.x, b.ndc.y),
                depth: b.depth,
            });
        }

        &self.frame
    }

    /// The most recently rendered frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}
