use super::scene::{Frame, SceneRenderer};
use crate::config::{FieldConfig, RenderConfig};
use crate::frame::{FrameContext, FrameStatus, FrameTask};
use crate::simulation::{ConnectorCloud, ParticleField};
use tracing::info;

/// The background canvas: particle field, connectors and their renderer
///
/// Nothing is simulated until [`ParticleSurface::mount`] sizes the surface and
/// seeds the buffers. Each frame steps the field once, then renders.
#[derive(Debug, Clone)]
pub struct ParticleSurface {
    config: FieldConfig,
    field: Option<ParticleField>,
    connectors: ConnectorCloud,
    renderer: SceneRenderer,
}

impl ParticleSurface {
    #[must_use]
    pub fn new(field: FieldConfig, render: &RenderConfig) -> Self {
        ParticleSurface {
            config: field,
            field: None,
            connectors: ConnectorCloud::default(),
            renderer: SceneRenderer::new(render),
        }
    }

    /// Size the surface to its container and seed particles and connectors
    pub fn mount(&mut self, width: u32, height: u32) {
        info!(
            "Mounting particle surface {}x{} with {} particles, {} connectors",
            width, height, self.config.particle_count, self.config.connector_count
        );
        self.field = Some(ParticleField::new(self.config.particle_count, &self.config));
        self.connectors = ConnectorCloud::new(self.config.connector_count, &self.config);
        self.renderer.resize(width, height);
    }

    /// Drop the particle buffer; later frames render no points
    pub fn unmount(&mut self) {
        if self.field.take().is_some() {
            info!("Particle surface unmounted");
        }
        self.connectors = ConnectorCloud::default();
        self.renderer.resize(0, 0);
    }

    pub fn is_mounted(&self) -> bool {
        self.field.is_some()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    /// Change the particle count, rebuilding the buffer if mounted
    pub fn set_particle_count(&mut self, count: usize) {
        self.config.particle_count = count;
        if let Some(field) = self.field.as_mut() {
            field.rebuild(count, &self.config);
        }
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn connectors(&self) -> &ConnectorCloud {
        &self.connectors
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Last rendered frame
    pub fn frame(&self) -> &Frame {
        self.renderer.frame()
    }
}

impl FrameTask for ParticleSurface {
    fn on_frame(&mut self, ctx: &FrameContext) -> FrameStatus {
        if let Some(field) = self.field.as_mut() {
            field.step();
        }
        self.renderer
            .render(self.field.as_ref(), &self.connectors, ctx.elapsed);

        if self.field.is_some() {
            FrameStatus::Continue
        } else {
            FrameStatus::Done
        }
    }
}
