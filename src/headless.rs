// headless.rs - in-memory page and a renderer that only records what it was asked to do

use crate::engine::{PerspectiveCamera, RenderEngine, Scene};
use crate::error::PanoramaError;
use crate::host::{Bindings, Container, ContainerId, Host};
use crate::widget::PanoramaId;
use glam::DVec3;

#[derive(Debug, Clone)]
struct Element {
    selectors: Vec<String>,
    width: u32,
    height: u32,
    occupant: Option<PanoramaId>,
    children: Vec<String>,
}

/// Page made of plain elements addressed by selector strings.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    elements: Vec<Element>,
    bindings: Bindings,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element matched by each of `selectors`.
    pub fn add_element(&mut self, selectors: &[&str], width: u32, height: u32) -> ContainerId {
        self.elements.push(Element {
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            width,
            height,
            occupant: None,
            children: Vec::new(),
        });
        ContainerId(self.elements.len() - 1)
    }

    pub fn set_size(&mut self, container: ContainerId, width: u32, height: u32) {
        if let Some(el) = self.elements.get_mut(container.0) {
            el.width = width;
            el.height = height;
        }
    }

    /// Classes of the elements inserted into `container`.
    pub fn children(&self, container: ContainerId) -> &[String] {
        self.elements
            .get(container.0)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }
}

impl Host for HeadlessHost {
    type Renderer = RecordingRenderer;

    fn resolve(&self, container: &Container) -> Option<ContainerId> {
        match container {
            Container::Element(id) => (id.0 < self.elements.len()).then_some(*id),
            Container::Selector(selector) => self
                .elements
                .iter()
                .position(|el| el.selectors.iter().any(|s| s == selector))
                .map(ContainerId),
            Container::Handle(ids) => ids
                .iter()
                .copied()
                .find(|id| id.0 < self.elements.len()),
        }
    }

    fn dimensions(&self, container: ContainerId) -> (u32, u32) {
        self.elements
            .get(container.0)
            .map(|el| (el.width, el.height))
            .unwrap_or((0, 0))
    }

    fn occupant(&self, container: ContainerId) -> Option<PanoramaId> {
        self.elements.get(container.0)?.occupant.clone()
    }

    fn set_occupant(&mut self, container: ContainerId, panorama: Option<PanoramaId>) {
        if let Some(el) = self.elements.get_mut(container.0) {
            el.occupant = panorama;
        }
    }

    fn mount(
        &mut self,
        container: ContainerId,
        wrapper_class: &str,
        width: u32,
        height: u32,
    ) -> Result<RecordingRenderer, PanoramaError> {
        let el = self
            .elements
            .get_mut(container.0)
            .ok_or(PanoramaError::NoContainer)?;
        el.children.push(wrapper_class.to_string());
        Ok(RecordingRenderer {
            size: (width, height),
            ..RecordingRenderer::default()
        })
    }

    fn unmount(&mut self, container: ContainerId, wrapper_class: &str) {
        if let Some(el) = self.elements.get_mut(container.0) {
            el.children.retain(|c| c != wrapper_class);
        }
    }

    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}

/// Keeps the last frame's inputs instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub size: (u32, u32),
    pub frames: usize,
    pub uploads: usize,
    pub last_target: Option<DVec3>,
    pub last_fov: Option<f64>,
    pub last_aspect: Option<f64>,
}

impl RenderEngine for RecordingRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn render(&mut self, scene: &mut Scene, camera: &PerspectiveCamera) {
        for texture in scene.materials.iter_mut().filter(|t| t.needs_update) {
            texture.needs_update = false;
            self.uploads += 1;
        }
        self.frames += 1;
        self.last_target = Some(camera.target());
        self.last_fov = Some(camera.fov);
        self.last_aspect = Some(camera.aspect);
    }
}
