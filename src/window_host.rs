// window_host.rs - a winit window acting as the single container

use crate::error::PanoramaError;
use crate::host::{Bindings, Container, ContainerId, Host};
use crate::renderer::WgpuRenderer;
use crate::widget::PanoramaId;
use std::sync::Arc;
use winit::window::Window;

/// The window's id as a container.
pub const WINDOW_CONTAINER: ContainerId = ContainerId(0);

pub struct WindowHost {
    window: Arc<Window>,
    selectors: Vec<String>,
    occupant: Option<PanoramaId>,
    wrapper: Option<String>,
    bindings: Bindings,
}

impl WindowHost {
    /// `selectors` are the names the window answers to, e.g. `#panorama`.
    pub fn new(window: Arc<Window>, selectors: &[&str]) -> Self {
        Self {
            window,
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            occupant: None,
            wrapper: None,
            bindings: Bindings::default(),
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Host for WindowHost {
    type Renderer = WgpuRenderer;

    fn resolve(&self, container: &Container) -> Option<ContainerId> {
        match container {
            Container::Element(id) => (*id == WINDOW_CONTAINER).then_some(*id),
            Container::Selector(selector) => self
                .selectors
                .iter()
                .any(|s| s == selector)
                .then_some(WINDOW_CONTAINER),
            Container::Handle(ids) => ids.iter().copied().find(|id| *id == WINDOW_CONTAINER),
        }
    }

    fn dimensions(&self, container: ContainerId) -> (u32, u32) {
        if container != WINDOW_CONTAINER {
            return (0, 0);
        }
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn occupant(&self, container: ContainerId) -> Option<PanoramaId> {
        (container == WINDOW_CONTAINER)
            .then(|| self.occupant.clone())
            .flatten()
    }

    fn set_occupant(&mut self, container: ContainerId, panorama: Option<PanoramaId>) {
        if container == WINDOW_CONTAINER {
            self.occupant = panorama;
        }
    }

    fn mount(
        &mut self,
        container: ContainerId,
        wrapper_class: &str,
        width: u32,
        height: u32,
    ) -> Result<WgpuRenderer, PanoramaError> {
        if container != WINDOW_CONTAINER {
            return Err(PanoramaError::NoContainer);
        }
        let renderer = pollster::block_on(WgpuRenderer::new(self.window.clone(), width, height))?;
        self.wrapper = Some(wrapper_class.to_string());
        Ok(renderer)
    }

    fn unmount(&mut self, container: ContainerId, wrapper_class: &str) {
        if container == WINDOW_CONTAINER && self.wrapper.as_deref() == Some(wrapper_class) {
            self.wrapper = None;
        }
    }

    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}
