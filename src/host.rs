// host.rs - the page side of a panorama: containers, markers, surfaces, event bindings

use crate::engine::RenderEngine;
use crate::error::PanoramaError;
use crate::widget::PanoramaId;

/// Class of the element wrapping the rendering surface inside the container.
pub const WRAPPER_CLASS: &str = "panorama_wrapper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub usize);

/// How the caller names the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Element(ContainerId),
    Selector(String),
    /// Already-resolved set of elements; the first one is used.
    Handle(Vec<ContainerId>),
}

impl From<ContainerId> for Container {
    fn from(id: ContainerId) -> Self {
        Container::Element(id)
    }
}

impl From<&str> for Container {
    fn from(selector: &str) -> Self {
        Container::Selector(selector.to_string())
    }
}

impl From<String> for Container {
    fn from(selector: String) -> Self {
        Container::Selector(selector)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Container(ContainerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseWheel,
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl EventKind {
    /// Events a panorama listens to on its container.
    pub const CONTAINER: [EventKind; 7] = [
        EventKind::MouseDown,
        EventKind::MouseMove,
        EventKind::MouseUp,
        EventKind::MouseWheel,
        EventKind::TouchStart,
        EventKind::TouchMove,
        EventKind::TouchEnd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Resize => "resize",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseWheel => "mousewheel",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
        }
    }
}

/// One handler registration, e.g. `mousedown.panorama_id_…` on a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub target: Target,
    pub kind: EventKind,
    pub namespace: PanoramaId,
}

impl Binding {
    pub fn event_name(&self) -> String {
        format!("{}.{}", self.kind.name(), self.namespace)
    }
}

/// Registration table, in bind order.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn bind(&mut self, target: Target, kind: EventKind, namespace: &PanoramaId) {
        self.entries.push(Binding {
            target,
            kind,
            namespace: namespace.clone(),
        });
    }

    /// Drop every registration of `namespace` on `target`. Returns how many went away.
    pub fn unbind(&mut self, target: Target, namespace: &PanoramaId) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|b| !(b.target == target && &b.namespace == namespace));
        before - self.entries.len()
    }

    pub fn matching(&self, target: Target, kind: EventKind) -> Vec<Binding> {
        self.entries
            .iter()
            .filter(|b| b.target == target && b.kind == kind)
            .cloned()
            .collect()
    }

    pub fn count(&self, namespace: &PanoramaId) -> usize {
        self.entries
            .iter()
            .filter(|b| &b.namespace == namespace)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Page environment a panorama lives in.
pub trait Host {
    type Renderer: RenderEngine;

    fn resolve(&self, container: &Container) -> Option<ContainerId>;

    /// Width and height in pixels.
    fn dimensions(&self, container: ContainerId) -> (u32, u32);

    /// Panorama marked as living in the container.
    fn occupant(&self, container: ContainerId) -> Option<PanoramaId>;

    fn set_occupant(&mut self, container: ContainerId, panorama: Option<PanoramaId>);

    /// Insert a wrapper with class `wrapper_class` holding a fresh rendering surface.
    fn mount(
        &mut self,
        container: ContainerId,
        wrapper_class: &str,
        width: u32,
        height: u32,
    ) -> Result<Self::Renderer, PanoramaError>;

    /// Remove the wrapper inserted by `mount`.
    fn unmount(&mut self, container: ContainerId, wrapper_class: &str);

    fn bindings(&self) -> &Bindings;

    fn bindings_mut(&mut self) -> &mut Bindings;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbind_only_touches_namespace_and_target() {
        let a = PanoramaId::from("panorama_id_a");
        let b = PanoramaId::from("panorama_id_b");
        let c0 = Target::Container(ContainerId(0));

        let mut bindings = Bindings::default();
        bindings.bind(c0, EventKind::MouseDown, &a);
        bindings.bind(Target::Window, EventKind::Resize, &a);
        bindings.bind(c0, EventKind::MouseDown, &b);

        assert_eq!(bindings.matching(c0, EventKind::MouseDown).len(), 2);
        assert_eq!(bindings.unbind(c0, &a), 1);
        assert_eq!(bindings.count(&a), 1);
        assert_eq!(bindings.unbind(Target::Window, &a), 1);
        assert_eq!(bindings.count(&a), 0);
        assert_eq!(bindings.matching(c0, EventKind::MouseDown)[0].namespace, b);
    }

    #[test]
    fn event_names_are_namespaced() {
        let binding = Binding {
            target: Target::Window,
            kind: EventKind::Resize,
            namespace: PanoramaId::from("panorama_id_42"),
        };
        assert_eq!(binding.event_name(), "resize.panorama_id_42");
    }
}
