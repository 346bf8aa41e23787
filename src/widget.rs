// widget.rs - one panorama living inside one container

use crate::config::WidgetConfig;
use crate::engine::{PerspectiveCamera, RenderEngine, Scene, CAMERA_FAR, CAMERA_NEAR};
use crate::error::PanoramaError;
use crate::host::{ContainerId, EventKind, Host, Target, WRAPPER_CLASS};
use crate::mesh::panorama_cube;
use crate::orientation::Orientation;
use crate::texture::{Texture, TextureLoader};
use rand::Rng;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-instance identifier, used to namespace event bindings.
///
/// Millisecond timestamp plus a random number. Good enough to tell apart panoramas on one
/// page, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanoramaId(String);

impl PanoramaId {
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let suffix: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);
        Self(format!("panorama_id_{millis}{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PanoramaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for PanoramaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct PanoramaWidget<R> {
    id: PanoramaId,
    container: ContainerId,
    config: WidgetConfig,
    camera: PerspectiveCamera,
    scene: Scene,
    renderer: R,
    orientation: Orientation,
    loader: TextureLoader,
    loops: usize,
}

impl<R: RenderEngine> PanoramaWidget<R> {
    /// Build everything for a validated config and attach it to `container`.
    ///
    /// The container must be free and non-empty; `Panoramas::construct` checks that first.
    pub(crate) fn build<H>(
        host: &mut H,
        container: ContainerId,
        config: WidgetConfig,
        paths: Vec<String>,
    ) -> Result<Self, PanoramaError>
    where
        H: Host<Renderer = R>,
    {
        let id = PanoramaId::generate();
        let (width, height) = host.dimensions(container);

        let camera = PerspectiveCamera::new(
            config.start_fov,
            width as f64 / height as f64,
            CAMERA_NEAR,
            CAMERA_FAR,
        );

        let loader = TextureLoader::new();
        let materials = paths
            .iter()
            .enumerate()
            .map(|(face, path)| {
                loader.load(face, path);
                Texture::placeholder(path.as_str())
            })
            .collect();

        let scene = Scene {
            mesh: panorama_cube(),
            materials,
        };

        let mut renderer = host.mount(container, WRAPPER_CLASS, width, height)?;
        renderer.set_size(width, height);

        host.set_occupant(container, Some(id.clone()));

        let bindings = host.bindings_mut();
        bindings.bind(Target::Window, EventKind::Resize, &id);
        for kind in EventKind::CONTAINER {
            bindings.bind(Target::Container(container), kind, &id);
        }

        log::info!("{id} created in container {} ({width}x{height})", container.0);

        let mut widget = Self {
            id,
            container,
            config,
            camera,
            scene,
            renderer,
            orientation: Orientation::default(),
            loader,
            loops: 0,
        };
        widget.draw();
        Ok(widget)
    }

    pub fn id(&self) -> &PanoramaId {
        &self.id
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn orientation_mut(&mut self) -> &mut Orientation {
        &mut self.orientation
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn textures(&self) -> &[Texture] {
        &self.scene.materials
    }

    pub fn texture_paths(&self) -> Vec<&str> {
        self.scene.materials.iter().map(Texture::path).collect()
    }

    /// Number of animation loops started with `animate`.
    pub fn loops(&self) -> usize {
        self.loops
    }

    /// Start one more self-rescheduling frame loop. Call once; each call adds a loop.
    pub fn animate(&mut self) {
        self.loops += 1;
    }

    /// Draw one frame.
    pub fn draw(&mut self) {
        let swapped = self.loader.poll(&mut self.scene.materials);
        if swapped > 0 {
            log::debug!("{}: {swapped} face texture(s) arrived", self.id);
        }

        let target = self.orientation.advance();
        self.camera.look_at(target);
        self.renderer.render(&mut self.scene, &self.camera);
    }

    /// Apply one wheel notch: `1` zooms in, `-1` zooms out, anything else is ignored.
    /// A step that would leave `[min_fov, max_fov]` is dropped.
    pub fn zoom(&mut self, delta_y: i32) {
        let step = self.config.fov_mouse_step;
        let fov = match delta_y {
            1 => self.camera.fov - step,
            -1 => self.camera.fov + step,
            _ => return,
        };
        if fov < self.config.min_fov || fov > self.config.max_fov {
            return;
        }
        self.camera.fov = fov;
        self.camera.update_projection_matrix();
    }

    /// Follow the container size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.aspect = width as f64 / height as f64;
        self.camera.update_projection_matrix();
        self.renderer.set_size(width, height);
    }

    /// Unbind everything, take the surface out of the container and free the container.
    pub(crate) fn destroy<H>(self, host: &mut H)
    where
        H: Host<Renderer = R>,
    {
        let bindings = host.bindings_mut();
        bindings.unbind(Target::Container(self.container), &self.id);
        bindings.unbind(Target::Window, &self.id);
        host.unmount(self.container, WRAPPER_CLASS);
        host.set_occupant(self.container, None);

        log::info!("{} destroyed", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed_and_distinct() {
        let a = PanoramaId::generate();
        let b = PanoramaId::generate();
        assert!(a.as_str().starts_with("panorama_id_"));
        assert!(a.as_str()["panorama_id_".len()..]
            .chars()
            .all(|c| c.is_ascii_digit()));
        assert_ne!(a, b);
    }
}
