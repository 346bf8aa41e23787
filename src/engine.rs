// engine.rs - camera and scene handed to a rendering backend

use crate::mesh::BoxMesh;
use crate::texture::Texture;
use glam::{DMat4, DVec3, Mat4};

pub const CAMERA_NEAR: f64 = 1.0;
pub const CAMERA_FAR: f64 = 1000.0;

/// Perspective camera sitting at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    target: DVec3,
    projection: DMat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            target: DVec3::NEG_Z,
            projection: DMat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the projection after `fov` or `aspect` changed.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            DMat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn look_at(&mut self, target: DVec3) {
        self.target = target;
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    pub fn projection(&self) -> DMat4 {
        self.projection
    }

    pub fn view(&self) -> DMat4 {
        DMat4::look_at_rh(DVec3::ZERO, self.target, DVec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        (self.projection * self.view()).as_mat4()
    }
}

/// Everything one panorama draws: the cube and its six face textures.
#[derive(Debug, Clone)]
pub struct Scene {
    pub mesh: BoxMesh,
    pub materials: Vec<Texture>,
}

/// Drawing backend owned by a panorama.
pub trait RenderEngine {
    /// Resize the drawing surface, in pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Draw one frame. Textures flagged `needs_update` are uploaded and unflagged.
    fn render(&mut self, scene: &mut Scene, camera: &PerspectiveCamera);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn target_ends_up_in_front_of_camera() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, CAMERA_NEAR, CAMERA_FAR);
        camera.look_at(DVec3::new(500.0, 0.0, 0.0));

        let clip = camera.view_projection() * Vec4::new(100.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn projection_follows_fov() {
        let mut camera = PerspectiveCamera::new(75.0, 2.0, CAMERA_NEAR, CAMERA_FAR);
        let wide = camera.projection();
        camera.fov = 30.0;
        assert_eq!(camera.projection(), wide);
        camera.update_projection_matrix();
        assert!(camera.projection().y_axis.y > wide.y_axis.y);
    }
}
