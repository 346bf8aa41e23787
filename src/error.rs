// error.rs - construction and handler errors

use crate::config::Side;
use thiserror::Error;

/// Errors raised while constructing a panorama or while dispatching its events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanoramaError {
    /// Params are not a key-value object, have wrong types, or extra arguments were passed.
    #[error("Incorrect argument of constructor")]
    IncorrectArgument,

    /// Neither `sideTextures` nor the `panoramaCode` + `imgPathMask` pair is set.
    #[error("Required parameters: \"panoramaCode\" and \"imgPathMask\" both or \"sideTextures\"")]
    RequiredParameter,

    /// `sideTextures` lacks a side.
    #[error("No {0} side texture")]
    RequiredSideTexture(Side),

    /// The container reference matched nothing.
    #[error("Attempt to create instance of Panorama without container")]
    NoContainer,

    #[error("Container of the panorama has zero width or height")]
    ContainerZeroSize,

    #[error("Attempt to create more than one panoramas in same container")]
    SinglePanoramaPerContainer,

    /// An event fired for a container that no longer hosts a live panorama.
    #[error("Panorama removed but handler still triggers")]
    HandlerCannotFoundThePanorama,

    /// The rendering surface could not be created inside the container.
    #[error("Rendering surface unavailable: {0}")]
    Surface(String),
}
