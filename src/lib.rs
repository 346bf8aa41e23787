//! Interactive 360° cube panorama.
//!
//! A panorama lives in a container provided by a [`Host`], draws through a
//! [`RenderEngine`], rotates slowly on its own, follows mouse and touch drags and zooms with
//! the wheel. [`Panoramas`] keeps the live instances of one host, runs their frame loops and
//! delivers construction callbacks.

pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod headless;
pub mod host;
pub mod mesh;
pub mod orientation;
pub mod panoramas;
pub mod renderer;
pub mod texture;
pub mod widget;
pub mod window_host;

pub use config::{Side, WidgetConfig};
pub use engine::{PerspectiveCamera, RenderEngine, Scene};
pub use error::PanoramaError;
pub use handlers::InputEvent;
pub use host::{Container, ContainerId, EventKind, Host, Target};
pub use orientation::{Orientation, TouchPoint};
pub use panoramas::{Argument, CreateCallback, Panoramas};
pub use widget::{PanoramaId, PanoramaWidget};
