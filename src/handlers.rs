// handlers.rs - input handlers shared by every panorama
//
// Container handlers find their panorama through the container's marker, so an event that
// slips through after `destroy` fails with HandlerCannotFoundThePanorama.

use crate::error::PanoramaError;
use crate::host::{Binding, EventKind, Host, Target};
use crate::orientation::TouchPoint;
use crate::panoramas::Panoramas;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Resize,
    MouseDown { client_x: f64, client_y: f64 },
    MouseMove { client_x: f64, client_y: f64 },
    MouseUp,
    /// Normalized wheel delta: `1` per notch up, `-1` per notch down.
    MouseWheel { delta_y: i32 },
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd { touches: Vec<TouchPoint> },
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Resize => EventKind::Resize,
            InputEvent::MouseDown { .. } => EventKind::MouseDown,
            InputEvent::MouseMove { .. } => EventKind::MouseMove,
            InputEvent::MouseUp => EventKind::MouseUp,
            InputEvent::MouseWheel { .. } => EventKind::MouseWheel,
            InputEvent::TouchStart { .. } => EventKind::TouchStart,
            InputEvent::TouchMove { .. } => EventKind::TouchMove,
            InputEvent::TouchEnd { .. } => EventKind::TouchEnd,
        }
    }
}

pub type Handler<H> = fn(&mut Panoramas<H>, &Binding, &InputEvent) -> Result<(), PanoramaError>;

pub fn handler_for<H: Host + 'static>(kind: EventKind) -> Handler<H> {
    match kind {
        EventKind::Resize => resize_handler::<H>,
        EventKind::MouseDown => mouse_down_handler::<H>,
        EventKind::MouseMove => mouse_move_handler::<H>,
        EventKind::MouseUp => mouse_up_handler::<H>,
        EventKind::MouseWheel => mouse_wheel_handler::<H>,
        EventKind::TouchStart => touch_start_handler::<H>,
        EventKind::TouchMove => touch_move_handler::<H>,
        EventKind::TouchEnd => touch_end_handler::<H>,
    }
}

fn panorama_of<'a, H: Host + 'static>(
    panoramas: &'a mut Panoramas<H>,
    binding: &Binding,
) -> Result<&'a mut crate::widget::PanoramaWidget<H::Renderer>, PanoramaError> {
    match binding.target {
        Target::Container(container) => panoramas.on_container(container),
        Target::Window => Err(PanoramaError::HandlerCannotFoundThePanorama),
    }
}

/// Window resize: bound per panorama, so it follows the binding's namespace.
pub fn resize_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    _event: &InputEvent,
) -> Result<(), PanoramaError> {
    let container = panoramas
        .get(&binding.namespace)
        .map(|widget| widget.container())
        .ok_or(PanoramaError::HandlerCannotFoundThePanorama)?;
    let (width, height) = panoramas.host().dimensions(container);

    if let Some(widget) = panoramas.get_mut(&binding.namespace) {
        widget.resize(width, height);
    }
    Ok(())
}

pub fn mouse_down_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    event: &InputEvent,
) -> Result<(), PanoramaError> {
    let panorama = panorama_of(panoramas, binding)?;
    if let InputEvent::MouseDown { client_x, client_y } = *event {
        panorama.orientation_mut().pointer_down(client_x, client_y);
    }
    Ok(())
}

pub fn mouse_move_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    event: &InputEvent,
) -> Result<(), PanoramaError> {
    let panorama = panorama_of(panoramas, binding)?;
    if let InputEvent::MouseMove { client_x, client_y } = *event {
        panorama.orientation_mut().pointer_move(client_x, client_y);
    }
    Ok(())
}

pub fn mouse_up_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    _event: &InputEvent,
) -> Result<(), PanoramaError> {
    panorama_of(panoramas, binding)?
        .orientation_mut()
        .pointer_up();
    Ok(())
}

pub fn mouse_wheel_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    event: &InputEvent,
) -> Result<(), PanoramaError> {
    let panorama = panorama_of(panoramas, binding)?;
    if let InputEvent::MouseWheel { delta_y } = *event {
        panorama.zoom(delta_y);
    }
    Ok(())
}

pub fn touch_start_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    event: &InputEvent,
) -> Result<(), PanoramaError> {
    let panorama = panorama_of(panoramas, binding)?;
    if let InputEvent::TouchStart { touches } = event {
        panorama.orientation_mut().touch_start(touches);
    }
    Ok(())
}

pub fn touch_move_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    event: &InputEvent,
) -> Result<(), PanoramaError> {
    let panorama = panorama_of(panoramas, binding)?;
    if let InputEvent::TouchMove { touches } = event {
        panorama.orientation_mut().touch_move(touches);
    }
    Ok(())
}

pub fn touch_end_handler<H: Host + 'static>(
    panoramas: &mut Panoramas<H>,
    binding: &Binding,
    _event: &InputEvent,
) -> Result<(), PanoramaError> {
    panorama_of(panoramas, binding)?.orientation_mut().touch_end();
    Ok(())
}
