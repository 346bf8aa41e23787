// main.rs - window, event loop and translation of winit input into panorama events

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use cube_panorama::config;
use cube_panorama::window_host::{WindowHost, WINDOW_CONTAINER};
use cube_panorama::{
    CreateCallback, InputEvent, PanoramaError, PanoramaId, Panoramas, Target, TouchPoint,
};

use std::collections::BTreeMap;
use std::sync::Arc;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

/// Pointer state needed to turn winit events into page-style events.
#[derive(Default)]
struct PointerTracker {
    cursor: PhysicalPosition<f64>,
    touches: BTreeMap<u64, PhysicalPosition<f64>>,
}

impl PointerTracker {
    fn touch_list(&self) -> Vec<TouchPoint> {
        self.touches
            .values()
            .map(|p| TouchPoint {
                page_x: p.x,
                page_y: p.y,
            })
            .collect()
    }

    fn translate(&mut self, event: &WindowEvent<'_>) -> Option<(Target, InputEvent)> {
        let container = Target::Container(WINDOW_CONTAINER);
        let translated = match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                (Target::Window, InputEvent::Resize)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = *position;
                (
                    container,
                    InputEvent::MouseMove {
                        client_x: position.x,
                        client_y: position.y,
                    },
                )
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => (
                    container,
                    InputEvent::MouseDown {
                        client_x: self.cursor.x,
                        client_y: self.cursor.y,
                    },
                ),
                ElementState::Released => (container, InputEvent::MouseUp),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y,
                };
                if y == 0.0 {
                    return None;
                }
                let delta_y = if y > 0.0 { 1 } else { -1 };
                (container, InputEvent::MouseWheel { delta_y })
            }
            WindowEvent::Touch(Touch {
                phase, location, id, ..
            }) => match phase {
                TouchPhase::Started => {
                    self.touches.insert(*id, *location);
                    (
                        container,
                        InputEvent::TouchStart {
                            touches: self.touch_list(),
                        },
                    )
                }
                TouchPhase::Moved => {
                    self.touches.insert(*id, *location);
                    (
                        container,
                        InputEvent::TouchMove {
                            touches: self.touch_list(),
                        },
                    )
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.touches.remove(id);
                    (
                        container,
                        InputEvent::TouchEnd {
                            touches: self.touch_list(),
                        },
                    )
                }
            },
            _ => return None,
        };
        Some(translated)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = config::resolve_config_path()
        .context("no panorama params found; pass --config <path> or set PANORAMA_CONFIG")?;
    let params = config::load_params(&config_path)?;
    let selector = config::resolve_container_selector();
    log::info!("params from {config_path:?}, container {selector}");

    let event_loop = EventLoop::new();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Cube Panorama")
            .with_inner_size(LogicalSize::new(1280, 720))
            .build(&event_loop)
            .context("cannot open window")?,
    );

    let on_ready: CreateCallback<WindowHost> = Box::new(
        |panoramas: &mut Panoramas<WindowHost>, result: Result<PanoramaId, PanoramaError>| {
            match result {
                Ok(id) => {
                    log::info!("{id} ready");
                    panoramas.animate(&id);
                }
                Err(e) => {
                    log::error!("cannot show panorama: {e}");
                    panoramas
                        .host()
                        .window()
                        .set_title(&format!("Cube Panorama - {e}"));
                }
            }
        },
    );

    let mut panoramas = Panoramas::new(WindowHost::new(window.clone(), &[selector.as_str()]));
    panoramas.create(selector.as_str(), &params, Some(on_ready))?;

    let mut pointer = PointerTracker::default();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent { event, .. } => {
                if let WindowEvent::CloseRequested = event {
                    panoramas.destroy_all();
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                if let Some((target, input)) = pointer.translate(&event) {
                    if let Err(e) = panoramas.dispatch(target, &input) {
                        log::warn!("{:?} handler failed: {e}", input.kind());
                    }
                }
            }

            Event::RedrawRequested(_) => {
                panoramas.frame();
            }

            Event::MainEventsCleared => {
                panoramas.run_deferred();
                window.request_redraw();
            }

            _ => {}
        }
    });
}
