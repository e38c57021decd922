//====================================================================

use std::{error::Error, fmt::Display, time::Duration};

use renderer::{Renderer, RendererError};
use scene::Scene;
use tools::{Input, KeyCode, MouseButton};
use window::{SceneBuilder, Window, WindowSettings};
use winit::{
    error::OsError,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::WindowId,
};

pub mod scene;
pub mod tools;
pub mod window;

//====================================================================

const DEFAULT_FPS: f32 = 1. / 60.;

#[derive(Debug)]
pub enum StateError {
    Window(OsError),
    Renderer(RendererError),
}

impl Error for StateError {}

impl Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::Window(e) => write!(f, "Unable to create window: {}", e),
            StateError::Renderer(e) => write!(f, "Unable to create renderer: {}", e),
        }
    }
}

//====================================================================

pub struct State {
    inner: StateInner,
    scene: Box<dyn Scene>,
}

pub struct StateInner {
    pub fps: Duration,
    pub window: Window,
    pub renderer: Renderer,
    pub keys: Input<KeyCode>,
    pub mouse: Input<MouseButton>,
    /// Last known cursor position in physical window pixels.
    pub cursor: glam::Vec2,
}

impl State {
    pub(crate) fn new(
        event_loop: &ActiveEventLoop,
        settings: &WindowSettings,
        build_scene: SceneBuilder,
    ) -> Result<Self, StateError> {
        let fps = Duration::from_secs_f32(DEFAULT_FPS);
        let window = Window::new(event_loop, settings).map_err(StateError::Window)?;

        let window_size = match window.size() {
            common::Size { width: 0, .. } | common::Size { height: 0, .. } => settings.size,
            size => size,
        };

        let renderer =
            Renderer::new(window.0.clone(), window_size).map_err(StateError::Renderer)?;

        let mut inner = StateInner {
            fps,
            window,
            renderer,
            keys: Input::default(),
            mouse: Input::default(),
            cursor: glam::Vec2::ZERO,
        };

        let scene = build_scene(&mut inner);

        Ok(Self { inner, scene })
    }

    pub fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(physical_size) => {
                if physical_size.width == 0 || physical_size.height == 0 {
                    log::warn!(
                        "Window resized to invalid size ({}, {})",
                        physical_size.width,
                        physical_size.height
                    );
                    return;
                }
                let size = common::Size::new(physical_size.width, physical_size.height);
                self.inner.renderer.resize(size);
                self.scene.resize(&mut self.inner, size);
            }

            WindowEvent::CloseRequested => {
                log::info!("Close requested. Closing App");
                event_loop.exit();
            }

            WindowEvent::Destroyed => log::error!("Window was destroyed"),

            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    tools::process_inputs(&mut self.inner.keys, key, event.state.is_pressed())
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.inner.cursor = glam::vec2(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                tools::process_inputs(&mut self.inner.mouse, button, state.is_pressed())
            }

            WindowEvent::RedrawRequested => {
                event_loop.set_control_flow(winit::event_loop::ControlFlow::wait_duration(
                    self.inner.fps,
                ));

                self.tick();
            }

            _ => {}
        }
    }

    #[inline]
    pub fn request_redraw(&self) {
        self.inner.window.0.request_redraw();
    }

    pub fn tick(&mut self) {
        self.scene.update(&mut self.inner);
        self.inner.renderer.tick();

        tools::reset_input(&mut self.inner.keys);
        tools::reset_input(&mut self.inner.mouse);
    }
}

//====================================================================
