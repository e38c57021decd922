//====================================================================

use std::sync::Arc;

use common::Size;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    error::{EventLoopError, OsError},
    event::StartCause,
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowAttributes,
};

use crate::{scene::Scene, State, StateInner};

//====================================================================

#[derive(Clone, Debug)]
pub struct WindowSettings {
    pub title: String,
    pub size: Size<u32>,
    /// Id of the page element the canvas is appended to in the browser.
    pub canvas_parent: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: String::from("Turnbase"),
            size: Size::new(800, 480),
            canvas_parent: String::from("game"),
        }
    }
}

//====================================================================

#[derive(Clone)]
pub struct Window(pub Arc<winit::window::Window>);
impl Window {
    pub(super) fn new(
        event_loop: &ActiveEventLoop,
        settings: &WindowSettings,
    ) -> Result<Self, OsError> {
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(settings.title.clone())
                .with_inner_size(PhysicalSize::new(settings.size.width, settings.size.height)),
        )?;

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowExtWebSys;

            log::info!("Adding canvas to window");

            match window.request_inner_size(PhysicalSize::new(
                settings.size.width,
                settings.size.height,
            )) {
                Some(_) => {}
                None => log::warn!("Got none when requesting window inner size"),
            };

            let appended = web_sys::window()
                .and_then(|win| win.document())
                .and_then(|doc| {
                    let dst = doc.get_element_by_id(&settings.canvas_parent)?;
                    let canvas = web_sys::Element::from(window.canvas()?);
                    dst.append_child(&canvas).ok()?;
                    Some(())
                });

            if appended.is_none() {
                log::error!(
                    "Couldn't append canvas to element '{}'",
                    settings.canvas_parent
                );
            }
        }

        Ok(Self(Arc::new(window)))
    }

    #[inline]
    pub fn size(&self) -> Size<u32> {
        let window_size = self.0.inner_size();

        Size {
            width: window_size.width,
            height: window_size.height,
        }
    }

    #[inline]
    pub fn set_title(&self, title: &str) {
        self.0.set_title(title);
    }
}

//====================================================================

pub(crate) type SceneBuilder = Box<dyn FnOnce(&mut StateInner) -> Box<dyn Scene>>;

pub struct Runner {
    settings: WindowSettings,
    scene_builder: Option<SceneBuilder>,
    state: Option<State>,
}

impl Runner {
    /// Opens the window and blocks until it closes. `build_scene` runs once,
    /// after the window and renderer have been created.
    pub fn run<S, F>(settings: WindowSettings, build_scene: F) -> Result<(), EventLoopError>
    where
        S: Scene,
        F: FnOnce(&mut StateInner) -> S + 'static,
    {
        let scene_builder: SceneBuilder =
            Box::new(move |state: &mut StateInner| -> Box<dyn Scene> {
                Box::new(build_scene(state))
            });

        EventLoop::new()?.run_app(&mut Self {
            settings,
            scene_builder: Some(scene_builder),
            state: None,
        })
    }
}

impl ApplicationHandler for Runner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::trace!("App Resumed - Creating state.");

        if self.state.is_some() {
            log::warn!("State already exists.");
            return;
        }

        let Some(scene_builder) = self.scene_builder.take() else {
            log::warn!("Scene was already built - not recreating state.");
            return;
        };

        match State::new(event_loop, &self.settings, scene_builder) {
            Ok(state) => {
                state.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Unable to create app state: {}", e);
                event_loop.exit();
            }
        }
    }

    #[inline]
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        if let Some(state) = &mut self.state {
            state.window_event(event_loop, window_id, event);
        }
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let Some(state) = &mut self.state {
            if let StartCause::ResumeTimeReached { .. } = cause {
                state.request_redraw();
            }
        }
    }
}

//====================================================================
