//====================================================================

use std::{error::Error, fmt::Display};

use common::{Color, Size};
use pipelines::canvas_pipeline::CanvasRenderer;
use wgpu::SurfaceTarget;

pub mod canvas;
pub mod pipelines;
pub mod shared;
pub mod text;
pub mod texture;
pub mod tools;

pub use canvas::Canvas;
pub use text::{TextPainter, TextStyle};

//====================================================================

#[derive(Debug)]
pub enum RendererError {
    CreateSurface(wgpu::CreateSurfaceError),
    NoAdapter,
    RequestDevice(wgpu::RequestDeviceError),
}

impl Error for RendererError {}

impl Display for RendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RendererError::CreateSurface(e) => write!(f, "Unable to create surface: {}", e),
            RendererError::NoAdapter => write!(f, "No compatible graphics adapter found"),
            RendererError::RequestDevice(e) => write!(f, "Unable to request device: {}", e),
        }
    }
}

//====================================================================

pub struct Renderer {
    core: RendererCore,
    clear_color: wgpu::Color,

    canvas_pipeline: CanvasRenderer,
}

impl Renderer {
    pub fn new(
        window: impl Into<SurfaceTarget<'static>>,
        window_size: Size<u32>,
    ) -> Result<Self, RendererError> {
        let core = pollster::block_on(RendererCore::new(window, window_size))?;

        let clear_color = wgpu::Color {
            r: 0.2,
            g: 0.2,
            b: 0.2,
            a: 1.,
        };

        let canvas_pipeline = CanvasRenderer::new(&core.device, &core.config);

        Ok(Self {
            core,
            clear_color,
            canvas_pipeline,
        })
    }

    pub fn resize(&mut self, new_size: Size<u32>) {
        self.core.config.width = new_size.width;
        self.core.config.height = new_size.height;
        self.core
            .surface
            .configure(&self.core.device, &self.core.config);
    }

    #[inline]
    pub fn set_clear_color(&mut self, color: Color) {
        let [r, g, b, a] = color.to_f64_array();
        self.clear_color = wgpu::Color { r, g, b, a };
    }

    /// Replaces whatever was presented before with `canvas`.
    #[inline]
    pub fn set_canvas(&mut self, canvas: &Canvas) {
        self.canvas_pipeline
            .prep(&self.core.device, &self.core.queue, canvas);
    }

    #[inline]
    pub fn tick(&mut self) {
        self.render();
    }

    fn render(&mut self) {
        let (surface_texture, surface_view) = match self.core.surface.get_current_texture() {
            Ok(texture) => {
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                (texture, view)
            }
            Err(_) => {
                log::warn!("Unable to get surface texture - skipping frame");
                return;
            }
        };

        let mut encoder = self
            .core
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main command encoder"),
            });

        self.render_inner(&mut encoder, &surface_view);

        self.core.queue.submit(Some(encoder.finish()));
        surface_texture.present();
    }

    fn render_inner(&self, encoder: &mut wgpu::CommandEncoder, surface_view: &wgpu::TextureView) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.canvas_pipeline.render(&mut render_pass);
    }
}

//====================================================================

pub struct RendererCore {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
}

impl RendererCore {
    pub async fn new(
        window: impl Into<SurfaceTarget<'static>>,
        window_size: Size<u32>,
    ) -> Result<Self, RendererError> {
        log::debug!("Creating core wgpu renderer components.");

        log::debug!("Window inner size = {:?}", window_size);

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(RendererError::CreateSurface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(RendererError::NoAdapter)?;

        log::debug!("Chosen device adapter: {:#?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    #[cfg(target_arch = "wasm32")]
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(RendererError::RequestDevice)?;

        let surface_capabilities = surface.get_capabilities(&adapter);

        let surface_format = surface_capabilities
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .copied()
            .unwrap_or(surface_capabilities.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: window_size.width,
            height: window_size.height,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
        };

        surface.configure(&device, &config);

        log::debug!("Successfully created core wgpu components.");

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }
}

//====================================================================
