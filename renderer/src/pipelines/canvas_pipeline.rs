//====================================================================

use crate::{
    canvas::Canvas,
    shared::{
        TextureRectVertex, Vertex, SURFACE_RECT_VERTICES, TEXTURE_RECT_INDEX_COUNT,
        TEXTURE_RECT_INDICES,
    },
    texture::Texture,
    tools,
};

//====================================================================

struct CanvasTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// Presents the most recent [`Canvas`] stretched over the whole surface.
pub struct CanvasRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,

    canvas: Option<CanvasTexture>,
}

impl CanvasRenderer {
    pub(crate) fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas Bind Group Layout"),
            entries: &[tools::bgl_texture_entry(0), tools::bgl_sampler_entry(1)],
        });

        let pipeline = tools::create_pipeline(
            device,
            config,
            "Canvas Pipeline",
            &[&bind_group_layout],
            &[TextureRectVertex::desc()],
            include_str!("shaders/canvas.wgsl"),
            tools::RenderPipelineDescriptor::default(),
        );

        let vertex_buffer = tools::buffer(
            device,
            tools::BufferType::Vertex,
            "Canvas",
            &SURFACE_RECT_VERTICES,
        );

        let index_buffer = tools::buffer(
            device,
            tools::BufferType::Index,
            "Canvas",
            &TEXTURE_RECT_INDICES,
        );

        Self {
            pipeline,
            bind_group_layout,
            vertex_buffer,
            index_buffer,
            index_count: TEXTURE_RECT_INDEX_COUNT,
            canvas: None,
        }
    }

    /// Uploads the canvas, recreating the backing texture when its size changed.
    pub(crate) fn prep(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, canvas: &Canvas) {
        let size = canvas.size();

        let needs_texture = match &self.canvas {
            Some(current) => current.texture.size() != size,
            None => true,
        };

        if needs_texture {
            log::debug!("Creating canvas texture of size {}", size);

            let texture = Texture::from_size(device, size, Some("Canvas Texture"));

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Canvas Bind Group"),
                layout: &self.bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });

            self.canvas = Some(CanvasTexture {
                texture,
                bind_group,
            });
        }

        if let Some(current) = &self.canvas {
            current.texture.write_canvas(queue, canvas);
        }
    }

    pub(crate) fn render(&self, pass: &mut wgpu::RenderPass) {
        let Some(canvas) = &self.canvas else {
            return;
        };

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &canvas.bind_group, &[]);

        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

//====================================================================
