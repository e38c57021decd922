//====================================================================

use wgpu::util::DeviceExt;

//====================================================================

pub struct RenderPipelineDescriptor {
    pub primitive: wgpu::PrimitiveState,
    pub multisample: wgpu::MultisampleState,
    pub blend: Option<wgpu::BlendState>,
}

impl Default for RenderPipelineDescriptor {
    fn default() -> Self {
        Self {
            primitive: wgpu::PrimitiveState::default(),
            multisample: wgpu::MultisampleState::default(),
            blend: Some(wgpu::BlendState::REPLACE),
        }
    }
}

pub fn create_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    label: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    vertex_buffers: &[wgpu::VertexBufferLayout],
    shader_module_data: &str,

    desc: RenderPipelineDescriptor,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} layout", label)),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} shader module", label)),
        source: wgpu::ShaderSource::Wgsl(shader_module_data.into()),
    });

    let fragment_targets = [Some(wgpu::ColorTargetState {
        format: config.format,
        blend: desc.blend,
        write_mask: wgpu::ColorWrites::all(),
    })];

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader_module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: vertex_buffers,
        },
        primitive: desc.primitive,
        depth_stencil: None,
        multisample: desc.multisample,
        fragment: Some(wgpu::FragmentState {
            module: &shader_module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &fragment_targets,
        }),
        multiview: None,
        cache: None,
    })
}

//====================================================================

pub fn bgl_texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

pub fn bgl_sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

pub enum BufferType {
    Vertex,
    Index,
}

pub fn buffer<D: bytemuck::Pod>(
    device: &wgpu::Device,
    buffer_type: BufferType,
    label: &str,
    data: &[D],
) -> wgpu::Buffer {
    let (name, usage) = match buffer_type {
        BufferType::Vertex => ("Vertex", wgpu::BufferUsages::VERTEX),
        BufferType::Index => ("Index", wgpu::BufferUsages::INDEX),
    };

    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} {} Buffer", label, name)),
        contents: bytemuck::cast_slice(data),
        usage,
    })
}

//====================================================================
