use wgpu::{
    BindGroupLayout, BlendState, ColorTargetState, ColorWrites, Device, ErrorFilter, Face,
    FragmentState, MultisampleState, PipelineCompilationOptions, PipelineLayoutDescriptor,
    PrimitiveState, PrimitiveTopology, RenderPipeline, RenderPipelineDescriptor, ShaderModule,
    ShaderModuleDescriptor, TextureFormat, VertexAttribute, VertexState, VertexStepMode,
};

use crate::{bind::VertexBufferEntry, error::RenderError};

/// Bundles the creation of a [wgpu::RenderPipeline] and its [wgpu::ShaderModule].
///
/// ```ignore
/// let pipeline = PipelineBuilder::new()
///     .with_shader(include_str!("shaders/glyph.wgsl"))
///     .with_bind(&bind.bgl)
///     .with_vb::<GlyphVertex>(VertexStepMode::Vertex, &vertex_attr_array![0 => Float32x4])
///     .build(device)?;
/// ```
///
/// The shader must expose `vertex` and `fragment` entry points.
pub struct PipelineBuilder<'a> {
    bgls: Vec<&'a BindGroupLayout>,
    shader_src: Option<String>,
    primitive_state: PrimitiveState,
    format: TextureFormat,
    blend: Option<BlendState>,
    vertex_entries: Vec<VertexBufferEntry>,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new() -> Self {
        Self {
            bgls: Vec::new(),
            shader_src: None,
            primitive_state: PrimitiveState::default(),
            format: TextureFormat::Bgra8Unorm,
            blend: None,
            vertex_entries: Vec::new(),
        }
    }

    pub fn with_cull_mode(mut self, cull_mode: Option<Face>) -> Self {
        self.primitive_state.cull_mode = cull_mode;
        self
    }

    pub fn with_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_state.topology = topology;
        self
    }

    pub fn with_shader(mut self, shader_src: &str) -> Self {
        self.shader_src = Some(shader_src.into());
        self
    }

    pub fn with_format(mut self, format: TextureFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_blend(mut self, blend: BlendState) -> Self {
        self.blend = Some(blend);
        self
    }

    pub fn with_bind(mut self, bgl: &'a BindGroupLayout) -> Self {
        self.bgls.push(bgl);
        self
    }

    pub fn with_vb<T>(mut self, step_mode: VertexStepMode, attributes: &[VertexAttribute]) -> Self {
        self.vertex_entries.push(VertexBufferEntry {
            array_stride: std::mem::size_of::<T>() as u64,
            step_mode,
            attributes: attributes.into(),
        });
        self
    }

    fn create_module(&self, device: &Device) -> Result<ShaderModule, RenderError> {
        let source = self
            .shader_src
            .as_deref()
            .ok_or_else(|| RenderError::Shader("no shader source set".into()))?;

        Ok(device.create_shader_module(ShaderModuleDescriptor {
            label: None,
            source: wgpu::ShaderSource::Wgsl(source.into()),
        }))
    }

    /// Builds the pipeline, turning any validation error raised by the shader or the pipeline
    /// into [RenderError::Shader].
    pub fn build(&self, device: &Device) -> Result<RenderPipeline, RenderError> {
        device.push_error_scope(ErrorFilter::Validation);
        let pipeline = self.create_pipeline(device);
        let scope = pollster::block_on(device.pop_error_scope());

        match (pipeline, scope) {
            (Ok(pipeline), None) => Ok(pipeline),
            (Err(err), _) => Err(err),
            (Ok(_), Some(err)) => Err(RenderError::Shader(err.to_string())),
        }
    }

    fn create_pipeline(&self, device: &Device) -> Result<RenderPipeline, RenderError> {
        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: self.bgls.as_slice(),
            push_constant_ranges: &[],
        });

        let module = self.create_module(device)?;

        let vbs = self
            .vertex_entries
            .iter()
            .map(|ent| ent.layout())
            .collect::<Vec<_>>();

        Ok(device.create_render_pipeline(&RenderPipelineDescriptor {
            label: None,
            layout: Some(&pipeline_layout),
            vertex: VertexState {
                module: &module,
                entry_point: "vertex",
                buffers: vbs.as_slice(),
                compilation_options: PipelineCompilationOptions::default(),
            },
            primitive: self.primitive_state,
            depth_stencil: None,
            multisample: MultisampleState::default(),
            fragment: Some(FragmentState {
                module: &module,
                entry_point: "fragment",
                targets: &[Some(ColorTargetState {
                    format: self.format,
                    blend: self.blend,
                    write_mask: ColorWrites::all(),
                })],
                compilation_options: PipelineCompilationOptions::default(),
            }),
            multiview: None,
        }))
    }
}

impl Default for PipelineBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
