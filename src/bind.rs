use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, Buffer, BufferDescriptor, BufferUsages, Device, Sampler,
    SamplerBindingType, ShaderStages, TextureSampleType, TextureView, TextureViewDimension,
    VertexAttribute, VertexBufferLayout, VertexStepMode,
};

pub enum BindEntryType<'a> {
    /// A buffer owned by the [Bind], created with the given size.
    BufferUniform { size: u64, usages: BufferUsages },
    Texture {
        sample_type: TextureSampleType,
        view_dimension: TextureViewDimension,
        view: &'a TextureView,
    },
    Sampler {
        binding_type: SamplerBindingType,
        sampler: &'a Sampler,
    },
}

pub struct BindEntry<'a> {
    pub visibility: ShaderStages,
    pub ty: BindEntryType<'a>,
}

impl<'a> BindEntry<'a> {
    pub fn layout_entry(&self, binding: u32) -> BindGroupLayoutEntry {
        BindGroupLayoutEntry {
            binding,
            visibility: self.visibility,
            ty: match &self.ty {
                BindEntryType::BufferUniform { .. } => wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                BindEntryType::Texture {
                    sample_type,
                    view_dimension,
                    ..
                } => wgpu::BindingType::Texture {
                    sample_type: *sample_type,
                    view_dimension: *view_dimension,
                    multisampled: false,
                },
                BindEntryType::Sampler { binding_type, .. } => {
                    wgpu::BindingType::Sampler(*binding_type)
                }
            },
            count: None,
        }
    }

    fn buffer(&self, device: &Device) -> Option<Buffer> {
        match &self.ty {
            BindEntryType::BufferUniform { size, usages } => {
                Some(device.create_buffer(&BufferDescriptor {
                    label: None,
                    size: *size,
                    usage: *usages,
                    mapped_at_creation: false,
                }))
            }
            _ => None,
        }
    }

    fn group_entry<'b>(&'b self, binding: u32, buffer: Option<&'b Buffer>) -> BindGroupEntry<'b> {
        let resource = match (&self.ty, buffer) {
            (BindEntryType::BufferUniform { .. }, Some(buffer)) => buffer.as_entire_binding(),
            (BindEntryType::Texture { view, .. }, _) => wgpu::BindingResource::TextureView(*view),
            (BindEntryType::Sampler { sampler, .. }, _) => wgpu::BindingResource::Sampler(*sampler),
            (BindEntryType::BufferUniform { .. }, None) => {
                unreachable!("uniform entries always own a buffer")
            }
        };

        BindGroupEntry { binding, resource }
    }
}

/// A bind group together with its layout and the buffers it owns.
/// Entries are bound in order, so entry `n` is `@binding(n)` in the shader.
pub struct Bind {
    pub bg: BindGroup,
    pub bgl: BindGroupLayout,
    pub buffers: Vec<Option<Buffer>>,
}

impl Bind {
    pub fn new(bind_entries: &[BindEntry], device: &Device) -> Self {
        let layout_entries = bind_entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| entry.layout_entry(idx as u32))
            .collect::<Vec<_>>();

        let bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: None,
            entries: &layout_entries,
        });

        let buffers = bind_entries
            .iter()
            .map(|entry| entry.buffer(device))
            .collect::<Vec<_>>();

        let group_entries = bind_entries
            .iter()
            .zip(&buffers)
            .enumerate()
            .map(|(idx, (entry, buffer))| entry.group_entry(idx as u32, buffer.as_ref()))
            .collect::<Vec<_>>();

        let bg = device.create_bind_group(&BindGroupDescriptor {
            label: None,
            layout: &bgl,
            entries: &group_entries,
        });

        Self { bg, bgl, buffers }
    }

    pub fn buffer(&self, binding: u32) -> Option<&Buffer> {
        self.buffers.get(binding as usize)?.as_ref()
    }
}

pub struct VertexBufferEntry {
    pub array_stride: u64,
    pub step_mode: VertexStepMode,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexBufferEntry {
    pub fn layout(&self) -> VertexBufferLayout {
        VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: self.step_mode,
            attributes: self.attributes.as_slice(),
        }
    }
}
