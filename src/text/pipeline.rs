use bytemuck::{Pod, Zeroable};
use wgpu::{
    vertex_attr_array, BlendState, Buffer, BufferDescriptor, BufferUsages, Device,
    PrimitiveTopology, Queue, RenderPass, RenderPipeline, SamplerBindingType, ShaderStages,
    TextureFormat, TextureSampleType, TextureViewDimension, VertexStepMode,
};

use crate::{
    bind::{Bind, BindEntry, BindEntryType},
    camera::CameraUniform,
    error::RenderError,
    geometry::Geometry,
    pipeline::PipelineBuilder,
    render::Draw,
};

use super::glyph::Glyph;

/// Position in `xy`, texture coordinate in `zw`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub vertex: [f32; 4],
}

impl GlyphVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            vertex: [x, y, u, v],
        }
    }
}

/// Two triangles covering a glyph-sized rectangle centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphQuad {
    pub vertices: [GlyphVertex; 6],
}

impl GlyphQuad {
    pub fn new(glyph_width: f32, glyph_height: f32, scale: f32) -> Self {
        let w = glyph_width * scale;
        let h = glyph_height * scale;
        let xpos = -w / 2.0;
        let ypos = -h / 2.0;

        // texture row 0 is the top of the bitmap
        Self {
            vertices: [
                GlyphVertex::new(xpos, ypos + h, 0.0, 0.0),
                GlyphVertex::new(xpos, ypos, 0.0, 1.0),
                GlyphVertex::new(xpos + w, ypos, 1.0, 1.0),
                GlyphVertex::new(xpos, ypos + h, 0.0, 0.0),
                GlyphVertex::new(xpos + w, ypos, 1.0, 1.0),
                GlyphVertex::new(xpos + w, ypos + h, 1.0, 0.0),
            ],
        }
    }

    pub fn for_glyph(glyph: &Glyph, scale: f32) -> Self {
        Self::new(glyph.width as f32, glyph.height as f32, scale)
    }
}

impl Geometry for GlyphQuad {
    fn contents(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    fn length(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// Everything needed to draw one glyph quad: pipeline, bindings and vertex storage.
pub struct GlyphPipeline {
    pub pipeline: RenderPipeline,
    pub bind: Bind,
    pub vertex_buffer: Buffer,
    vertex_count: u32,
}

impl GlyphPipeline {
    pub fn new(device: &Device, format: TextureFormat, glyph: &Glyph) -> Result<Self, RenderError> {
        let bind = Bind::new(
            &[
                // model view projection
                BindEntry {
                    visibility: ShaderStages::VERTEX,
                    ty: BindEntryType::BufferUniform {
                        size: std::mem::size_of::<CameraUniform>() as u64,
                        usages: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
                    },
                },
                // glyph coverage
                BindEntry {
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindEntryType::Texture {
                        sample_type: TextureSampleType::Float { filterable: false },
                        view_dimension: TextureViewDimension::D2,
                        view: &glyph.texture.view,
                    },
                },
                BindEntry {
                    visibility: ShaderStages::FRAGMENT,
                    ty: BindEntryType::Sampler {
                        binding_type: SamplerBindingType::NonFiltering,
                        sampler: &glyph.texture.sampler,
                    },
                },
            ],
            device,
        );

        let pipeline = PipelineBuilder::new()
            .with_format(format)
            .with_cull_mode(None)
            .with_topology(PrimitiveTopology::TriangleList)
            .with_blend(BlendState::ALPHA_BLENDING)
            .with_bind(&bind.bgl)
            .with_shader(include_str!("../shaders/glyph.wgsl"))
            .with_vb::<GlyphVertex>(VertexStepMode::Vertex, &vertex_attr_array![0 => Float32x4])
            .build(device)?;

        let vertex_buffer = device.create_buffer(&BufferDescriptor {
            label: Some("glyph vertices"),
            size: std::mem::size_of::<[GlyphVertex; 6]>() as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            pipeline,
            bind,
            vertex_buffer,
            vertex_count: 0,
        })
    }

    /// Writes the transform and the quad. Called every frame, nothing is cached between frames.
    pub fn prepare(&mut self, queue: &Queue, camera: &CameraUniform, geometry: &impl Geometry) {
        if let Some(buffer) = self.bind.buffer(0) {
            queue.write_buffer(buffer, 0, bytemuck::bytes_of(camera));
        }
        queue.write_buffer(&self.vertex_buffer, 0, geometry.contents());
        self.vertex_count = geometry.length();
    }
}

impl Draw for GlyphPipeline {
    fn draw<'a>(&'a self, rpass: &mut RenderPass<'a>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind.bg, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn quad_is_centred_and_scaled() {
        let quad = GlyphQuad::new(12.0, 18.0, 0.1);
        let xs = quad.vertices.iter().map(|v| v.vertex[0]);
        let ys = quad.vertices.iter().map(|v| v.vertex[1]);

        let (min_x, max_x) = xs.fold((f32::MAX, f32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        let (min_y, max_y) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));

        assert!(close(min_x, -0.6));
        assert!(close(max_x, 0.6));
        assert!(close(min_y, -0.9));
        assert!(close(max_y, 0.9));
        assert!(close(max_x - min_x, 1.2));
        assert!(close(max_y - min_y, 1.8));
    }

    #[test]
    fn top_edge_samples_the_first_row() {
        let quad = GlyphQuad::new(12.0, 18.0, 0.1);
        for v in quad.vertices {
            let [_, y, _, tex_v] = v.vertex;
            if close(y, 0.9) {
                assert_eq!(tex_v, 0.0);
            } else {
                assert_eq!(tex_v, 1.0);
            }
        }
    }

    #[test]
    fn quad_bytes_match_the_vertex_layout() {
        let quad = GlyphQuad::new(12.0, 18.0, 0.1);
        assert_eq!(quad.length(), 6);
        assert_eq!(quad.contents().len(), 6 * 4 * std::mem::size_of::<f32>());
        assert_eq!(std::mem::size_of::<GlyphVertex>(), 16);
    }
}
