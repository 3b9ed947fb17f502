use wgpu::{
    AddressMode, Device, Extent3d, FilterMode, ImageDataLayout, Queue, Sampler,
    SamplerDescriptor, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages,
    TextureView, TextureViewDescriptor,
};

/// Pixel data waiting to be uploaded to the GPU.
pub struct Texture {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

impl Texture {
    /// Single channel, one byte per pixel.
    pub fn grayscale(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            format: TextureFormat::R8Unorm,
        }
    }

    pub fn size(&self) -> Extent3d {
        Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }

    /// Rows are tightly packed, no alignment padding between them.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * self.format.block_copy_size(None).unwrap_or(1)
    }

    pub fn upload(&self, device: &Device, queue: &Queue) -> GpuTexture {
        let texture = device.create_texture(&TextureDescriptor {
            label: Some("glyph texture"),
            size: self.size(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: self.format,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            &self.data,
            ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(self.bytes_per_row()),
                rows_per_image: Some(self.height),
            },
            self.size(),
        );

        let view = texture.create_view(&TextureViewDescriptor::default());
        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("glyph sampler"),
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::Repeat,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
            mipmap_filter: FilterMode::Nearest,
            ..Default::default()
        });

        GpuTexture {
            texture,
            view,
            sampler,
        }
    }
}

/// A texture living on the device, together with the view and sampler used to read it.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: TextureView,
    pub sampler: Sampler,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_rows_are_unpadded() {
        let texture = Texture::grayscale(vec![0; 13 * 7], 13, 7);
        assert_eq!(texture.format, TextureFormat::R8Unorm);
        assert_eq!(texture.bytes_per_row(), 13);
        assert_eq!(
            texture.size(),
            Extent3d {
                width: 13,
                height: 7,
                depth_or_array_layers: 1
            }
        );
    }
}
