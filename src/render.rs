use std::sync::Arc;

use wgpu::{
    Adapter, Color, CommandEncoderDescriptor, CompositeAlphaMode, Device, DeviceDescriptor,
    Instance, Operations, PresentMode, Queue, RenderPass, RenderPassColorAttachment,
    RenderPassDescriptor, RequestAdapterOptions, StoreOp, Surface, SurfaceConfiguration,
    SurfaceError, TextureFormat, TextureUsages, TextureView, TextureViewDescriptor,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::error::RenderError;

/// Something that records its draw calls into a render pass.
pub trait Draw {
    fn draw<'a>(&'a self, rpass: &mut RenderPass<'a>);
}

// owns the device and the window surface. one frame = one pass that clears and then draws.
pub struct Render {
    device: Device,
    queue: Queue,
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

impl Render {
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let instance = Instance::default();
        let size = window.inner_size();

        let surface = instance.create_surface(window)?;

        let (adapter, device, queue) = pollster::block_on(async {
            let adapter = instance
                .request_adapter(&RequestAdapterOptions {
                    compatible_surface: Some(&surface),
                    ..Default::default()
                })
                .await
                .ok_or(RenderError::NoAdapter)?;

            let (device, queue) = adapter
                .request_device(&DeviceDescriptor::default(), None)
                .await?;

            Ok::<(Adapter, Device, Queue), RenderError>((adapter, device, queue))
        })?;

        device.on_uncaptured_error(Box::new(|err| log::error!("device error: {err}")));

        let format = preferred_format(&surface.get_capabilities(&adapter).formats)
            .ok_or(RenderError::NoSurfaceFormat)?;

        let info = adapter.get_info();
        log::info!(
            "using {} ({:?}), surface format {:?}",
            info.name,
            info.backend,
            format
        );

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode: CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        Ok(Self {
            device,
            queue,
            surface,
            config,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn format(&self) -> TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Matches the surface (and with it the viewport) to the framebuffer size.
    /// Zero sized framebuffers are ignored.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 || size == self.size() {
            return;
        }
        log::debug!("reconfiguring surface to {}x{}", size.width, size.height);
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Clears the frame to `clear`, lets `drawable` record into the pass and presents.
    /// A frame that can't be acquired is skipped.
    pub fn draw(&mut self, clear: Color, drawable: &impl Draw) -> Result<(), RenderError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(SurfaceError::Timeout) => {
                log::warn!("timed out acquiring the next frame");
                return Ok(());
            }
            Err(SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
        };

        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        draw_to_view(&self.device, &self.queue, &view, clear, drawable);

        frame.present();

        Ok(())
    }
}

/// Records one pass into `view`: clear to `clear`, then whatever `drawable` draws. Submits
/// without presenting, so any render attachment works, not only a surface frame.
pub fn draw_to_view(
    device: &Device,
    queue: &Queue,
    view: &TextureView,
    clear: Color,
    drawable: &impl Draw,
) {
    let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor::default());

    {
        let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: None,
            color_attachments: &[Some(RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        drawable.draw(&mut rpass);
    }

    queue.submit([encoder.finish()]);
}

/// Picks a linear format when the surface offers one, so clear colours and blending are
/// written as given instead of being gamma encoded.
pub fn preferred_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}
