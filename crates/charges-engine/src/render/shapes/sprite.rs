use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::image::{Bitmap, ImageId, ImageStore};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    create_viewport_ubo, quad_pipeline, texture_entries, viewport_uniform_entry,
    write_viewport_ubo, InstanceBuffer, QuadBuffers, QUAD_INDEX_COUNT,
};

/// GPU copy of one bitmap plus the bind group that samples it.
struct SpriteTexture {
    bind_group: wgpu::BindGroup,
}

/// Renderer for `DrawCmd::Sprite`.
///
/// Bitmaps are uploaded from the [`ImageStore`] the first time they are drawn
/// and cached by [`ImageId`] for the renderer's lifetime. Consecutive sprites
/// sharing a bitmap are batched into one instanced draw.
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,
    textures: HashMap<ImageId, SpriteTexture>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer,
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            bind_group_layout: None,
            viewport_ubo: None,
            sampler: None,
            textures: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::new("charges sprite instance vbo"),
        }
    }
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders every sprite in `draw_list`, back-to-front.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        images: &ImageStore,
    ) {
        let mut instances: Vec<SpriteInstance> = Vec::new();
        let mut batches: Vec<(ImageId, Range<u32>)> = Vec::new();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Sprite(cmd) = &item.cmd else { continue };
            let Some(bitmap) = images.get(cmd.image) else {
                log::warn!("SpriteRenderer: unknown ImageId {:?}, skipping", cmd.image);
                continue;
            };

            let index = instances.len() as u32;
            instances.push(SpriteInstance {
                origin: [cmd.origin.x, cmd.origin.y],
                size: [bitmap.width() as f32, bitmap.height() as f32],
                tint: cmd.tint,
            });
            match batches.last_mut() {
                Some((image, range)) if *image == cmd.image => range.end = index + 1,
                _ => batches.push((cmd.image, index..index + 1)),
            }
        }

        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx, "charges sprite quad"));
        }
        for (image, _) in &batches {
            if let Some(bitmap) = images.get(*image) {
                self.ensure_texture(ctx, *image, bitmap);
            }
        }
        self.instances.upload(ctx, &instances);

        let (Some(pipeline), Some(ubo), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.viewport_ubo.as_ref(),
            self.quad.as_ref(),
            self.instances.buffer(),
        ) else {
            return;
        };
        write_viewport_ubo(ctx, ubo);

        let mut rpass = target.begin_load_pass("charges sprite pass");
        rpass.set_pipeline(pipeline);
        quad.bind(&mut rpass);
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));

        for (image, range) in batches {
            let Some(texture) = self.textures.get(&image) else { continue };
            rpass.set_bind_group(0, &texture.bind_group, &[]);
            rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, range);
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let [texture_entry, sampler_entry] = texture_entries(true);
        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("charges sprite bgl"),
            entries: &[viewport_uniform_entry(), texture_entry, sampler_entry],
        });

        let pipeline = quad_pipeline(
            ctx,
            "charges sprite pipeline",
            include_str!("shaders/sprite.wgsl"),
            &bgl,
            SpriteInstance::layout(),
        );

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        self.viewport_ubo = Some(create_viewport_ubo(ctx, "charges sprite viewport ubo"));
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("charges sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
        // Bind groups reference the old layout and uniform buffer.
        self.textures.clear();
    }

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>, id: ImageId, bitmap: &Bitmap) {
        if self.textures.contains_key(&id) {
            return;
        }
        let (Some(bgl), Some(ubo), Some(sampler)) = (
            self.bind_group_layout.as_ref(),
            self.viewport_ubo.as_ref(),
            self.sampler.as_ref(),
        ) else {
            return;
        };

        let size = wgpu::Extent3d {
            width: bitmap.width().max(1),
            height: bitmap.height().max(1),
            depth_or_array_layers: 1,
        };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("charges sprite texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        if bitmap.width() > 0 && bitmap.height() > 0 {
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                bitmap.rgba(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * bitmap.width()),
                    rows_per_image: Some(bitmap.height()),
                },
                size,
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("charges sprite bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(sampler) },
            ],
        });

        log::debug!("uploaded sprite texture {id:?} ({}x{})", bitmap.width(), bitmap.height());
        self.textures.insert(id, SpriteTexture { bind_group });
    }
}

/// Instance data layout (32 bytes):
///
///  offset  0  origin  [f32; 2]   loc 1
///  offset  8  size    [f32; 2]   loc 2
///  offset 16  tint    [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteInstance {
    origin: [f32; 2],
    size: [f32; 2],
    tint: [f32; 4],
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // tint
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
