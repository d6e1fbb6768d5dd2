//! GPU canvas: instanced circles and textured quads through wgpu

use std::ops::Range;

use common::{create_instance_buffer, create_uniform_buffer, CameraUniform, GraphicsContext, ScreenCamera};
use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::asset::PlanetImage;
use crate::config::Color;
use crate::scene::{Canvas, Rect};

/// Instance data for one filled circle
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl CircleInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32,
        3 => Float32x4,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Instance data for one image blit
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub origin: [f32; 2],
    pub size: [f32; 2],
}

impl SpriteInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Quad vertex for instanced rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

// Unit quad vertices
const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

/// Handle to a texture uploaded with [`SceneRenderer::upload_texture`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureId(usize);

/// A run of consecutive draw calls of the same kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    Circles(Range<u32>),
    Sprites { texture: TextureId, range: Range<u32> },
}

/// Draw calls recorded for one frame, in call order
#[derive(Debug, Default)]
pub struct DrawList {
    circles: Vec<CircleInstance>,
    sprites: Vec<SpriteInstance>,
    batches: Vec<Batch>,
    max_circles: usize,
    max_sprites: usize,
}

impl DrawList {
    pub fn new(max_circles: usize, max_sprites: usize) -> Self {
        Self {
            max_circles,
            max_sprites,
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        self.circles.clear();
        self.sprites.clear();
        self.batches.clear();
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn circles(&self) -> &[CircleInstance] {
        &self.circles
    }

    pub fn sprites(&self) -> &[SpriteInstance] {
        &self.sprites
    }
}

impl Canvas for DrawList {
    type Image = TextureId;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if self.circles.len() >= self.max_circles {
            log::warn!("Circle budget of {} exceeded, dropping draw call", self.max_circles);
            return;
        }

        let index = self.circles.len() as u32;
        self.circles.push(CircleInstance {
            center: center.to_array(),
            radius,
            color,
        });

        match self.batches.last_mut() {
            Some(Batch::Circles(range)) => range.end = index + 1,
            _ => self.batches.push(Batch::Circles(index..index + 1)),
        }
    }

    fn draw_image(&mut self, image: &TextureId, rect: Rect) {
        if self.sprites.len() >= self.max_sprites {
            log::warn!("Sprite budget of {} exceeded, dropping draw call", self.max_sprites);
            return;
        }

        let index = self.sprites.len() as u32;
        self.sprites.push(SpriteInstance {
            origin: rect.origin.to_array(),
            size: rect.size.to_array(),
        });

        if let Some(Batch::Sprites { texture, range }) = self.batches.last_mut() {
            if *texture == *image {
                range.end = index + 1;
                return;
            }
        }
        self.batches.push(Batch::Sprites {
            texture: *image,
            range: index..index + 1,
        });
    }
}

pub struct SceneRenderer {
    circle_pipeline: wgpu::RenderPipeline,
    sprite_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    circle_buffer: wgpu::Buffer,
    sprite_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: Vec<wgpu::BindGroup>,
    draw_list: DrawList,
}

impl SceneRenderer {
    pub fn new(ctx: &GraphicsContext, max_circles: usize, max_sprites: usize) -> Self {
        let device = &ctx.device;

        let circle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Circle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/circle.wgsl").into()),
        });
        let sprite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Camera uniform buffer
        let camera = ScreenCamera::new(ctx.size.width as f32, ctx.size.height as f32);
        let camera_buffer = create_uniform_buffer(device, &CameraUniform::from_screen_camera(&camera));

        let camera_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let texture_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sprite Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sprite Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let circle_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Circle Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });
        let sprite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let circle_pipeline = Self::create_pipeline(
            ctx,
            "Circle Pipeline",
            &circle_layout,
            &circle_shader,
            ("vs_circle", "fs_circle"),
            CircleInstance::layout(),
        );
        let sprite_pipeline = Self::create_pipeline(
            ctx,
            "Sprite Pipeline",
            &sprite_layout,
            &sprite_shader,
            ("vs_sprite", "fs_sprite"),
            SpriteInstance::layout(),
        );

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let circle_buffer = create_instance_buffer::<CircleInstance>(device, "Circle Instance Buffer", max_circles);
        let sprite_buffer = create_instance_buffer::<SpriteInstance>(device, "Sprite Instance Buffer", max_sprites);

        Self {
            circle_pipeline,
            sprite_pipeline,
            quad_buffer,
            circle_buffer,
            sprite_buffer,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            sampler,
            textures: Vec::new(),
            draw_list: DrawList::new(max_circles, max_sprites),
        }
    }

    fn create_pipeline(
        ctx: &GraphicsContext,
        label: &str,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        (vs_entry, fs_entry): (&str, &str),
        instance_layout: wgpu::VertexBufferLayout<'static>,
    ) -> wgpu::RenderPipeline {
        ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: vs_entry,
                buffers: &[QuadVertex::layout(), instance_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: fs_entry,
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }

    /// Upload an RGBA image so it can be drawn with [`Canvas::draw_image`]
    pub fn upload_texture(&mut self, ctx: &GraphicsContext, image: &PlanetImage) -> TextureId {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Planet Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Planet Texture Bind Group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.textures.push(bind_group);
        TextureId(self.textures.len() - 1)
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &ScreenCamera) {
        let uniform = CameraUniform::from_screen_camera(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Forget the previous frame's draw calls
    pub fn begin_frame(&mut self) {
        self.draw_list.clear();
    }

    /// Upload the instances recorded since [`Self::begin_frame`]
    pub fn prepare(&self, queue: &wgpu::Queue) {
        if !self.draw_list.circles().is_empty() {
            queue.write_buffer(&self.circle_buffer, 0, bytemuck::cast_slice(self.draw_list.circles()));
        }
        if !self.draw_list.sprites().is_empty() {
            queue.write_buffer(&self.sprite_buffer, 0, bytemuck::cast_slice(self.draw_list.sprites()));
        }
    }

    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView, background: wgpu::Color) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(background),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));

        for batch in self.draw_list.batches() {
            match batch {
                Batch::Circles(range) => {
                    render_pass.set_pipeline(&self.circle_pipeline);
                    render_pass.set_vertex_buffer(1, self.circle_buffer.slice(..));
                    render_pass.draw(0..6, range.clone());
                }
                Batch::Sprites { texture, range } => {
                    let Some(bind_group) = self.textures.get(texture.0) else {
                        log::error!("Unknown texture {:?}, skipping sprite batch", texture);
                        continue;
                    };
                    render_pass.set_pipeline(&self.sprite_pipeline);
                    render_pass.set_bind_group(1, bind_group, &[]);
                    render_pass.set_vertex_buffer(1, self.sprite_buffer.slice(..));
                    render_pass.draw(0..6, range.clone());
                }
            }
        }
    }
}

impl Canvas for SceneRenderer {
    type Image = TextureId;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.draw_list.fill_circle(center, radius, color);
    }

    fn draw_image(&mut self, image: &TextureId, rect: Rect) {
        self.draw_list.draw_image(image, rect);
    }
}
