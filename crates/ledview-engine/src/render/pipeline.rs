use crate::shader::{ShaderError, ShaderProgram, COLOR_ATTRIBUTE, FRAME_UNIFORM, POSITION_ATTRIBUTE};

use super::FrameUniform;

/// Bytes per LED in the position buffer (`Float32x3`).
pub const POSITION_STRIDE: u64 = 3 * std::mem::size_of::<f32>() as u64;

/// Bytes per LED in the color buffer (`Float32x4`).
pub const COLOR_STRIDE: u64 = 4 * std::mem::size_of::<f32>() as u64;

/// Vertices per point sprite (two triangles).
pub const SPRITE_VERTICES: u32 = 6;

/// wgpu point pipeline built from a linked [`ShaderProgram`].
pub struct PointPipeline {
    pub(crate) pipeline: wgpu::RenderPipeline,
    /// Present only when the program declares the frame uniform.
    pub(crate) frame: Option<FrameBinding>,
}

pub(crate) struct FrameBinding {
    pub group: u32,
    pub ubo: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl PointPipeline {
    /// Creates shader modules, the optional frame binding and the pipeline.
    pub(crate) fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        program: &ShaderProgram,
    ) -> Result<Self, ShaderError> {
        let position = program.require_attribute(POSITION_ATTRIBUTE, 3)?.location;
        let color = program.require_attribute(COLOR_ATTRIBUTE, 4)?.location;
        if position == color {
            return Err(ShaderError::link(format!(
                "`{POSITION_ATTRIBUTE}` and `{COLOR_ATTRIBUTE}` share @location({position})"
            )));
        }

        let vs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ledview points vs"),
            source: wgpu::ShaderSource::Wgsl(program.vertex().source.as_str().into()),
        });
        let fs = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ledview points fs"),
            source: wgpu::ShaderSource::Wgsl(program.fragment().source.as_str().into()),
        });

        let frame_location = program.locate_uniform(FRAME_UNIFORM);
        if let Some(loc) = frame_location {
            if loc.group != 0 {
                return Err(ShaderError::link(format!(
                    "uniform `{FRAME_UNIFORM}` must be in group 0, found group {}",
                    loc.group
                )));
            }
        } else {
            log::debug!("program has no `{FRAME_UNIFORM}` uniform; frame matrix will not be bound");
        }

        let bind_group_layout = frame_location.map(|loc| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("ledview frame bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: loc.binding,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(FrameUniform::min_binding_size()),
                    },
                    count: None,
                }],
            })
        });

        let layouts: Vec<&wgpu::BindGroupLayout> = bind_group_layout.iter().collect();
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ledview points pipeline layout"),
            bind_group_layouts: &layouts,
            immediate_size: 0,
        });

        let position_attrs = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: position,
        }];
        let color_attrs = [wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 0,
            shader_location: color,
        }];
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: POSITION_STRIDE,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &position_attrs,
            },
            wgpu::VertexBufferLayout {
                array_stride: COLOR_STRIDE,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &color_attrs,
            },
        ];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ledview points pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(program.vertex().entry_point.as_str()),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(program.fragment().entry_point.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
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
            multiview_mask: None,
            cache: None,
        });

        let frame = match (frame_location, bind_group_layout.as_ref()) {
            (Some(loc), Some(bgl)) => {
                let ubo = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("ledview frame ubo"),
                    size: std::mem::size_of::<FrameUniform>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("ledview frame bind group"),
                    layout: bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: loc.binding,
                        resource: ubo.as_entire_binding(),
                    }],
                });
                Some(FrameBinding { group: loc.group, ubo, bind_group })
            }
            _ => None,
        };

        Ok(Self { pipeline, frame })
    }
}
