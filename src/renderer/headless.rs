//! 无窗口渲染设备
//!
//! 在 CPU 上实现 `RenderDevice`：着色器只做基本检查，顶点和纹理数据保存在内存中，
//! 当前帧的每次绘制记录为一条 `DrawRecord`，更早的帧只保留计数。用于命令行运行和测试。

use std::path::Path;

use tracing::{debug, trace};

use crate::core::error::{GraphicsError, Result};
use crate::geometry::mesh::MeshArrays;
use crate::geometry::obj::AttributeKind;

use super::buffers::BufferSet;
use super::frame::{DrawUniforms, UniformBlock};
use super::shaders::{attribute_name, declared_inputs, ShaderSources};
use super::texture::{ImageTextureLoader, TextureData};
use super::{FrameScheduler, RenderDevice};

/// 已"编译"的着色器程序句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramId(pub usize);

/// 一次绘制调用的记录
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub program: ProgramId,
    pub vertex_count: usize,
    pub attributes: usize,
    pub block: UniformBlock,
    pub texture_size: (u32, u32),
}

/// CPU 渲染设备
#[derive(Debug)]
pub struct HeadlessDevice {
    width: u32,
    height: u32,
    textures: ImageTextureLoader,
    programs: usize,
    /// 当前帧的绘制
    draws: Vec<DrawRecord>,
    total_draws: usize,
    total_triangles: usize,
}

impl HeadlessDevice {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            textures: ImageTextureLoader::new(true),
            programs: 0,
            draws: Vec::new(),
            total_draws: 0,
            total_triangles: 0,
        }
    }

    /// 替换纹理加载器（例如关闭白色纹理回退）
    pub fn with_texture_loader(mut self, loader: ImageTextureLoader) -> Self {
        self.textures = loader;
        self
    }

    /// 当前帧的绘制记录
    pub fn draws(&self) -> &[DrawRecord] {
        &self.draws
    }

    /// 所有帧的绘制调用总数
    pub fn draw_count(&self) -> usize {
        self.total_draws
    }

    pub fn programs_built(&self) -> usize {
        self.programs
    }

    /// 所有绘制调用提交的三角形总数
    pub fn triangles_drawn(&self) -> usize {
        self.total_triangles
    }
}

impl RenderDevice for HeadlessDevice {
    type Program = ProgramId;
    type Buffers = BufferSet;
    type Texture = TextureData;

    fn build_program(&mut self, sources: &ShaderSources) -> Result<ProgramId> {
        for (stage, source) in [("vertex", &sources.vertex), ("fragment", &sources.fragment)] {
            if !source.trim_start().starts_with("#version") {
                return Err(GraphicsError::ShaderCompilation(format!(
                    "{} shader is missing a #version directive",
                    stage
                ))
                .into());
            }
        }

        let position = attribute_name(AttributeKind::Position);
        if !declared_inputs(&sources.vertex).contains(&position) {
            return Err(GraphicsError::ShaderCompilation(format!(
                "vertex shader does not declare '{}'",
                position
            ))
            .into());
        }

        let id = ProgramId(self.programs);
        self.programs += 1;
        debug!(program = id.0, "Shader program built");
        Ok(id)
    }

    fn create_buffers(&mut self, mesh: &MeshArrays) -> Result<BufferSet> {
        if mesh.position.is_empty() {
            return Err(GraphicsError::ResourceCreation("mesh has no vertices".to_string()).into());
        }
        Ok(BufferSet::from_mesh(mesh))
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureData> {
        self.textures.load(path)
    }

    fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    fn begin_frame(&mut self) {
        self.draws.clear();
    }

    fn draw(
        &mut self,
        program: &ProgramId,
        buffers: &BufferSet,
        texture: &TextureData,
        uniforms: &DrawUniforms,
    ) -> Result<()> {
        if buffers.vertex_count % 3 != 0 {
            return Err(GraphicsError::CommandExecution(format!(
                "vertex count {} is not a multiple of 3",
                buffers.vertex_count
            ))
            .into());
        }

        trace!(program = program.0, vertices = buffers.vertex_count, "Draw");
        self.total_draws += 1;
        self.total_triangles += buffers.vertex_count / 3;
        self.draws.push(DrawRecord {
            program: *program,
            vertex_count: buffers.vertex_count,
            attributes: buffers.attributes.len(),
            block: UniformBlock::from(uniforms),
            texture_size: texture.size(),
        });
        Ok(())
    }
}

/// 固定步长的帧调度器
///
/// 产生 `frames` 帧，第 n 帧的时间为 `n / frame_rate` 秒。
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    frames: u32,
    step: f32,
    next: u32,
}

impl FixedStepScheduler {
    pub fn new(frames: u32, frame_rate: f32) -> Self {
        Self {
            frames,
            step: 1.0 / frame_rate,
            next: 0,
        }
    }
}

impl FrameScheduler for FixedStepScheduler {
    fn next_frame(&mut self) -> Option<f32> {
        if self.next >= self.frames {
            return None;
        }
        let time = self.next as f32 * self.step;
        self.next += 1;
        Some(time)
    }
}
