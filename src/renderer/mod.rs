//! 渲染器模块
//!
//! 解析得到的网格通过这个模块交给渲染设备。设备本身是一个黑盒，
//! 只通过 `RenderDevice` 接口创建资源和发出绘制调用。
//!
//! # 架构设计
//!
//! - `RenderDevice`：着色器程序、顶点缓冲、纹理和绘制调用的统一接口
//! - `FrameScheduler`：决定何时渲染下一帧
//! - `Viewer`：把网格、场景配置和设备连接起来，每帧为每个实例发出一次绘制
//! - `headless`：CPU 上的设备实现

use std::path::Path;

use tracing::{debug, info};

use crate::core::error::Result;
use crate::core::scene::SceneConfig;
use crate::geometry::mesh::MeshArrays;

pub mod buffers;
pub mod frame;
pub mod headless;
pub mod shaders;
pub mod texture;

pub use frame::{DrawUniforms, FrameUniforms, UniformBlock};
pub use headless::{FixedStepScheduler, HeadlessDevice};
pub use shaders::ShaderSources;

/// 统一的渲染设备接口
///
/// 资源类型由具体设备决定，`Viewer` 只持有它们并在绘制时交还给设备。
pub trait RenderDevice {
    type Program;
    type Buffers;
    type Texture;

    /// 编译并链接着色器程序
    fn build_program(&mut self, sources: &ShaderSources) -> Result<Self::Program>;

    /// 为一个网格实例创建顶点缓冲
    fn create_buffers(&mut self, mesh: &MeshArrays) -> Result<Self::Buffers>;

    fn load_texture(&mut self, path: &Path) -> Result<Self::Texture>;

    /// 视口宽高比
    fn aspect_ratio(&self) -> f32;

    /// 每帧第一次绘制前调用
    fn begin_frame(&mut self) {}

    fn draw(
        &mut self,
        program: &Self::Program,
        buffers: &Self::Buffers,
        texture: &Self::Texture,
        uniforms: &DrawUniforms,
    ) -> Result<()>;
}

/// 帧调度
pub trait FrameScheduler {
    /// 下一帧的时间（距开始的秒数），`None` 表示结束
    fn next_frame(&mut self) -> Option<f32>;
}

/// 双立方体查看器
pub struct Viewer<D: RenderDevice> {
    device: D,
    scene: SceneConfig,
    program: D::Program,
    /// 与 `scene.instances` 一一对应
    instances: Vec<D::Buffers>,
    texture: D::Texture,
    frames: usize,
}

impl<D: RenderDevice> Viewer<D> {
    /// 创建设备资源
    ///
    /// 着色器程序和纹理各创建一次，顶点缓冲每个实例创建一次。
    pub fn new(mut device: D, mesh: &MeshArrays, scene: SceneConfig) -> Result<Self> {
        scene.validate()?;

        let program = device.build_program(&ShaderSources::mesh())?;
        let instances = scene
            .instances
            .iter()
            .map(|instance| {
                debug!(instance = %instance.name, "Creating instance buffers");
                device.create_buffers(mesh)
            })
            .collect::<Result<Vec<_>>>()?;
        let texture = device.load_texture(Path::new(&scene.texture.path))?;

        info!(
            instances = instances.len(),
            vertices = mesh.vertex_count(),
            "Viewer initialized"
        );

        Ok(Self {
            device,
            scene,
            program,
            instances,
            texture,
            frames: 0,
        })
    }

    /// 渲染一帧，每个实例一次绘制调用
    pub fn render_frame(&mut self, time: f32) -> Result<()> {
        let frame = FrameUniforms::compute(&self.scene, self.device.aspect_ratio(), time);

        self.device.begin_frame();
        for (buffers, uniforms) in self.instances.iter().zip(&frame.instances) {
            self.device.draw(&self.program, buffers, &self.texture, uniforms)?;
        }

        self.frames += 1;
        Ok(())
    }

    /// 按调度器渲染直到结束，返回本次渲染的帧数
    pub fn run<S: FrameScheduler>(&mut self, scheduler: &mut S) -> Result<usize> {
        let start = self.frames;
        while let Some(time) = scheduler.next_frame() {
            self.render_frame(time)?;
        }
        Ok(self.frames - start)
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn scene(&self) -> &SceneConfig {
        &self.scene
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames
    }

    pub fn into_device(self) -> D {
        self.device
    }
}
