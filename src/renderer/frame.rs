//! 每帧 uniform 计算
//!
//! 所有实例共享光照方向、视图矩阵和投影矩阵，每个实例有自己的模型矩阵和漫反射颜色。

use bytemuck::{Pod, Zeroable};

use crate::core::math::{Matrix4, Vector3};
use crate::core::scene::SceneConfig;

/// 所有实例共享的 uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedUniforms {
    /// 归一化的光照方向
    pub light_direction: Vector3,
    pub view: Matrix4,
    pub projection: Matrix4,
}

/// 一次绘制调用使用的 uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawUniforms {
    pub shared: SharedUniforms,
    pub world: Matrix4,
    pub diffuse: [f32; 4],
}

/// 一帧内所有实例的 uniform
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    /// 距离开始的时间（秒）
    pub time: f32,
    pub shared: SharedUniforms,
    /// 与 `SceneConfig::instances` 一一对应
    pub instances: Vec<DrawUniforms>,
}

impl FrameUniforms {
    pub fn compute(scene: &SceneConfig, aspect_ratio: f32, time: f32) -> Self {
        let shared = SharedUniforms {
            light_direction: scene.light.normalized(),
            view: scene.camera.view_matrix(),
            projection: scene.camera.projection_matrix(aspect_ratio),
        };

        let instances = scene
            .instances
            .iter()
            .map(|instance| DrawUniforms {
                shared,
                world: instance.world_matrix(time),
                diffuse: instance.diffuse,
            })
            .collect();

        Self { time, shared, instances }
    }
}

/// GPU uniform 块
///
/// 矩阵按列主序存放，`light_direction` 补齐到 16 字节。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub world: [[f32; 4]; 4],
    pub diffuse: [f32; 4],
    pub light_direction: [f32; 4],
}

impl From<&DrawUniforms> for UniformBlock {
    fn from(uniforms: &DrawUniforms) -> Self {
        let light = uniforms.shared.light_direction;
        Self {
            projection: uniforms.shared.projection.into(),
            view: uniforms.shared.view.into(),
            world: uniforms.world.into(),
            diffuse: uniforms.diffuse,
            light_direction: [light.x, light.y, light.z, 0.0],
        }
    }
}
