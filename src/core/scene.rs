//! 场景配置模块
//!
//! 定义场景配置：相机、光照、纹理，以及共享同一网格的多个实例。
//! 默认值复现两个立方体的演示场景：左边的绕 Y 轴旋转，右边的绕 X 轴旋转。

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::fs;
use crate::core::error::{Result, SceneError, ConfigError};
use crate::core::math::{constants::DEG_TO_RAD, normalize_or_zero, point3, vec3, Matrix4, Unit, Vector3};

/// 相机配置
///
/// 相机位于 `eye`，看向 `target`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_eye")]
    pub eye: [f32; 3],

    #[serde(default = "default_target")]
    pub target: [f32; 3],

    #[serde(default = "default_up")]
    pub up: [f32; 3],

    /// 垂直视野角度（度数）
    #[serde(default = "default_fov")]
    pub fov: f32,

    /// 近裁剪面距离
    #[serde(default = "default_near_clip")]
    pub near_clip: f32,

    /// 远裁剪面距离
    #[serde(default = "default_far_clip")]
    pub far_clip: f32,
}

fn default_eye() -> [f32; 3] { [0.0, 0.0, 6.0] }
fn default_target() -> [f32; 3] { [0.0, 0.0, 0.0] }
fn default_up() -> [f32; 3] { [0.0, 1.0, 0.0] }
fn default_fov() -> f32 { 60.0 }
fn default_near_clip() -> f32 { 0.1 }
fn default_far_clip() -> f32 { 50.0 }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: default_eye(),
            target: default_target(),
            up: default_up(),
            fov: default_fov(),
            near_clip: default_near_clip(),
            far_clip: default_far_clip(),
        }
    }
}

impl CameraConfig {
    /// 创建视图矩阵（相机矩阵的逆）
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::look_at_rh(&point3(self.eye), &point3(self.target), &vec3(self.up))
    }

    /// 创建透视投影矩阵
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Matrix4 {
        Matrix4::new_perspective(aspect_ratio, self.fov * DEG_TO_RAD, self.near_clip, self.far_clip)
    }
}

/// 平行光配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    /// 光照方向（不要求归一化）
    #[serde(default = "default_light_direction")]
    pub direction: [f32; 3],
}

fn default_light_direction() -> [f32; 3] { [-1.0, 3.0, 5.0] }

impl Default for LightConfig {
    fn default() -> Self {
        Self { direction: default_light_direction() }
    }
}

impl LightConfig {
    /// 归一化后的光照方向
    pub fn normalized(&self) -> Vector3 {
        normalize_or_zero(vec3(self.direction))
    }
}

/// 纹理配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    #[serde(default = "default_texture_path")]
    pub path: String,
}

fn default_texture_path() -> String { "texture/wood.png".to_string() }

impl Default for TextureConfig {
    fn default() -> Self {
        Self { path: default_texture_path() }
    }
}

/// 自转轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinAxis {
    X,
    Y,
    Z,
}

impl SpinAxis {
    pub fn unit(&self) -> Unit<Vector3> {
        match self {
            SpinAxis::X => Vector3::x_axis(),
            SpinAxis::Y => Vector3::y_axis(),
            SpinAxis::Z => Vector3::z_axis(),
        }
    }
}

/// 网格实例
///
/// 每个实例拥有自己的顶点缓冲，按 `translation` 平移后绕 `spin_axis` 自转。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    pub name: String,

    #[serde(default)]
    pub translation: [f32; 3],

    #[serde(default = "default_spin_axis")]
    pub spin_axis: SpinAxis,

    /// 角速度（弧度/秒）
    #[serde(default = "default_spin_speed")]
    pub spin_speed: f32,

    /// 漫反射颜色 (r, g, b, a)
    #[serde(default = "default_diffuse")]
    pub diffuse: [f32; 4],
}

fn default_spin_axis() -> SpinAxis { SpinAxis::Y }
fn default_spin_speed() -> f32 { 1.0 }
fn default_diffuse() -> [f32; 4] { [1.0, 0.7, 0.5, 1.0] }

fn default_instances() -> Vec<InstanceConfig> {
    vec![
        InstanceConfig {
            name: "left".to_string(),
            translation: [-3.0, 0.0, 0.0],
            spin_axis: SpinAxis::Y,
            spin_speed: default_spin_speed(),
            diffuse: default_diffuse(),
        },
        InstanceConfig {
            name: "right".to_string(),
            translation: [3.0, 0.0, 0.0],
            spin_axis: SpinAxis::X,
            spin_speed: default_spin_speed(),
            diffuse: default_diffuse(),
        },
    ]
}

impl InstanceConfig {
    /// 给定时间（秒）的模型矩阵
    ///
    /// 先旋转再平移：`T * R(axis, time * speed)`。
    pub fn world_matrix(&self, time: f32) -> Matrix4 {
        let translation = Matrix4::new_translation(&vec3(self.translation));
        let rotation = Matrix4::from_axis_angle(&self.spin_axis.unit(), time * self.spin_speed);
        translation * rotation
    }
}

/// 场景配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,

    #[serde(default)]
    pub light: LightConfig,

    #[serde(default)]
    pub texture: TextureConfig,

    #[serde(default = "default_instances")]
    pub instances: Vec<InstanceConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            texture: TextureConfig::default(),
            instances: default_instances(),
        }
    }
}

impl SceneConfig {
    /// 从文件加载场景配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SceneError::Config(ConfigError::FileNotFound(format!(
                "Failed to read scene config file '{}': {}",
                path.display(),
                e
            ))))?;

        toml::from_str(&contents)
            .map_err(|e| SceneError::Config(ConfigError::ParseError(format!(
                "Failed to parse scene config: {}",
                e
            ))))
    }

    /// 从文件加载，如果文件不存在或无法解析则返回默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.exists() {
            match Self::from_file(path) {
                Ok(config) => {
                    tracing::info!("Loaded scene config from: {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load scene config: {}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            tracing::info!("Scene config not found, using defaults");
            Self::default()
        }
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SceneError::Config(ConfigError::ParseError(format!(
                "Failed to serialize scene config: {}",
                e
            ))))?;

        fs::write(path, contents)?;

        tracing::info!("Saved scene config to: {}", path.display());
        Ok(())
    }

    /// 验证相机参数
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(ConfigError::InvalidValue {
                field: "camera.fov".to_string(),
                reason: "Field of view must be between 0 and 180 degrees".to_string(),
            }.into());
        }

        if !(camera.near_clip > 0.0 && camera.far_clip > camera.near_clip) {
            return Err(ConfigError::InvalidValue {
                field: "camera.near_clip/far_clip".to_string(),
                reason: "Clip planes must satisfy 0 < near < far".to_string(),
            }.into());
        }

        if camera.eye == camera.target {
            return Err(ConfigError::InvalidValue {
                field: "camera.eye".to_string(),
                reason: "Camera eye and target must differ".to_string(),
            }.into());
        }

        Ok(())
    }
}
