//! 配置管理模块
//!
//! 提供运行配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//! title = "obj_scene"
//!
//! [mesh]
//! path = "assets/cube.obj"
//! numbers = "lenient"     # 或 "strict"
//! recovery = "fail_fast"  # 或 "skip_face"
//!
//! [run]
//! frames = 120
//! frame_rate = 60.0
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::geometry::obj::{NumberPolicy, ParseOptions, Recovery};

/// 运行配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 窗口（视口）配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 网格配置
    #[serde(default)]
    pub mesh: MeshConfig,

    /// 帧循环配置
    #[serde(default)]
    pub run: RunConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
///
/// 无窗口运行时只用来计算宽高比。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_title")]
    pub title: String,
}

/// 网格配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// OBJ 文件路径
    #[serde(default = "default_mesh_path")]
    pub path: String,

    /// 数值解析策略
    #[serde(default)]
    pub numbers: NumberPolicy,

    /// 面错误处理策略
    #[serde(default)]
    pub recovery: Recovery,
}

/// 帧循环配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// 渲染的帧数
    #[serde(default = "default_frames")]
    pub frames: u32,

    /// 固定帧率（用于推算每帧时间）
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_title() -> String { "obj_scene".to_string() }
fn default_mesh_path() -> String { "assets/cube.obj".to_string() }
fn default_frames() -> u32 { 120 }
fn default_frame_rate() -> f32 { 60.0 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "obj_scene.log".to_string() }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            path: default_mesh_path(),
            numbers: NumberPolicy::default(),
            recovery: Recovery::default(),
        }
    }
}

impl MeshConfig {
    /// 转换为解析选项
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            numbers: self.numbers,
            recovery: self.recovery,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl WindowConfig {
    /// 宽高比
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use obj_scene::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), obj_scene::core::SceneError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--strict`: 严格数值解析
    /// - `--skip-bad-faces`: 跳过出错的面
    /// - `--mesh <path>`: OBJ 文件路径
    /// - `--frames <value>`: 渲染帧数
    /// - `--width <value>` / `--height <value>`: 视口尺寸
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--strict") {
            self.mesh.numbers = NumberPolicy::Strict;
        }

        if args.iter().any(|a| a == "--skip-bad-faces") {
            self.mesh.recovery = Recovery::SkipFace;
        }

        if let Some(path) = value_of(&args, "--mesh") {
            self.mesh.path = path.to_string();
        }

        if let Some(frames) = value_of(&args, "--frames").and_then(|v| v.parse().ok()) {
            self.run.frames = frames;
        }

        if let Some(width) = value_of(&args, "--width").and_then(|v| v.parse().ok()) {
            self.window.width = width;
        }

        if let Some(height) = value_of(&args, "--height").and_then(|v| v.parse().ok()) {
            self.window.height = height;
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        if self.mesh.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "mesh.path".to_string(),
                reason: "Mesh path must not be empty".to_string(),
            }.into());
        }

        if !(self.run.frame_rate.is_finite() && self.run.frame_rate > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "run.frame_rate".to_string(),
                reason: "Frame rate must be a positive number".to_string(),
            }.into());
        }

        Ok(())
    }
}

fn value_of<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).map(String::as_str)
}
