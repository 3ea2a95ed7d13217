//! 核心功能模块
//!
//! 提供与具体渲染设备无关的基础功能：数学类型、日志系统、配置管理、场景描述和错误处理。
//!
//! # 模块组织
//!
//! - `math`：基于 nalgebra 的 `f32` 类型别名和辅助函数
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：运行配置，支持配置文件和命令行参数
//! - `scene`：场景配置（相机、光照、纹理、实例）
//! - `error`：错误处理，定义统一的错误类型

pub mod math;
pub mod log;
pub mod config;
pub mod scene;
pub mod error;

// 重新导出常用类型，方便使用
pub use config::Config;
pub use error::{Result, SceneError};
pub use scene::SceneConfig;
