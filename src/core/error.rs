//! 错误处理模块
//!
//! 定义了库中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 按类别拆分错误（配置、网格加载、纹理、图形）
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;
use std::path::PathBuf;

use crate::geometry::obj::ObjError;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, SceneError>;

/// 库的顶层错误类型
#[derive(Debug)]
pub enum SceneError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// 纹理加载错误
    Texture(TextureError),

    /// 渲染设备错误
    Graphics(GraphicsError),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 文件不存在
    FileNotFound(PathBuf),

    /// 不支持的文件格式
    UnsupportedFormat(String),

    /// 文件内容不是合法的 UTF-8
    Encoding(String),

    /// OBJ 解析失败（带行号）
    Parse(ObjError),

    /// 数据验证失败
    ValidationError(String),
}

/// 纹理相关的错误
#[derive(Debug)]
pub enum TextureError {
    /// 图片文件不存在
    FileNotFound(PathBuf),

    /// 图片解码失败
    Decode(String),
}

/// 渲染设备相关的错误
#[derive(Debug)]
pub enum GraphicsError {
    /// 着色器编译失败
    ShaderCompilation(String),

    /// 资源创建失败
    ResourceCreation(String),

    /// 绘制命令执行失败
    CommandExecution(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Config(e) => write!(f, "Configuration error: {}", e),
            SceneError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            SceneError::Texture(e) => write!(f, "Texture error: {}", e),
            SceneError::Graphics(e) => write!(f, "Graphics error: {}", e),
            SceneError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::FileNotFound(path) => write!(f, "Mesh file not found: {}", path.display()),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
            MeshLoadError::Encoding(msg) => write!(f, "Mesh is not valid UTF-8: {}", msg),
            MeshLoadError::Parse(e) => write!(f, "Failed to parse mesh: {}", e),
            MeshLoadError::ValidationError(msg) => write!(f, "Mesh validation failed: {}", msg),
        }
    }
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::FileNotFound(path) => write!(f, "Texture not found: {}", path.display()),
            TextureError::Decode(msg) => write!(f, "Failed to decode texture: {}", msg),
        }
    }
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicsError::ShaderCompilation(msg) => write!(f, "Shader compilation failed: {}", msg),
            GraphicsError::ResourceCreation(msg) => write!(f, "Resource creation failed: {}", msg),
            GraphicsError::CommandExecution(msg) => write!(f, "Command execution failed: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::MeshLoading(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for MeshLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshLoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for TextureError {}
impl std::error::Error for GraphicsError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for SceneError {
    fn from(err: std::io::Error) -> Self {
        SceneError::Io(err)
    }
}

impl From<ConfigError> for SceneError {
    fn from(err: ConfigError) -> Self {
        SceneError::Config(err)
    }
}

impl From<MeshLoadError> for SceneError {
    fn from(err: MeshLoadError) -> Self {
        SceneError::MeshLoading(err)
    }
}

impl From<TextureError> for SceneError {
    fn from(err: TextureError) -> Self {
        SceneError::Texture(err)
    }
}

impl From<GraphicsError> for SceneError {
    fn from(err: GraphicsError) -> Self {
        SceneError::Graphics(err)
    }
}

impl From<ObjError> for MeshLoadError {
    fn from(err: ObjError) -> Self {
        MeshLoadError::Parse(err)
    }
}

impl From<ObjError> for SceneError {
    fn from(err: ObjError) -> Self {
        SceneError::MeshLoading(MeshLoadError::Parse(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::obj;
    use std::error::Error;

    #[test]
    fn test_parse_error_keeps_source_chain() {
        let obj_error = obj::parse("f 1 2").unwrap_err();
        let err: SceneError = obj_error.into();

        assert!(err.to_string().starts_with("Mesh loading error: Failed to parse mesh: line 1"));

        let mesh_error = err.source().expect("mesh loading error has a source");
        let parse_error = mesh_error.source().expect("parse error is chained");
        assert!(parse_error.to_string().contains("`f 1 2`"));
    }

    #[test]
    fn test_config_error_display() {
        let err: SceneError = ConfigError::InvalidValue {
            field: "window.width".to_string(),
            reason: "must be greater than 0".to_string(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for 'window.width': must be greater than 0"
        );
    }
}
