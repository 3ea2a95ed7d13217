/// 模型加载器模块
///
/// 提供统一的模型加载接口和各种格式的具体实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（仅 `v`/`vt`/`vn`/`f`）
///
/// # 使用示例
///
/// ```rust,no_run
/// use obj_scene::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh = ObjLoader::default().load_from_file(Path::new("model.obj"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshArrays;
use crate::geometry::obj::ParseOptions;
use std::path::Path;

pub mod obj_loader;

// 重新导出加载器
pub use obj_loader::ObjLoader;

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 返回 CPU 侧的 `MeshArrays`，不涉及 GPU 资源
/// - 正确处理错误情况并返回有意义的错误信息
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 文件格式错误或损坏
    /// - 数据验证失败
    fn load_from_file(&self, path: &Path) -> Result<MeshArrays>;

    /// 从内存数据加载网格
    ///
    /// # 参数
    ///
    /// - `data`: 文件内容的字节数组
    fn load_from_memory(&self, data: &[u8]) -> Result<MeshArrays>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions(&self) -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
///
/// # 示例
///
/// ```rust,no_run
/// use obj_scene::geometry::loaders::load_mesh;
/// use obj_scene::geometry::obj::ParseOptions;
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"), ParseOptions::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_mesh(path: &Path, options: ParseOptions) -> Result<MeshArrays> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| MeshLoadError::UnsupportedFormat("无法确定文件扩展名".to_string()))?;

    let loader = ObjLoader::new(options);
    if loader.supported_extensions().contains(&extension.as_str()) {
        loader.load_from_file(path)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!("不支持的文件格式: .{}", extension)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SceneError;

    #[test]
    fn test_supported_extensions() {
        let obj_exts = ObjLoader::default().supported_extensions();
        assert!(obj_exts.contains(&"obj"));
    }

    #[test]
    fn test_load_mesh_rejects_unknown_extension() {
        let result = load_mesh(Path::new("model.fbx"), ParseOptions::default());
        assert!(matches!(
            result,
            Err(SceneError::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_load_mesh_without_extension() {
        let result = load_mesh(Path::new("model"), ParseOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_mesh_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TRI.OBJ");
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mesh = load_mesh(&path, ParseOptions::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }
}
