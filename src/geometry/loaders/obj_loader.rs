/// OBJ 文件加载器
///
/// 使用 `geometry::obj` 解析器加载 Wavefront OBJ 格式的3D模型，
/// 输出扁平的顶点属性数组。
use super::MeshLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshArrays;
use crate::geometry::obj::{self, ParseOptions, Recovery};
use std::path::Path;

/// OBJ 格式加载器
///
/// 实现 `MeshLoader` trait，提供 OBJ 文件的加载功能。
///
/// # 特性
///
/// - 扇形三角化，保持原始绕序
/// - 支持负数（相对）下标
/// - 数值解析宽松/严格可选
/// - 可跳过出错的面
///
/// # 使用示例
///
/// ```rust,no_run
/// use obj_scene::geometry::loaders::{MeshLoader, ObjLoader};
/// use obj_scene::geometry::obj::ParseOptions;
/// use std::path::Path;
///
/// let mesh = ObjLoader::new(ParseOptions::strict()).load_from_file(Path::new("model.obj"))?;
/// println!("加载了 {} 个顶点", mesh.vertex_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader {
    options: ParseOptions,
}

impl ObjLoader {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// 从已读入的文本加载
    pub fn load_from_str(&self, text: &str) -> Result<MeshArrays> {
        let report = obj::parse_with(text, self.options).map_err(MeshLoadError::from)?;

        if !report.skipped.is_empty() {
            debug_assert_eq!(self.options.recovery, Recovery::SkipFace);
            tracing::warn!("OBJ 文件中有 {} 个面解析失败，已跳过", report.skipped.len());
        }

        let mesh = report.mesh;
        mesh.validate().map_err(MeshLoadError::ValidationError)?;

        if !mesh.has_normals() {
            tracing::warn!("OBJ 文件缺少法线数据");
        }
        if !mesh.has_texcoords() {
            tracing::warn!("OBJ 文件缺少UV坐标");
        }

        Ok(mesh)
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(&self, path: &Path) -> Result<MeshArrays> {
        // 检查文件是否存在
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let text = std::fs::read_to_string(path)?;
        let mesh = self.load_from_str(&text)?;

        tracing::info!(
            "成功加载 OBJ 文件 {}: {} 个顶点, {} 个三角形",
            path.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    fn load_from_memory(&self, data: &[u8]) -> Result<MeshArrays> {
        let text = std::str::from_utf8(data)
            .map_err(|e| MeshLoadError::Encoding(e.to_string()))?;
        self.load_from_str(text)
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["obj"]
    }
}
