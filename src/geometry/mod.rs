/// 几何体加载和处理模块
///
/// 包含 OBJ 解析器、顶点定义、扁平网格数据以及文件加载器。
///
/// # 模块结构
///
/// - `obj`: Wavefront OBJ 解析器（分行、指令分派、扇形三角化与索引解析）
/// - `vertex`: 交错顶点结构
/// - `mesh`: 扁平的顶点属性数组
/// - `loaders`: 从文件或内存加载网格
///
/// # 架构设计
///
/// ```text
/// OBJ 文本
///     ↓
/// obj::parse（属性表 + 面展开）
///     ↓
/// MeshArrays (CPU侧数据)
///     ↓
/// RenderDevice (创建顶点缓冲)
/// ```

pub mod vertex;
pub mod mesh;
pub mod obj;
pub mod loaders;

// 重新导出常用类型
pub use vertex::Vertex;
pub use mesh::MeshArrays;
pub use loaders::{load_mesh, MeshLoader, ObjLoader};
