//! obj_scene - OBJ 网格解析与双立方体场景
//!
//! 把 Wavefront OBJ 文本解析为可直接上传的扁平顶点属性数组，
//! 再交给渲染设备绘制两个各自旋转的带纹理立方体。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、场景、错误处理）
//! - `geometry`: 几何体模块（OBJ 解析器、顶点、网格、加载器）
//! - `renderer`: 渲染器模块（设备接口、着色器、帧 uniform、无窗口实现）
//!
//! # 使用示例
//!
//! ```
//! use obj_scene::geometry::obj;
//!
//! let mesh = obj::parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4").unwrap();
//!
//! // 四边形按扇形拆成两个三角形
//! assert_eq!(mesh.triangle_count(), 2);
//! assert_eq!(&mesh.position[9..12], &[0.0, 0.0, 0.0]);
//! assert!(mesh.texcoord.is_empty());
//! ```

pub mod core;
pub mod geometry;
pub mod renderer;
