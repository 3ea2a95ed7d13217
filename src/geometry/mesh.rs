/// 网格数据结构模块
///
/// 定义CPU侧的扁平顶点属性数组，即 OBJ 解析器的输出。
/// 每个发出的顶点在每条流中占一段，流之间按顶点对齐。

use super::vertex::Vertex;

/// 位置分量数
pub const POSITION_COMPONENTS: usize = 3;
/// 纹理坐标分量数
pub const TEXCOORD_COMPONENTS: usize = 2;
/// 法线分量数
pub const NORMAL_COMPONENTS: usize = 3;

/// 扁平的顶点属性数组
///
/// 三条流可以直接作为紧密排列的定长顶点属性上传：
///
/// - `position`: 每顶点 3 个分量
/// - `texcoord`: 每顶点 2 个分量；源文件未提供时可能比位置流短或为空
/// - `normal`: 每顶点 3 个分量；同上
///
/// 没有索引缓冲，按三角形顺序逐顶点展开。
///
/// # 示例
///
/// ```rust
/// use obj_scene::geometry::mesh::MeshArrays;
///
/// let mesh = MeshArrays {
///     position: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     texcoord: vec![],
///     normal: vec![],
/// };
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshArrays {
    /// 顶点位置流
    pub position: Vec<f32>,

    /// 纹理坐标流
    pub texcoord: Vec<f32>,

    /// 法线流
    pub normal: Vec<f32>,
}

impl MeshArrays {
    /// 获取顶点数量（以位置流为准）
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.position.len() / POSITION_COMPONENTS
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// 纹理坐标流中的顶点数
    #[inline]
    pub fn texcoord_count(&self) -> usize {
        self.texcoord.len() / TEXCOORD_COMPONENTS
    }

    /// 法线流中的顶点数
    #[inline]
    pub fn normal_count(&self) -> usize {
        self.normal.len() / NORMAL_COMPONENTS
    }

    #[inline]
    pub fn has_texcoords(&self) -> bool {
        !self.texcoord.is_empty()
    }

    #[inline]
    pub fn has_normals(&self) -> bool {
        !self.normal.is_empty()
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 每条流的长度是其分量数的倍数
    /// - 顶点数是3的倍数（每个三角形3个顶点）
    /// - 纹理坐标和法线流不比位置流长
    ///
    /// # 返回
    ///
    /// - `Ok(())`: 数据有效
    /// - `Err(String)`: 数据无效，返回错误描述
    pub fn validate(&self) -> Result<(), String> {
        let streams = [
            ("position", self.position.len(), POSITION_COMPONENTS),
            ("texcoord", self.texcoord.len(), TEXCOORD_COMPONENTS),
            ("normal", self.normal.len(), NORMAL_COMPONENTS),
        ];
        for (name, len, components) in streams {
            if len % components != 0 {
                return Err(format!(
                    "{} 流长度 {} 不是 {} 的倍数",
                    name, len, components
                ));
            }
        }

        let vertex_count = self.vertex_count();
        if vertex_count % 3 != 0 {
            return Err(format!("顶点数量必须是3的倍数，当前为: {}", vertex_count));
        }

        if self.texcoord_count() > vertex_count {
            return Err(format!(
                "纹理坐标数量 {} 超过顶点数量 {}",
                self.texcoord_count(),
                vertex_count
            ));
        }
        if self.normal_count() > vertex_count {
            return Err(format!(
                "法线数量 {} 超过顶点数量 {}",
                self.normal_count(),
                vertex_count
            ));
        }

        Ok(())
    }

    /// 交错为 GPU 顶点
    ///
    /// 某条流不足时，该顶点对应的属性填零。
    pub fn to_vertices(&self) -> Vec<Vertex> {
        (0..self.vertex_count())
            .map(|i| {
                let position = component::<3>(&self.position, i).unwrap_or_default();
                let normal = component::<3>(&self.normal, i).unwrap_or_default();
                let texcoord = component::<2>(&self.texcoord, i).unwrap_or_default();
                Vertex::new(position, normal, texcoord)
            })
            .collect()
    }

    /// 清空所有数据
    pub fn clear(&mut self) {
        self.position.clear();
        self.texcoord.clear();
        self.normal.clear();
    }
}

fn component<const N: usize>(stream: &[f32], vertex: usize) -> Option<[f32; N]> {
    let start = vertex * N;
    stream
        .get(start..start + N)
        .and_then(|slice| slice.try_into().ok())
}
