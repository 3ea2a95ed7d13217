//! 顶点缓冲构建
//!
//! 把 `MeshArrays` 的每条流按 `a_<流名>` 的名字打包成独立的属性缓冲，
//! 字节内容就是紧密排列的 `f32`。

use bytemuck::cast_slice;
use tracing::{debug, warn};

use crate::geometry::mesh::{
    MeshArrays, NORMAL_COMPONENTS, POSITION_COMPONENTS, TEXCOORD_COMPONENTS,
};
use crate::geometry::obj::AttributeKind;

use super::shaders::attribute_name;

/// 单个顶点属性的缓冲
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    /// 着色器中的属性名
    pub name: String,
    /// 每顶点分量数
    pub components: usize,
    pub data: Vec<u8>,
}

impl AttributeBuffer {
    fn new(kind: AttributeKind, components: usize, stream: &[f32]) -> Self {
        Self {
            name: attribute_name(kind),
            components,
            data: cast_slice(stream).to_vec(),
        }
    }

    /// 缓冲中的顶点数
    pub fn vertex_count(&self) -> usize {
        self.data.len() / (self.components * std::mem::size_of::<f32>())
    }
}

/// 一个网格实例的全部属性缓冲
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BufferSet {
    pub attributes: Vec<AttributeBuffer>,
    pub vertex_count: usize,
}

impl BufferSet {
    /// 为网格的每条非空流创建缓冲
    ///
    /// 纹理坐标或法线流的顶点数与位置流不一致时，该流不绑定，
    /// 着色器读到的是属性默认值。
    pub fn from_mesh(mesh: &MeshArrays) -> Self {
        let vertex_count = mesh.vertex_count();
        let streams = [
            (AttributeKind::Position, POSITION_COMPONENTS, &mesh.position),
            (AttributeKind::TexCoord, TEXCOORD_COMPONENTS, &mesh.texcoord),
            (AttributeKind::Normal, NORMAL_COMPONENTS, &mesh.normal),
        ];

        let mut attributes = Vec::with_capacity(streams.len());
        for (kind, components, stream) in streams {
            if stream.is_empty() {
                continue;
            }
            let count = stream.len() / components;
            if count != vertex_count {
                warn!(
                    attribute = %kind,
                    count,
                    expected = vertex_count,
                    "Stream length does not match positions, attribute left unbound"
                );
                continue;
            }
            attributes.push(AttributeBuffer::new(kind, components, stream));
        }

        debug!(
            vertex_count,
            attributes = attributes.len(),
            "Vertex buffers created"
        );

        Self { attributes, vertex_count }
    }

    /// 按着色器属性名查找缓冲
    pub fn attribute(&self, name: &str) -> Option<&AttributeBuffer> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// 交错排列的顶点数据，布局同 `Vertex`
    pub fn interleaved(mesh: &MeshArrays) -> Vec<u8> {
        cast_slice(&mesh.to_vertices()).to_vec()
    }

    pub fn byte_size(&self) -> usize {
        self.attributes.iter().map(|a| a.data.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex::Vertex;

    fn triangle() -> MeshArrays {
        MeshArrays {
            position: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            texcoord: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            normal: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn test_all_streams_bound() {
        let buffers = BufferSet::from_mesh(&triangle());

        assert_eq!(buffers.vertex_count, 3);
        assert_eq!(buffers.attributes.len(), 3);

        let position = buffers.attribute("a_position").unwrap();
        assert_eq!(position.components, 3);
        assert_eq!(position.data.len(), 9 * 4);
        assert_eq!(position.vertex_count(), 3);

        let texcoord = buffers.attribute("a_texcoord").unwrap();
        assert_eq!(texcoord.data.len(), 6 * 4);
        assert_eq!(buffers.byte_size(), (9 + 6 + 9) * 4);
    }

    #[test]
    fn test_bytes_are_native_f32() {
        let buffers = BufferSet::from_mesh(&triangle());
        let position = buffers.attribute("a_position").unwrap();
        let floats: Vec<f32> = position
            .data
            .chunks_exact(4)
            .map(bytemuck::pod_read_unaligned::<f32>)
            .collect();
        assert_eq!(floats, triangle().position);
    }

    #[test]
    fn test_empty_streams_skipped() {
        let mut mesh = triangle();
        mesh.texcoord.clear();
        mesh.normal.clear();

        let buffers = BufferSet::from_mesh(&mesh);
        assert_eq!(buffers.attributes.len(), 1);
        assert!(buffers.attribute("a_normal").is_none());
    }

    #[test]
    fn test_short_stream_left_unbound() {
        let mut mesh = triangle();
        mesh.normal.truncate(3);

        let buffers = BufferSet::from_mesh(&mesh);
        assert!(buffers.attribute("a_normal").is_none());
        assert!(buffers.attribute("a_texcoord").is_some());
    }

    #[test]
    fn test_interleaved_layout() {
        let bytes = BufferSet::interleaved(&triangle());
        assert_eq!(bytes.len(), 3 * std::mem::size_of::<Vertex>());

        let stride = std::mem::size_of::<Vertex>();
        let second: Vertex = bytemuck::pod_read_unaligned(&bytes[stride..2 * stride]);
        let third: Vertex = bytemuck::pod_read_unaligned(&bytes[2 * stride..]);
        assert_eq!(second.position, [1.0, 0.0, 0.0]);
        assert_eq!(third.texcoord, [0.0, 1.0]);
    }
}
