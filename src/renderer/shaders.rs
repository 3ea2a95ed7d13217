//! 着色器定义
//!
//! 网格渲染使用的 GLSL ES 3.00 着色器对，以文本形式交给渲染设备编译。
//!
//! # 输入
//!
//! - `a_position` / `a_normal` / `a_texcoord`：与 `MeshArrays` 的三条流一一对应，
//!   名称为 `a_` 前缀加流名
//!
//! # Uniform
//!
//! - `u_projection`、`u_view`、`u_world`：变换矩阵
//! - `u_diffuse`、`u_texture`、`u_lightDirection`：着色参数
//!
//! # 渲染管线
//!
//! ```text
//! 顶点数据 -> 顶点着色器 -> 图元装配 -> 光栅化 -> 片段着色器 -> 帧缓冲
//! ```

use crate::geometry::obj::AttributeKind;

/// 顶点属性名前缀
pub const ATTRIBUTE_PREFIX: &str = "a_";

/// 顶点属性在着色器中的名字
pub fn attribute_name(kind: AttributeKind) -> String {
    format!("{}{}", ATTRIBUTE_PREFIX, kind.name())
}

/// 顶点/片段着色器源码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// 带纹理和平行光的网格着色器
    pub fn mesh() -> Self {
        Self::new(include_str!("shaders/mesh.vert"), include_str!("shaders/mesh.frag"))
    }
}

/// 着色器中声明的 `in` 变量名
pub fn declared_inputs(source: &str) -> Vec<String> {
    declarations(source, "in")
}

/// 着色器中声明的 `uniform` 变量名
pub fn declared_uniforms(source: &str) -> Vec<String> {
    declarations(source, "uniform")
}

/// 只认 `<qualifier> <type> <name>;` 这种单行声明
fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let mut tokens = line.trim().trim_end_matches(';').split_whitespace();
            if tokens.next()? != qualifier {
                return None;
            }
            let _ty = tokens.next()?;
            let name = tokens.next()?;
            tokens.next().is_none().then(|| name.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_names_match_streams() {
        assert_eq!(attribute_name(AttributeKind::Position), "a_position");
        assert_eq!(attribute_name(AttributeKind::TexCoord), "a_texcoord");
        assert_eq!(attribute_name(AttributeKind::Normal), "a_normal");
    }

    #[test]
    fn test_mesh_shader_declares_every_attribute() {
        let sources = ShaderSources::mesh();
        let inputs = declared_inputs(&sources.vertex);

        for kind in [AttributeKind::Position, AttributeKind::TexCoord, AttributeKind::Normal] {
            assert!(inputs.contains(&attribute_name(kind)), "missing {}", kind);
        }
    }

    #[test]
    fn test_mesh_shader_uniforms() {
        let sources = ShaderSources::mesh();

        let vertex_uniforms = declared_uniforms(&sources.vertex);
        assert_eq!(vertex_uniforms, vec!["u_projection", "u_view", "u_world"]);

        let fragment_uniforms = declared_uniforms(&sources.fragment);
        assert_eq!(fragment_uniforms, vec!["u_diffuse", "u_texture", "u_lightDirection"]);
    }

    #[test]
    fn test_sources_have_version_header() {
        let sources = ShaderSources::mesh();
        assert!(sources.vertex.starts_with("#version 300 es"));
        assert!(sources.fragment.starts_with("#version 300 es"));
    }
}
