//! 面的三角化与顶点引用解析
//!
//! `k` 个顶点引用的面以第 0 个引用为锚点做扇形三角化，得到 `k - 2` 个三角形：
//! 第 `i` 个三角形依次由引用 `0`、`i + 1`、`i + 2` 组成。输出顺序决定绕序，
//! 必须严格保持。

use super::directive::AttributeTable;
use super::error::ObjErrorKind;
use crate::geometry::mesh::MeshArrays;

/// 三张属性表
#[derive(Debug, Clone)]
pub struct Tables {
    pub positions: AttributeTable<3>,
    pub texcoords: AttributeTable<2>,
    pub normals: AttributeTable<3>,
}

impl Tables {
    pub fn new() -> Self {
        use super::error::AttributeKind;

        Self {
            positions: AttributeTable::new(AttributeKind::Position),
            texcoords: AttributeTable::new(AttributeKind::TexCoord),
            normals: AttributeTable::new(AttributeKind::Normal),
        }
    }

    /// 把一个已解析的引用追加到输出流
    fn emit(&self, vertex: ResolvedRef, mesh: &mut MeshArrays) {
        if let Some(i) = vertex.position {
            mesh.position.extend_from_slice(self.positions.entry(i));
        }
        if let Some(i) = vertex.texcoord {
            mesh.texcoord.extend_from_slice(self.texcoords.entry(i));
        }
        if let Some(i) = vertex.normal {
            mesh.normal.extend_from_slice(self.normals.entry(i));
        }
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

/// 已解析为表下标的顶点引用
///
/// 空的子项为 `None`，输出时对应的流不追加任何数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRef {
    pub position: Option<usize>,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// 解析 `p[/t][/n]`
///
/// 最多拆成 3 段，第三段中再出现的 `/` 会让该段无法解析为整数。
pub fn resolve_ref(token: &str, tables: &Tables) -> Result<ResolvedRef, ObjErrorKind> {
    let mut parts = token.splitn(3, '/');
    Ok(ResolvedRef {
        position: resolve_component(parts.next(), &tables.positions)?,
        texcoord: resolve_component(parts.next(), &tables.texcoords)?,
        normal: resolve_component(parts.next(), &tables.normals)?,
    })
}

fn resolve_component<const N: usize>(
    part: Option<&str>,
    table: &AttributeTable<N>,
) -> Result<Option<usize>, ObjErrorKind> {
    let token = match part {
        None | Some("") => return Ok(None),
        Some(token) => token,
    };

    token
        .parse::<i64>()
        .ok()
        .and_then(|raw| table.resolve(raw))
        .map(Some)
        .ok_or_else(|| ObjErrorKind::MalformedIndex {
            token: token.to_string(),
            attribute: table.kind(),
            available: table.available(),
        })
}

/// 展开一个面并写入输出流，返回生成的三角形数
///
/// 先解析全部引用，全部成功后才写入，失败的面不会留下任何顶点。
pub fn expand_face<'a, I>(
    references: I,
    tables: &Tables,
    mesh: &mut MeshArrays,
) -> Result<usize, ObjErrorKind>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<&str> = references.into_iter().collect();
    if tokens.len() < 3 {
        return Err(ObjErrorKind::DegenerateFace {
            references: tokens.len(),
        });
    }

    let resolved = tokens
        .iter()
        .map(|token| resolve_ref(token, tables))
        .collect::<Result<Vec<_>, _>>()?;

    let triangles = resolved.len() - 2;
    for tri in 0..triangles {
        tables.emit(resolved[0], mesh);
        tables.emit(resolved[tri + 1], mesh);
        tables.emit(resolved[tri + 2], mesh);
    }

    Ok(triangles)
}
