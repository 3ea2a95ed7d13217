//! Wavefront OBJ 解析器
//!
//! 把 OBJ 文本转换为可以直接上传为顶点缓冲的三条扁平数组
//! （位置、纹理坐标、法线）。
//!
//! # 处理流程
//!
//! ```text
//! OBJ 文本
//!     ↓
//! tokenizer（有效行）
//!     ↓
//! directive（v / vt / vn 写入属性表）
//!     ↓
//! face（扇形三角化 + 下标解析）
//!     ↓
//! MeshArrays
//! ```
//!
//! 每次调用都创建新的属性表和输出流，调用之间不共享任何状态。
//!
//! # 使用示例
//!
//! ```rust
//! use obj_scene::geometry::obj;
//!
//! let mesh = obj::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3")?;
//! assert_eq!(mesh.vertex_count(), 3);
//! # Ok::<(), obj_scene::geometry::obj::ObjError>(())
//! ```
use serde::{Deserialize, Serialize};

use crate::geometry::mesh::MeshArrays;

pub mod directive;
pub mod error;
pub mod face;
pub mod tokenizer;

pub use directive::{AttributeTable, Directive};
pub use error::{AttributeKind, ObjError, ObjErrorKind};
pub use tokenizer::{lines, SourceLine};

use face::Tables;

/// `v`/`vt`/`vn` 参数无法解析为浮点数时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberPolicy {
    /// 写入 NaN 并继续
    #[default]
    Lenient,
    /// 报告 `MalformedNumber`
    Strict,
}

/// 面解析失败时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// 返回第一个错误
    #[default]
    FailFast,
    /// 记录警告并跳过出错的面
    ///
    /// 只作用于面；严格模式下的数值错误仍然立即返回，
    /// 否则后续的下标会整体错位。
    SkipFace,
}

/// 解析选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub numbers: NumberPolicy,
    #[serde(default)]
    pub recovery: Recovery,
}

impl ParseOptions {
    /// 严格数值解析 + 遇错即停
    pub fn strict() -> Self {
        Self {
            numbers: NumberPolicy::Strict,
            recovery: Recovery::FailFast,
        }
    }

    /// 宽松数值解析 + 跳过出错的面
    pub fn resilient() -> Self {
        Self {
            numbers: NumberPolicy::Lenient,
            recovery: Recovery::SkipFace,
        }
    }
}

/// 解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    /// 输出流
    pub mesh: MeshArrays,
    /// 被跳过的面（仅 `Recovery::SkipFace`）
    pub skipped: Vec<ObjError>,
}

/// 使用默认选项解析（宽松数值、遇错即停）
pub fn parse(input: &str) -> Result<MeshArrays, ObjError> {
    parse_with(input, ParseOptions::default()).map(|report| report.mesh)
}

/// 按指定选项解析
pub fn parse_with(input: &str, options: ParseOptions) -> Result<ParseReport, ObjError> {
    let mut parser = Parser::new(options);
    for line in lines(input) {
        parser.feed(line)?;
    }
    Ok(parser.finish())
}

struct Parser {
    options: ParseOptions,
    tables: Tables,
    mesh: MeshArrays,
    skipped: Vec<ObjError>,
    lines: usize,
    triangles: usize,
    ignored: usize,
}

impl Parser {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            tables: Tables::new(),
            mesh: MeshArrays::default(),
            skipped: Vec::new(),
            lines: 0,
            triangles: 0,
            ignored: 0,
        }
    }

    fn feed(&mut self, line: SourceLine<'_>) -> Result<(), ObjError> {
        self.lines += 1;
        let numbers = self.options.numbers;
        let result = match Directive::parse(line.text) {
            Directive::Position(args) => self.tables.positions.push_parsed(args, numbers),
            Directive::TexCoord(args) => self.tables.texcoords.push_parsed(args, numbers),
            Directive::Normal(args) => self.tables.normals.push_parsed(args, numbers),
            Directive::Face(args) => match face::expand_face(args, &self.tables, &mut self.mesh) {
                Ok(triangles) => {
                    self.triangles += triangles;
                    Ok(())
                }
                Err(kind) if self.options.recovery == Recovery::SkipFace => {
                    let error = ObjError::new(line.number, line.text, kind);
                    tracing::warn!(line = line.number, "Skipping face: {}", error.kind);
                    self.skipped.push(error);
                    Ok(())
                }
                Err(kind) => Err(kind),
            },
            Directive::Ignored(keyword) => {
                tracing::trace!(line = line.number, keyword, "Ignoring unsupported directive");
                self.ignored += 1;
                Ok(())
            }
        };

        result.map_err(|kind| ObjError::new(line.number, line.text, kind))
    }

    fn finish(self) -> ParseReport {
        tracing::debug!(
            lines = self.lines,
            positions = self.tables.positions.available(),
            texcoords = self.tables.texcoords.available(),
            normals = self.tables.normals.available(),
            triangles = self.triangles,
            ignored = self.ignored,
            skipped = self.skipped.len(),
            "OBJ parse complete"
        );

        ParseReport {
            mesh: self.mesh,
            skipped: self.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

    #[test]
    fn test_single_triangle() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();

        assert_eq!(mesh.position, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert!(mesh.texcoord.is_empty());
        assert!(mesh.normal.is_empty());
    }

    #[test]
    fn test_quad_becomes_two_triangles() {
        let mesh = parse(QUAD).unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        let expected = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4").unwrap();
        assert_eq!(mesh, expected);
    }

    #[test]
    fn test_negative_indices_match_absolute() {
        let relative = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1").unwrap();
        let absolute = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();
        assert_eq!(relative, absolute);
    }

    #[test]
    fn test_negative_index_uses_length_at_face_line() {
        let input = "v 1 1 1\nf -1 -1 -1\nv 2 2 2\nf -1 -1 -1\n";
        let mesh = parse(input).unwrap();

        assert_eq!(
            mesh.position,
            vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0]
        );
    }

    #[test]
    fn test_missing_texcoords() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = parse(input).unwrap();

        assert_eq!(mesh.position.len(), 9);
        assert_eq!(mesh.normal, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert!(mesh.texcoord.is_empty());
    }

    #[test]
    fn test_full_references() {
        let input = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
";
        let mesh = parse(input).unwrap();

        assert_eq!(mesh.texcoord, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(mesh.normal.len(), 9);
    }

    #[test]
    fn test_comments_and_blank_lines_do_not_change_output() {
        let noisy = "# cube\n\n  v 0 0 0\n# comment\nv 1 0 0\n\n\nv 0 1 0   \n   # trailing\nf 1 2 3\n\n";
        let clean = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3";
        assert_eq!(parse(noisy).unwrap(), parse(clean).unwrap());
    }

    #[test]
    fn test_unsupported_directives_are_ignored() {
        let input = "mtllib cube.mtl\no cube\ng side\nusemtl wood\ns off\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse(input).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_zero_index_is_rejected() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2").unwrap_err();

        assert_eq!(err.line, 4);
        assert_eq!(err.text, "f 0 1 2");
        assert!(matches!(
            err.kind,
            ObjErrorKind::MalformedIndex { attribute: AttributeKind::Position, .. }
        ));
    }

    #[test]
    fn test_out_of_range_index() {
        let err = parse("v 0 0 0\n\n# gap\nf 1 2 3").unwrap_err();

        assert_eq!(err.line, 4);
        assert_eq!(
            err.kind,
            ObjErrorKind::MalformedIndex {
                token: "2".to_string(),
                attribute: AttributeKind::Position,
                available: 1,
            }
        );
    }

    #[test]
    fn test_degenerate_face() {
        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2").unwrap_err();
        assert_eq!(err.kind, ObjErrorKind::DegenerateFace { references: 2 });
        assert_eq!(err.to_string(), "line 3: face has 2 vertex references, at least 3 required (`f 1 2`)");
    }

    #[test]
    fn test_lenient_numbers_produce_nan() {
        let mesh = parse("v 0 0 oops\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();
        assert!(mesh.position[2].is_nan());
        assert_eq!(mesh.position[3], 1.0);
    }

    #[test]
    fn test_strict_numbers_fail() {
        let err = parse_with("v 0 0 0\nvt 0.5 half\n", ParseOptions::strict()).unwrap_err();

        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ObjErrorKind::MalformedNumber { token: "half".to_string() });
    }

    #[test]
    fn test_strict_rejects_trailing_garbage_component() {
        let input = "v 0 0 0\n# extra\nv 1 2 3 oops\nv 1 1 1\nf 1 2 3\n";
        let err = parse_with(input, ParseOptions::strict()).unwrap_err();

        assert_eq!(err.line, 3);
        assert_eq!(err.text, "v 1 2 3 oops");
        assert_eq!(err.kind, ObjErrorKind::MalformedNumber { token: "oops".to_string() });
    }

    #[test]
    fn test_lenient_reads_number_prefix() {
        let mesh = parse("v 1.5abc 0.5, 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();
        assert_eq!(&mesh.position[..3], &[1.5, 0.5, 0.0]);
    }

    #[test]
    fn test_skip_face_recovery() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 7\nf 1 2\nf 1 2 3\n";
        let report = parse_with(input, ParseOptions::resilient()).unwrap();

        assert_eq!(report.mesh.vertex_count(), 3);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line, 4);
        assert_eq!(report.skipped[1].kind, ObjErrorKind::DegenerateFace { references: 2 });
    }

    #[test]
    fn test_skip_face_does_not_swallow_number_errors() {
        let options = ParseOptions {
            numbers: NumberPolicy::Strict,
            recovery: Recovery::SkipFace,
        };
        let err = parse_with("v 0 x 0\n", options).unwrap_err();
        assert!(matches!(err.kind, ObjErrorKind::MalformedNumber { .. }));
    }

    #[test]
    fn test_fail_fast_reports_first_error() {
        let err = parse("v 0 0 0\nf 1 1\nf 9 9 9\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_empty_document() {
        let mesh = parse("").unwrap();
        assert_eq!(mesh, MeshArrays::default());
    }
}
