//! OBJ 解析错误
//!
//! 每个错误都带有出错的行号（从 1 开始）和去掉首尾空白后的原始行文本。

use std::fmt;

/// 属性表的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// 顶点位置（`v`）
    Position,
    /// 纹理坐标（`vt`）
    TexCoord,
    /// 顶点法线（`vn`）
    Normal,
}

impl AttributeKind {
    /// 属性名称，与输出流的字段名一致
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "texcoord",
            AttributeKind::Normal => "normal",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 错误的具体类别
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjErrorKind {
    /// `v`/`vn`/`vt` 的参数不是浮点数（仅严格模式）
    ///
    /// `token` 为空表示参数个数不足。
    MalformedNumber { token: String },

    /// 顶点引用的某一项不是整数，或解析后越界
    MalformedIndex {
        token: String,
        attribute: AttributeKind,
        /// 解析时该表中的有效条目数（不含占位项）
        available: usize,
    },

    /// `f` 行的顶点引用少于 3 个
    DegenerateFace { references: usize },
}

impl fmt::Display for ObjErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjErrorKind::MalformedNumber { token } if token.is_empty() => {
                write!(f, "missing numeric value")
            }
            ObjErrorKind::MalformedNumber { token } => write!(f, "malformed number '{}'", token),
            ObjErrorKind::MalformedIndex { token, attribute, available } => write!(
                f,
                "invalid {} index '{}' ({} available)",
                attribute, token, available
            ),
            ObjErrorKind::DegenerateFace { references } => write!(
                f,
                "face has {} vertex references, at least 3 required",
                references
            ),
        }
    }
}

/// 带位置信息的 OBJ 解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjError {
    /// 出错的行号（从 1 开始，包含被跳过的空行与注释行）
    pub line: usize,
    /// 出错行的文本（已去掉首尾空白）
    pub text: String,
    /// 错误类别
    pub kind: ObjErrorKind,
}

impl ObjError {
    pub(crate) fn new(line: usize, text: &str, kind: ObjErrorKind) -> Self {
        Self {
            line,
            text: text.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} (`{}`)", self.line, self.kind, self.text)
    }
}

impl std::error::Error for ObjError {}
