//! 指令分发与属性表
//!
//! 每行的第一个空白分隔的 token 是关键字，其余是参数。
//! 只识别 `v`、`vt`、`vn`、`f`，其它关键字（`g`、`usemtl`、`mtllib`、`s`、`o` 等）
//! 一律忽略。

use std::str::SplitWhitespace;

use super::error::{AttributeKind, ObjErrorKind};
use super::NumberPolicy;

/// 一行 OBJ 指令
#[derive(Debug, Clone)]
pub enum Directive<'a> {
    /// `v x y z`
    Position(SplitWhitespace<'a>),
    /// `vt u v`
    TexCoord(SplitWhitespace<'a>),
    /// `vn x y z`
    Normal(SplitWhitespace<'a>),
    /// `f v1 v2 v3 ...`
    Face(SplitWhitespace<'a>),
    /// 不支持的关键字
    Ignored(&'a str),
}

impl<'a> Directive<'a> {
    /// 拆出关键字并分类
    pub fn parse(line: &'a str) -> Self {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => Directive::Position(tokens),
            Some("vt") => Directive::TexCoord(tokens),
            Some("vn") => Directive::Normal(tokens),
            Some("f") => Directive::Face(tokens),
            Some(other) => Directive::Ignored(other),
            None => Directive::Ignored(""),
        }
    }
}

/// 定长元组的属性表
///
/// 下标 0 是全零占位项，OBJ 的 1 起始下标可以直接使用。
#[derive(Debug, Clone)]
pub struct AttributeTable<const N: usize> {
    kind: AttributeKind,
    entries: Vec<[f32; N]>,
}

impl<const N: usize> AttributeTable<N> {
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            entries: vec![[0.0; N]],
        }
    }

    #[inline]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// 表长度（含占位项）
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 有效条目数（不含占位项）
    #[inline]
    pub fn available(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn push(&mut self, entry: [f32; N]) {
        self.entries.push(entry);
    }

    /// 解析 OBJ 下标
    ///
    /// 非负数原样使用，负数按 `len + raw` 计算。结果必须落在 `1..len` 内，
    /// 因此占位项 0 永远不是合法目标。
    pub fn resolve(&self, raw: i64) -> Option<usize> {
        let len = self.entries.len() as i64;
        let resolved = if raw < 0 { len + raw } else { raw };
        if resolved <= 0 || resolved >= len {
            None
        } else {
            Some(resolved as usize)
        }
    }

    /// 按已解析的下标取条目
    #[inline]
    pub fn entry(&self, index: usize) -> &[f32; N] {
        &self.entries[index]
    }

    /// 读取一条 `v`/`vt`/`vn` 参数并追加
    ///
    /// 只取前 `N` 个分量，多余的（如 `vt` 的 w）丢弃；严格模式下多余的分量也必须是合法数字。
    pub fn push_parsed(
        &mut self,
        args: SplitWhitespace<'_>,
        policy: NumberPolicy,
    ) -> Result<(), ObjErrorKind> {
        let entry = parse_tuple::<N>(args, policy)?;
        self.push(entry);
        Ok(())
    }
}

fn parse_tuple<const N: usize>(
    mut args: SplitWhitespace<'_>,
    policy: NumberPolicy,
) -> Result<[f32; N], ObjErrorKind> {
    let mut entry = [0.0f32; N];
    for slot in entry.iter_mut() {
        *slot = parse_number(args.next(), policy)?;
    }
    if policy == NumberPolicy::Strict {
        for extra in args {
            parse_number(Some(extra), policy)?;
        }
    }
    Ok(entry)
}

fn parse_number(token: Option<&str>, policy: NumberPolicy) -> Result<f32, ObjErrorKind> {
    match (token, policy) {
        (Some(token), NumberPolicy::Strict) => {
            token.parse::<f32>().map_err(|_| ObjErrorKind::MalformedNumber {
                token: token.to_string(),
            })
        }
        (None, NumberPolicy::Strict) => Err(ObjErrorKind::MalformedNumber {
            token: String::new(),
        }),
        (Some(token), NumberPolicy::Lenient) => Ok(leading_number(token).unwrap_or(f32::NAN)),
        (None, NumberPolicy::Lenient) => Ok(f32::NAN),
    }
}

/// 宽松模式：取能解析的最长前缀（`1.5abc` -> 1.5，`0.5,` -> 0.5）
fn leading_number(token: &str) -> Option<f32> {
    if let Ok(value) = token.parse::<f32>() {
        return Some(value);
    }
    token
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .find_map(|end| token[..end].parse::<f32>().ok())
}
