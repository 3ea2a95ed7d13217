//! 行切分
//!
//! 把整个 OBJ 文档切成去掉首尾空白、非空、非注释的行，惰性地逐行产出。

use std::iter::{Enumerate, FusedIterator};
use std::str::Split;

/// 一行有效的 OBJ 文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 行号（从 1 开始，跳过的行也计数）
    pub number: usize,
    /// 去掉首尾空白后的内容
    pub text: &'a str,
}

/// 有效行迭代器，由 [`lines`] 创建
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: Enumerate<Split<'a, char>>,
}

/// 按 `\n` 切分文档
///
/// `\r\n` 结尾的 `\r` 会被 trim 掉。
pub fn lines(input: &str) -> Lines<'_> {
    Lines {
        inner: input.split('\n').enumerate(),
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = SourceLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, raw) = self.inner.next()?;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return Some(SourceLine {
                number: index + 1,
                text,
            });
        }
    }
}

impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let input = "# header\n\nv 1 2 3\n   \n  # indented comment\n\tf 1 2 3  \n";
        let collected: Vec<_> = lines(input).collect();

        assert_eq!(
            collected,
            vec![
                SourceLine { number: 3, text: "v 1 2 3" },
                SourceLine { number: 6, text: "f 1 2 3" },
            ]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let collected: Vec<_> = lines("v 0 0 0\r\nvn 0 1 0\r\n").map(|l| l.text).collect();
        assert_eq!(collected, vec!["v 0 0 0", "vn 0 1 0"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines("\n\n# only comments\n").count(), 0);
    }

    #[test]
    fn test_fused_after_end() {
        let mut it = lines("v 1 1 1");
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
