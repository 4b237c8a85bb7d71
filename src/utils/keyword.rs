//! 关键词提取
//! 规则正则源码与输入 UA 共用同一提取函数，索引与查询才能对齐

use rustc_hash::FxHashSet;
use std::mem;

/// 关键词最小长度，短于此的字母串不入索引
pub const MIN_KEYWORD_LEN: usize = 3;

/// 提取关键词集合
/// 规则：`$` 与字面量 `\d` 视为分隔符 → 转小写 → 取最长连续 ASCII 字母串 → 仅保留长度 ≥ 3
#[inline]
pub fn extract_keywords(text: &str) -> FxHashSet<String> {
    let mut keywords = FxHashSet::default();
    let mut buf = String::with_capacity(16);
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        // 仅折叠 ASCII；非 ASCII 字节（含 U+212A 这类可小写为 k 的字符）一律视为分隔符
        if b.is_ascii_alphabetic() {
            buf.push(b.to_ascii_lowercase() as char);
            i += 1;
            continue;
        }

        // `\d` 整体跳过，否则 d 会被拼进后续字母串
        i += if b == b'\\' && bytes.get(i + 1) == Some(&b'd') { 2 } else { 1 };
        flush(&mut keywords, &mut buf);
    }
    flush(&mut keywords, &mut buf);

    keywords
}

#[inline(always)]
fn flush(keywords: &mut FxHashSet<String>, buf: &mut String) {
    if buf.len() >= MIN_KEYWORD_LEN {
        keywords.insert(mem::take(buf));
    } else {
        buf.clear();
    }
}
