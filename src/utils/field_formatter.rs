//! 字段格式化工具
//! 根据规则的字段模板，将正则捕获结果填充为分类结果字段
//! 模板中的 `$N`（N 为单个数字）替换为第 N 个捕获组文本，越界时保留原样

use crate::compiler::FieldTemplate;
use crate::rule::FieldSpec;

/// 字段格式化工具类
pub struct FieldFormatter;

impl FieldFormatter {
    /// 按分类字段模式生成字段值（顺序与 `fields` 一致）
    ///
    /// - 模板存在：逐个替换 `$N`
    /// - 模板缺省：取约定位置的捕获组，不存在则为空串
    pub fn format(captures: &[String], template: &FieldTemplate, fields: &[FieldSpec]) -> Vec<String> {
        fields
            .iter()
            .enumerate()
            .map(|(idx, spec)| match template.get(idx) {
                Some(tpl) => Self::substitute(tpl, captures),
                None => captures.get(spec.position).cloned().unwrap_or_default(),
            })
            .collect()
    }

    /// 替换模板中的全部 `$N` 占位符
    pub fn substitute(template: &str, captures: &[String]) -> String {
        if !template.contains('$') {
            return template.to_string();
        }

        let mut out = String::with_capacity(template.len() + 16);
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            match chars.peek().and_then(|&d| d.to_digit(10).map(|n| (d, n as usize))) {
                Some((digit, n)) => {
                    chars.next();
                    match captures.get(n) {
                        Some(text) => out.push_str(text),
                        None => {
                            out.push('$');
                            out.push(digit);
                        }
                    }
                }
                None => out.push('$'),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Category;

    fn caps(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_fallback() {
        let captures = caps(&["Chrome/68.0.3440.59", "Chrome", "68", "0", "3440"]);
        let fields = FieldFormatter::format(&captures, &FieldTemplate::default(), Category::Browser.fields());
        assert_eq!(fields, caps(&["Chrome", "68", "0", "3440"]));
    }

    #[test]
    fn test_positional_fallback_short_captures() {
        // 无捕获组时 family 取不到位置 1，保持空串
        let captures = caps(&["Chrome/68.0.3440.59", "68", "0", "3440"]);
        let fields = FieldFormatter::format(&captures, &FieldTemplate::default(), Category::Browser.fields());
        assert_eq!(fields, caps(&["68", "0", "3440", ""]));
    }

    #[test]
    fn test_template_substitution() {
        let captures = caps(&["Chrome/68.0.3440.59", "68", "0", "3440"]);
        let template = FieldTemplate::new(vec![Some("Chrome".into()), Some("$1".into()), None, None]);
        let fields = FieldFormatter::format(&captures, &template, Category::Browser.fields());
        assert_eq!(fields, caps(&["Chrome", "68", "3440", ""]));
    }

    #[test]
    fn test_multiple_references() {
        let captures = caps(&["SM-G950F Build", "SM", "G950F"]);
        assert_eq!(FieldFormatter::substitute("Samsung $1-$2 ($0)", &captures), "Samsung SM-G950F (SM-G950F Build)");
    }

    #[test]
    fn test_out_of_range_reference_kept() {
        let captures = caps(&["abc", "a"]);
        assert_eq!(FieldFormatter::substitute("$1 $2 $9", &captures), "a $2 $9");
    }

    #[test]
    fn test_single_digit_reference() {
        let captures = caps(&["x", "one"]);
        assert_eq!(FieldFormatter::substitute("$12", &captures), "one2");
    }

    #[test]
    fn test_literal_dollar() {
        let captures = caps(&["x", "one"]);
        assert_eq!(FieldFormatter::substitute("US$ $", &captures), "US$ $");
        assert_eq!(FieldFormatter::substitute("$$1", &captures), "$one");
    }

    #[test]
    fn test_empty_capture_substitutes_empty() {
        let captures = caps(&["Wget/1.0", "Wget", "1", "0", ""]);
        assert_eq!(FieldFormatter::substitute("$1 $4.", &captures), "Wget .");
    }
}
