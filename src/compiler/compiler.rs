//! 规则编译器核心
//! 将原始规则编译为正则，并构建每个分类的关键词倒排索引

use std::time::Instant;
use regex::RegexBuilder;
use tracing::{debug, info, warn};

use super::pattern::{CategoryRules, CompiledRule, FieldTemplate, RuleStore};
use crate::error::{RsUaParserError, UaResult};
use crate::rule::{Category, RawRule, RuleFile};
use crate::utils::extract_keywords;

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则库；任一正则编译失败即整体失败
    pub fn compile(rule_file: &RuleFile) -> UaResult<RuleStore> {
        let start = Instant::now();

        let store = RuleStore {
            browser: Self::compile_category(Category::Browser, rule_file.rules(Category::Browser))?,
            os: Self::compile_category(Category::Os, rule_file.rules(Category::Os))?,
            device: Self::compile_category(Category::Device, rule_file.rules(Category::Device))?,
        };

        let stats = store.stats();
        info!(
            "Rule store compiled in {:?} | browser={} os={} device={} | unindexed browser={} os={} device={}",
            start.elapsed(),
            stats.browser.rules,
            stats.os.rules,
            stats.device.rules,
            stats.browser.unindexed,
            stats.os.unindexed,
            stats.device.unindexed
        );

        Ok(store)
    }

    /// 编译单个分类：order 取原始列表下标，跳过无 regex 的条目
    pub fn compile_category(category: Category, raw_rules: &[RawRule]) -> UaResult<CategoryRules> {
        let mut compiled = CategoryRules::new(category);
        let fields = category.fields();

        for (order, raw) in raw_rules.iter().enumerate() {
            let Some(source) = raw.regex.as_deref() else {
                warn!("Skip {} rule #{}: missing regex", category, order);
                continue;
            };

            let regex = RegexBuilder::new(source)
                .case_insensitive(raw.is_case_insensitive())
                .build()
                .map_err(|e| RsUaParserError::RuleCompileError { category, order, source: e })?;

            // 关键词取自编译前的正则源码
            let slot = compiled.rules.len();
            let keywords = extract_keywords(source);
            if keywords.is_empty() {
                warn!("{} rule #{} has no keyword and is unreachable via index: {}", category, order, source);
                compiled.unindexed.push(slot);
            }
            for keyword in keywords {
                compiled.keyword_index.entry(keyword).or_default().push(slot);
            }

            compiled.rules.push(CompiledRule {
                regex,
                template: FieldTemplate::from_raw(raw, fields),
                order,
            });
        }

        debug!(
            "{} rules compiled: rules={} keywords={} unindexed={}",
            category,
            compiled.rules.len(),
            compiled.keyword_index.len(),
            compiled.unindexed.len()
        );

        Ok(compiled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_category_index() {
        let raw = vec![
            RawRule::new(r"(Chrome)/(\d+)\.(\d+)"),
            RawRule { regex: None, ..RawRule::default() },
            RawRule::new(r"(Chromium|Chrome)/(\d+)").with("family_replacement", "Chromium"),
            RawRule::new(r"(\d+)/(\d+)"),
        ];
        let compiled = RuleCompiler::compile_category(Category::Browser, &raw).unwrap();

        // 无 regex 的条目被跳过，但 order 仍按原始下标
        let orders: Vec<usize> = compiled.rules.iter().map(|r| r.order).collect();
        assert_eq!(orders, vec![0, 2, 3]);

        assert_eq!(compiled.keyword_index.get("chrome"), Some(&vec![0, 1]));
        assert_eq!(compiled.keyword_index.get("chromium"), Some(&vec![1]));
        assert_eq!(compiled.unindexed, vec![2]);
        assert_eq!(compiled.rules[1].template.get(0), Some("Chromium"));
        assert_eq!(compiled.rules[1].template.get(1), None);
    }

    #[test]
    fn test_compile_error_reports_position() {
        let raw = vec![RawRule::new("Firefox/(\\d+)"), RawRule::new("Broken(")];
        let err = RuleCompiler::compile_category(Category::Device, &raw).unwrap_err();
        match err {
            RsUaParserError::RuleCompileError { category, order, .. } => {
                assert_eq!(category, Category::Device);
                assert_eq!(order, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_case_insensitive_flag() {
        let mut raw = RawRule::new("(iphone)");
        raw.regex_flag = Some("i".to_string());
        let compiled = RuleCompiler::compile_category(Category::Device, &[raw]).unwrap();
        assert!(compiled.rules[0].regex.is_match("Apple iPhone"));
    }

    #[test]
    fn test_compile_store() {
        let rule_file = RuleFile {
            user_agent_parsers: vec![RawRule::new("(Firefox)/(\\d+)")],
            os_parsers: vec![RawRule::new("(Linux)"), RawRule::new("(Android) (\\d+)")],
            device_parsers: vec![],
        };
        let store = RuleCompiler::compile(&rule_file).unwrap();
        let stats = store.stats();
        assert_eq!(stats.browser.rules, 1);
        assert_eq!(stats.os.rules, 2);
        assert_eq!(stats.os.keywords, 2);
        assert_eq!(stats.device.rules, 0);
    }
}
