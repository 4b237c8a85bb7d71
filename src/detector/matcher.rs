//! 规则匹配引擎
//! 关键词倒排索引筛选候选规则 → 按原始顺序恢复优先级 → 首个命中即返回

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::compiler::{CategoryRules, FieldTemplate, RuleStore};
use crate::rule::CategoryRecord;
use crate::utils::{extract_keywords, FieldFormatter};

/// 单次命中：全部捕获组（0 为整体匹配，未参与匹配的分组为空串）与规则字段模板
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch<'a> {
    pub captures: Vec<String>,
    pub template: &'a FieldTemplate,
    pub order: usize,
}

/// 规则匹配引擎，三个分类共用
pub struct RuleMatcher;

impl RuleMatcher {
    /// 从倒排索引收集候选规则，按 order 升序
    /// 同一规则可能挂在多个关键词下，不做去重
    pub fn collect_candidates(rules: &CategoryRules, keywords: &FxHashSet<String>) -> Vec<usize> {
        let mut candidates = Vec::new();
        for keyword in keywords {
            if let Some(slots) = rules.keyword_index.get(keyword.as_str()) {
                candidates.extend_from_slice(slots);
            }
        }
        // 索引合并会打乱规则作者声明的优先级，必须按 order 还原
        candidates.sort_by_key(|&slot| rules.rules[slot].order);
        candidates
    }

    /// 在单个分类中查找首个命中规则
    pub fn find<'a>(rules: &'a CategoryRules, input: &str) -> Option<RuleMatch<'a>> {
        let keywords = extract_keywords(input);
        let candidates = Self::collect_candidates(rules, &keywords);
        if candidates.is_empty() {
            trace!("{}: no candidate rule for input", rules.category);
            return None;
        }

        for slot in candidates {
            let rule = &rules.rules[slot];
            let Some(caps) = rule.regex.captures(input) else {
                continue;
            };

            trace!("{}: matched rule #{} ({})", rules.category, rule.order, rule.regex.as_str());
            let captures = caps
                .iter()
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();
            return Some(RuleMatch {
                captures,
                template: &rule.template,
                order: rule.order,
            });
        }

        trace!("{}: no candidate rule matched", rules.category);
        None
    }

    /// 匹配并格式化为分类结果
    pub fn classify<R: CategoryRecord>(store: &RuleStore, input: &str) -> Option<R> {
        let category = R::CATEGORY;
        let hit = Self::find(store.category(category), input)?;
        let schema = category.fields();
        let fields = FieldFormatter::format(&hit.captures, hit.template, schema);
        trace!(
            "{}: formatted {:?}",
            category,
            schema.iter().map(|spec| spec.name).zip(&fields).collect::<Vec<_>>()
        );
        Some(R::from_fields(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::RuleCompiler;
    use crate::rule::{Browser, Category, Device, RawRule, RuleFile};

    fn browser_rules(raw: Vec<RawRule>) -> CategoryRules {
        RuleCompiler::compile_category(Category::Browser, &raw).unwrap()
    }

    #[test]
    fn test_lower_order_wins() {
        // 两条规则都能命中，且关键词不同，索引合并顺序与 order 无关
        let rules = browser_rules(vec![
            RawRule::new(r"(Safari)/(\d+)").with("family_replacement", "First"),
            RawRule::new(r"(Chrome)/(\d+)").with("family_replacement", "Second"),
        ]);
        let hit = RuleMatcher::find(&rules, "Chrome/68 Safari/537").unwrap();
        assert_eq!(hit.order, 0);
        assert_eq!(hit.template.get(0), Some("First"));
    }

    #[test]
    fn test_first_match_stops_evaluation() {
        let rules = browser_rules(vec![
            RawRule::new(r"(Edge)/(\d+)"),
            RawRule::new(r"(Chrome)/(\d+)"),
            RawRule::new(r"Chrome/(\d+)").with("family_replacement", "Later"),
        ]);
        let hit = RuleMatcher::find(&rules, "Chrome/68").unwrap();
        assert_eq!(hit.order, 1);
        assert_eq!(hit.captures, vec!["Chrome/68", "Chrome", "68"]);
    }

    #[test]
    fn test_candidates_sorted_with_duplicates() {
        let rules = browser_rules(vec![
            RawRule::new(r"Mobile Safari"),
            RawRule::new(r"Safari"),
            RawRule::new(r"Mobile"),
        ]);
        let keywords = extract_keywords("Mobile Safari");
        let candidates = RuleMatcher::collect_candidates(&rules, &keywords);
        assert_eq!(candidates, vec![0, 0, 1, 2]);
    }

    #[test]
    fn test_no_keyword_no_match() {
        let rules = browser_rules(vec![RawRule::new(r"(Chrome)/(\d+)")]);
        assert!(RuleMatcher::find(&rules, "12/34").is_none());
        assert!(RuleMatcher::find(&rules, "Firefox/60").is_none());
        // 关键词命中但正则不匹配
        assert!(RuleMatcher::find(&rules, "Chrome without version").is_none());
    }

    #[test]
    fn test_unindexed_rule_unreachable() {
        let rules = browser_rules(vec![RawRule::new(r"(\d+)/(\d+)")]);
        assert_eq!(rules.unindexed, vec![0]);
        assert!(RuleMatcher::find(&rules, "Hello 12/34").is_none());
    }

    #[test]
    fn test_unmatched_group_is_empty() {
        let rules = browser_rules(vec![RawRule::new(r"(Wget)/(\d+)\.(\d+)(?:\.(\d+))?")]);
        let hit = RuleMatcher::find(&rules, "Wget/1.0").unwrap();
        assert_eq!(hit.captures, vec!["Wget/1.0", "Wget", "1", "0", ""]);
    }

    #[test]
    fn test_classify_record() {
        let rule_file = RuleFile {
            user_agent_parsers: vec![RawRule::new(r"(Firefox)/(\d+)\.(\d+)")],
            os_parsers: vec![],
            device_parsers: vec![
                RawRule::new(r"(iPhone)")
                    .with("brand_replacement", "Apple")
                    .with("model_replacement", "$1"),
            ],
        };
        let store = RuleCompiler::compile(&rule_file).unwrap();

        let browser: Browser = RuleMatcher::classify(&store, "Firefox/60.2").unwrap();
        assert_eq!((browser.family.as_str(), browser.major.as_str(), browser.minor.as_str()), ("Firefox", "60", "2"));

        let device: Device = RuleMatcher::classify(&store, "Mozilla (iPhone; CPU)").unwrap();
        assert_eq!(device.family, "iPhone");
        assert_eq!(device.brand, "Apple");
        assert_eq!(device.model, "iPhone");

        assert!(RuleMatcher::classify::<Device>(&store, "Firefox/60.2").is_none());
    }
}
