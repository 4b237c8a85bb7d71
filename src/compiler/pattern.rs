//! 编译后规则模型
//! 正则编译后的规则、分类规则表与关键词倒排索引

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::rule::{Category, FieldSpec, RawRule};

/// 字段模板：与分类字段模式按下标对齐，None 表示使用约定捕获组
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTemplate(Vec<Option<String>>);

impl FieldTemplate {
    pub fn new(templates: Vec<Option<String>>) -> Self {
        Self(templates)
    }

    /// 按字段模式从原始规则中提取模板
    pub fn from_raw(rule: &RawRule, fields: &[FieldSpec]) -> Self {
        Self(fields.iter().map(|spec| rule.template(spec.template_key)).collect())
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).and_then(|t| t.as_deref())
    }
}

/// 编译后的单条规则，加载后不可变
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub regex: Regex,
    pub template: FieldTemplate,
    /// 规则在原始列表中的位置，唯一的优先级依据
    pub order: usize,
}

/// 单个分类的规则表
#[derive(Debug, Clone)]
pub struct CategoryRules {
    pub category: Category,
    /// 按 order 升序
    pub rules: Vec<CompiledRule>,
    /// 关键词 → rules 下标
    pub keyword_index: FxHashMap<String, Vec<usize>>,
    /// 提取不到关键词的规则下标，索引查找永远无法命中
    pub unindexed: Vec<usize>,
}

impl CategoryRules {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            rules: Vec::new(),
            keyword_index: FxHashMap::default(),
            unindexed: Vec::new(),
        }
    }

    pub fn stats(&self) -> CategoryStats {
        CategoryStats {
            rules: self.rules.len(),
            keywords: self.keyword_index.len(),
            unindexed: self.unindexed.len(),
        }
    }
}

/// 三个分类的规则库，构建后只读，可无锁并发读取
#[derive(Debug, Clone)]
pub struct RuleStore {
    pub browser: CategoryRules,
    pub os: CategoryRules,
    pub device: CategoryRules,
}

impl RuleStore {
    pub fn category(&self, category: Category) -> &CategoryRules {
        match category {
            Category::Browser => &self.browser,
            Category::Os => &self.os,
            Category::Device => &self.device,
        }
    }

    pub fn stats(&self) -> RuleStats {
        RuleStats {
            browser: self.browser.stats(),
            os: self.os.stats(),
            device: self.device.stats(),
        }
    }
}

/// 分类规则统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub rules: usize,
    pub keywords: usize,
    pub unindexed: usize,
}

/// 规则库统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleStats {
    pub browser: CategoryStats,
    pub os: CategoryStats,
    pub device: CategoryStats,
}
