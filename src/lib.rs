//! rsuaparser - 基于 ua-parser 规则的高性能 User-Agent 解析库
//!
//! 规则按分类（Browser / OS / Device）编译，加载时构建关键词倒排索引，
//! 查询时仅评估候选规则，并按规则原始顺序首个命中优先。

// 导出全局错误类型
pub use self::error::{RsUaParserError, UaResult};

// 导出配置模块
pub use self::config::{
    ConfigManager, CustomConfigBuilder, MissingPolicy, ParserConfig, DEFAULT_CACHE_CAPACITY,
    FALLBACK_CACHE_CAPACITY,
};

// 导出规则模块核心接口
pub use self::rule::{
    Browser, Category, CategoryRecord, Device, Os, RawRule, RuleFile, RuleLoader, UserAgent,
};

// 导出编译模块核心接口
pub use self::compiler::{CategoryStats, CompiledRule, FieldTemplate, RuleCompiler, RuleStats, RuleStore};

// 导出工具模块核心接口
pub use self::utils::{extract_keywords, FieldFormatter};

// 导出检测模块核心接口
pub use self::detector::{ResultCache, RuleMatch, RuleMatcher, UaParser};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod compiler;
pub mod detector;
