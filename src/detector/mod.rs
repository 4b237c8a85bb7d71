//! 检测模块：规则匹配、结果缓存与解析器入口
pub mod matcher;
pub mod cache;
pub mod parser;

// 导出核心接口
pub use self::matcher::{RuleMatch, RuleMatcher};
pub use self::cache::ResultCache;
pub use self::parser::UaParser;
