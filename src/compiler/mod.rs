//! 编译模块：将原始规则编译为可执行的正则规则与关键词索引
pub mod pattern;
pub mod compiler;

pub use self::pattern::{
    CategoryRules, CategoryStats, CompiledRule, FieldTemplate, RuleStats, RuleStore,
};
pub use self::compiler::RuleCompiler;
