//! 规则模块：负责规则文件的加载与数据模型定义
pub mod model;
pub mod loader;

// 导出核心接口
pub use self::model::{
    Browser, Category, CategoryRecord, Device, FieldSpec, Os, RawRule, RuleFile, UserAgent,
    OTHER_FAMILY,
};
pub use self::loader::RuleLoader;
