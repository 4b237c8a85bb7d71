//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认结果缓存容量
pub const DEFAULT_CACHE_CAPACITY: usize = 100_000;
/// 容量被配置为 0 时回退使用的容量
pub const FALLBACK_CACHE_CAPACITY: usize = 102_400;

/// OS / Device 未命中时的结果策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingPolicy {
    /// 填充 `family = "Other"`
    #[default]
    Other,
    /// 保持为 None
    Absent,
}

/// 解析器配置
#[derive(Debug, Clone)]
pub struct ParserConfig {
    // 规则文件路径
    pub rule_path: PathBuf,
    // 结果缓存容量（0 表示使用回退容量）
    pub cache_capacity: usize,
    // OS/Device 未命中策略
    pub missing_policy: MissingPolicy,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            rule_path: PathBuf::from("data/regexes.json"),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            missing_policy: MissingPolicy::Other,
        }
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> ParserConfig {
        ParserConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（链式 API）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: ParserConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rule_path = path.into();
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    pub fn missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.config.missing_policy = policy;
        self
    }

    pub fn build(self) -> ParserConfig {
        self.config
    }
}
