//! UA 解析器核心
//! 核心职责：
//! 1. 加载并编译规则库（本地文件 / 内存规则）
//! 2. 三个分类的独立解析入口
//! 3. 完整解析结果的缓存

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::cache::ResultCache;
use super::matcher::RuleMatcher;
use crate::compiler::{RuleCompiler, RuleStats, RuleStore};
use crate::config::{ConfigManager, MissingPolicy, ParserConfig};
use crate::error::UaResult;
use crate::rule::{Browser, CategoryRecord, Device, Os, RuleFile, RuleLoader, UserAgent};

/// UA 解析器
/// - store: 编译后的规则库，只读，Arc 共享
/// - cache: 完整解析结果缓存，内部加锁
#[derive(Debug)]
pub struct UaParser {
    store: Arc<RuleStore>,
    cache: ResultCache<Arc<UserAgent>>,
    missing_policy: MissingPolicy,
}

impl UaParser {
    /// 使用默认配置，从指定规则文件创建解析器
    pub fn new(path: impl AsRef<Path>) -> UaResult<Self> {
        let config = ConfigManager::custom().rule_path(path.as_ref()).build();
        Self::with_config(config)
    }

    /// 按配置创建解析器（规则文件取自 `config.rule_path`）
    pub fn with_config(config: ParserConfig) -> UaResult<Self> {
        let start = Instant::now();
        let rule_file = RuleLoader::load_file(&config.rule_path)?;
        let parser = Self::with_rules(&rule_file, &config)?;
        info!(
            "UaParser ready | rules={} | Time: {}ms",
            config.rule_path.display(),
            start.elapsed().as_millis()
        );
        Ok(parser)
    }

    /// 异步读取规则文件后创建解析器
    #[cfg(feature = "async-io")]
    pub async fn new_async(config: ParserConfig) -> UaResult<Self> {
        let rule_file = RuleLoader::load_file_async(&config.rule_path).await?;
        Self::with_rules(&rule_file, &config)
    }

    /// 使用内存中的规则库创建解析器
    pub fn with_rules(rule_file: &RuleFile, config: &ParserConfig) -> UaResult<Self> {
        let store = RuleCompiler::compile(rule_file)?;
        Ok(Self::with_store(Arc::new(store), config))
    }

    /// 使用已编译的规则库创建解析器（多个解析器可共享同一规则库）
    pub fn with_store(store: Arc<RuleStore>, config: &ParserConfig) -> Self {
        Self {
            store,
            cache: ResultCache::new(config.cache_capacity),
            missing_policy: config.missing_policy,
        }
    }

    /// 完整解析，结果缓存
    /// Browser 未命中时整体返回 None（不缓存）；OS/Device 未命中按 MissingPolicy 处理
    pub fn classify(&self, input: &str) -> Option<Arc<UserAgent>> {
        self.cache
            .get_or_compute(input, || self.classify_uncached(input).map(Arc::new))
    }

    /// 完整解析，不读写缓存
    pub fn classify_uncached(&self, input: &str) -> Option<UserAgent> {
        let browser = self.classify_browser(input)?;
        Some(UserAgent {
            browser,
            os: self.or_missing(self.classify_os(input)),
            device: self.or_missing(self.classify_device(input)),
        })
    }

    pub fn classify_browser(&self, input: &str) -> Option<Browser> {
        RuleMatcher::classify(&self.store, input)
    }

    pub fn classify_os(&self, input: &str) -> Option<Os> {
        RuleMatcher::classify(&self.store, input)
    }

    pub fn classify_device(&self, input: &str) -> Option<Device> {
        RuleMatcher::classify(&self.store, input)
    }

    fn or_missing<R: CategoryRecord>(&self, record: Option<R>) -> Option<R> {
        match (record, self.missing_policy) {
            (Some(r), _) => Some(r),
            (None, MissingPolicy::Other) => Some(R::other()),
            (None, MissingPolicy::Absent) => None,
        }
    }

    /// 调整缓存容量，0 回退为默认回退容量
    pub fn set_cache_capacity(&self, capacity: usize) {
        self.cache.set_max_size(capacity);
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.max_size()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_cached(&self, input: &str) -> bool {
        self.cache.contains(input)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn missing_policy(&self) -> MissingPolicy {
        self.missing_policy
    }

    pub fn rule_stats(&self) -> RuleStats {
        self.store.stats()
    }

    pub fn rule_store(&self) -> &Arc<RuleStore> {
        &self.store
    }
}
