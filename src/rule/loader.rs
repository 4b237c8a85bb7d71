//! 规则加载管理器
//! 负责从本地文件 / 内存文本读取 ua-parser 规则库

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::model::{Category, RuleFile};
use crate::error::{RsUaParserError, UaResult};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 从本地 JSON 文件加载规则库
    pub fn load_file(path: impl AsRef<Path>) -> UaResult<RuleFile> {
        let path = path.as_ref();
        debug!("Reading rule file: {}", path.display());
        let data = fs::read(path)?;
        debug!("Rule file read: path={} bytes={}", path.display(), data.len());
        Self::load_slice(&data)
    }

    /// 异步加载本地 JSON 规则文件
    #[cfg(feature = "async-io")]
    pub async fn load_file_async(path: impl AsRef<Path>) -> UaResult<RuleFile> {
        let path = path.as_ref();
        debug!("Reading rule file (async): {}", path.display());
        let data = tokio::fs::read(path).await?;
        debug!("Rule file read (async): path={} bytes={}", path.display(), data.len());
        Self::load_slice(&data)
    }

    pub fn load_str(text: &str) -> UaResult<RuleFile> {
        Self::load_slice(text.as_bytes())
    }

    pub fn load_slice(data: &[u8]) -> UaResult<RuleFile> {
        let rule_file: RuleFile = serde_json::from_slice(data)?;
        if Category::ALL.iter().all(|&c| rule_file.rules(c).is_empty()) {
            return Err(RsUaParserError::InvalidInput(
                "rule file contains no user_agent_parsers, os_parsers or device_parsers".to_string(),
            ));
        }
        Self::report(&rule_file);
        Ok(rule_file)
    }

    // 无 regex 的条目在编译期跳过，这里提前告警
    fn report(rule_file: &RuleFile) {
        for category in Category::ALL {
            let rules = rule_file.rules(category);
            let missing = rules.iter().filter(|r| r.regex.is_none()).count();
            if missing > 0 {
                warn!(
                    "{} of {} entries in {} have no regex and will be skipped",
                    missing,
                    rules.len(),
                    category.source_key()
                );
            }
        }
        debug!(
            "Rule file parsed: browser={} os={} device={}",
            rule_file.user_agent_parsers.len(),
            rule_file.os_parsers.len(),
            rule_file.device_parsers.len()
        );
    }
}
