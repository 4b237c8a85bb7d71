//! 全局错误类型定义
//! 仅覆盖加载期错误；匹配期的"未命中"不是错误，以 Option 表达

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

use crate::rule::Category;

#[derive(Error, Debug)]
pub enum RsUaParserError {
    // 规则相关错误
    /// 单条规则正则编译失败，携带分类与原始顺序便于定位
    #[error("Rule compile failed: category={category} order={order}: {source}")]
    RuleCompileError {
        category: Category,
        order: usize,
        #[source]
        source: RegexError,
    },

    // 序列化/反序列化错误
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO operation failed: {0}")]
    IoError(#[from] IoError),
    /// 规则文档结构合法但不可用（例如三个分类均为空）
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type UaResult<T> = Result<T, RsUaParserError>;
