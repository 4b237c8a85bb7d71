//! 工具模块：关键词提取与字段格式化
pub mod keyword;
pub mod field_formatter;

pub use self::keyword::extract_keywords;
pub use self::field_formatter::FieldFormatter;
