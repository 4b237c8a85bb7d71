//! 规则数据模型定义
//! 原始规则文件结构、分类字段模式，以及解析结果结构

use std::fmt;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 分类：每个分类拥有独立的规则列表与关键词索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Browser,
    Os,
    Device,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Browser, Category::Os, Category::Device];

    /// 规则文件中的列表键名
    pub fn source_key(self) -> &'static str {
        match self {
            Category::Browser => "user_agent_parsers",
            Category::Os => "os_parsers",
            Category::Device => "device_parsers",
        }
    }

    /// 输出字段模式（按输出顺序）
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Category::Browser => BROWSER_FIELDS,
            Category::Os => OS_FIELDS,
            Category::Device => DEVICE_FIELDS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Browser => write!(f, "browser"),
            Category::Os => write!(f, "os"),
            Category::Device => write!(f, "device"),
        }
    }
}

/// 单个输出字段：模板键名 + 无模板时使用的约定捕获组位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub template_key: &'static str,
    pub position: usize,
}

const fn field(name: &'static str, template_key: &'static str, position: usize) -> FieldSpec {
    FieldSpec { name, template_key, position }
}

static BROWSER_FIELDS: &[FieldSpec] = &[
    field("family", "family_replacement", 1),
    field("major", "v1_replacement", 2),
    field("minor", "v2_replacement", 3),
    field("patch", "v3_replacement", 4),
];

static OS_FIELDS: &[FieldSpec] = &[
    field("family", "os_replacement", 1),
    field("major", "os_v1_replacement", 2),
    field("minor", "os_v2_replacement", 3),
    field("patch", "os_v3_replacement", 4),
];

static DEVICE_FIELDS: &[FieldSpec] = &[
    field("family", "device_replacement", 1),
    field("brand", "brand_replacement", 2),
    field("model", "model_replacement", 3),
];

/// 原始规则条目（ua-parser regexes 格式）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// "i" 表示忽略大小写
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_flag: Option<String>,
    /// 其余键：字段模板（family_replacement 等），未知键忽略
    #[serde(flatten)]
    pub fields: FxHashMap<String, Value>,
}

impl RawRule {
    /// 仅有正则、无字段模板的规则
    pub fn new(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            ..Self::default()
        }
    }

    /// 追加字段模板
    pub fn with(mut self, key: &str, template: impl Into<String>) -> Self {
        self.fields.insert(key.to_string(), Value::String(template.into()));
        self
    }

    /// 读取字段模板；数字按文本处理，其余类型视为缺省
    pub fn template(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.regex_flag.as_deref() == Some("i")
    }
}

/// 原始规则文件：三个分类各自的有序规则列表
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleFile {
    #[serde(default)]
    pub user_agent_parsers: Vec<RawRule>,
    #[serde(default)]
    pub os_parsers: Vec<RawRule>,
    #[serde(default)]
    pub device_parsers: Vec<RawRule>,
}

impl RuleFile {
    pub fn rules(&self, category: Category) -> &[RawRule] {
        match category {
            Category::Browser => &self.user_agent_parsers,
            Category::Os => &self.os_parsers,
            Category::Device => &self.device_parsers,
        }
    }
}

/// 分类结果记录：由格式化后的字段（按模式顺序）构造
pub trait CategoryRecord: Sized {
    const CATEGORY: Category;

    fn from_fields(fields: Vec<String>) -> Self;

    /// 未命中时的占位结果
    fn other() -> Self {
        Self::from_fields(vec![OTHER_FAMILY.to_string()])
    }
}

pub const OTHER_FAMILY: &str = "Other";

/// 浏览器解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browser {
    pub family: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
}

/// 操作系统解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Os {
    pub family: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
}

/// 设备解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub family: String,
    pub brand: String,
    pub model: String,
}

impl CategoryRecord for Browser {
    const CATEGORY: Category = Category::Browser;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut it = fields.into_iter();
        Self {
            family: it.next().unwrap_or_default(),
            major: it.next().unwrap_or_default(),
            minor: it.next().unwrap_or_default(),
            patch: it.next().unwrap_or_default(),
        }
    }
}

impl CategoryRecord for Os {
    const CATEGORY: Category = Category::Os;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut it = fields.into_iter();
        Self {
            family: it.next().unwrap_or_default(),
            major: it.next().unwrap_or_default(),
            minor: it.next().unwrap_or_default(),
            patch: it.next().unwrap_or_default(),
        }
    }
}

impl CategoryRecord for Device {
    const CATEGORY: Category = Category::Device;

    fn from_fields(fields: Vec<String>) -> Self {
        let mut it = fields.into_iter();
        Self {
            family: it.next().unwrap_or_default(),
            brand: it.next().unwrap_or_default(),
            model: it.next().unwrap_or_default(),
        }
    }
}

/// 完整解析结果；Browser 必须命中，OS/Device 依 MissingPolicy 填充
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgent {
    pub browser: Browser,
    pub os: Option<Os>,
    pub device: Option<Device>,
}

// family + 非空版本号，以 "." 连接
fn write_versioned(f: &mut fmt::Formatter<'_>, family: &str, parts: [&str; 3]) -> fmt::Result {
    f.write_str(family)?;
    let mut first = true;
    for part in parts.iter().take_while(|p| !p.is_empty()) {
        f.write_str(if first { " " } else { "." })?;
        f.write_str(part)?;
        first = false;
    }
    Ok(())
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_versioned(f, &self.family, [&self.major, &self.minor, &self.patch])
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_versioned(f, &self.family, [&self.major, &self.minor, &self.patch])
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.brand.is_empty(), self.model.is_empty()) {
            (true, true) => write!(f, "{}", self.family),
            (false, true) => write!(f, "{} ({})", self.family, self.brand),
            (true, false) => write!(f, "{} ({})", self.family, self.model),
            (false, false) => write!(f, "{} ({} {})", self.family, self.brand, self.model),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.browser)?;
        if let Some(os) = &self.os {
            write!(f, " / {}", os)?;
        }
        if let Some(device) = &self.device {
            write!(f, " / {}", device)?;
        }
        Ok(())
    }
}
