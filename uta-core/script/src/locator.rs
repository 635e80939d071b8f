//! 定位符解析
//!
//! 将带前缀约定的原始字符串解析为平台无关的元素定位符。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 定位符类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    /// 元素 ID
    Id,

    /// 元素 name 属性
    Name,

    /// CSS 选择器
    Css,

    /// XPath 表达式
    XPath,

    /// 无障碍 ID（移动端）
    AccessibilityId,
}

/// 平台无关的元素定位符
///
/// 构造后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorSpec {
    /// 定位符类型
    pub kind: LocatorKind,

    /// 定位内容
    pub value: String,
}

/// 前缀表，每个前缀映射到对应的定位符类型
const PREFIXES: &[(&str, LocatorKind)] = &[
    ("id=", LocatorKind::Id),
    ("name=", LocatorKind::Name),
    ("css=", LocatorKind::Css),
    ("xpath=", LocatorKind::XPath),
    ("accessId=", LocatorKind::AccessibilityId),
];

impl LocatorSpec {
    /// 解析带前缀的原始定位字符串
    ///
    /// 前缀区分大小写；没有任何前缀时整个字符串按 XPath 处理。
    /// 纯函数且全函数：同一输入永远得到相等的定位符。
    pub fn parse(raw: &str) -> Self {
        for (prefix, kind) in PREFIXES {
            if let Some(value) = raw.strip_prefix(prefix) {
                return Self {
                    kind: *kind,
                    value: value.to_string(),
                };
            }
        }

        Self {
            kind: LocatorKind::XPath,
            value: raw.to_string(),
        }
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocatorKind::Id => "id",
            LocatorKind::Name => "name",
            LocatorKind::Css => "css",
            LocatorKind::XPath => "xpath",
            LocatorKind::AccessibilityId => "accessId",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for LocatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_table() {
        assert_eq!(
            LocatorSpec::parse("id=login"),
            LocatorSpec {
                kind: LocatorKind::Id,
                value: "login".to_string()
            }
        );
        assert_eq!(LocatorSpec::parse("name=q").kind, LocatorKind::Name);
        assert_eq!(LocatorSpec::parse("css=.btn-primary").kind, LocatorKind::Css);
        assert_eq!(
            LocatorSpec::parse("xpath=//div[@id='x']").kind,
            LocatorKind::XPath
        );
        assert_eq!(
            LocatorSpec::parse("accessId=submit").kind,
            LocatorKind::AccessibilityId
        );
    }

    #[test]
    fn test_no_prefix_defaults_to_xpath() {
        let spec = LocatorSpec::parse("plain/path");
        assert_eq!(spec.kind, LocatorKind::XPath);
        assert_eq!(spec.value, "plain/path");
    }

    #[test]
    fn test_prefix_matching_is_case_sensitive() {
        // 大写前缀不生效，整串按 XPath 回退
        let spec = LocatorSpec::parse("ID=login");
        assert_eq!(spec.kind, LocatorKind::XPath);
        assert_eq!(spec.value, "ID=login");
    }

    #[test]
    fn test_empty_value_after_prefix() {
        let spec = LocatorSpec::parse("id=");
        assert_eq!(spec.kind, LocatorKind::Id);
        assert_eq!(spec.value, "");
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(LocatorSpec::parse("css=.card"), LocatorSpec::parse("css=.card"));
        assert_eq!(
            LocatorSpec::parse("//table/tr[1]"),
            LocatorSpec::parse("//table/tr[1]")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(LocatorSpec::parse("id=login").to_string(), "id=login");
        assert_eq!(LocatorSpec::parse("//a").to_string(), "xpath=//a");
    }
}
