//! 页面对象映射
//!
//! 符号化对象名到原始定位字符串的映射。映射加载后只读，
//! 定位符的真正解析推迟到使用它的步骤，格式有问题的条目
//! 只影响用到它的那一步。

use std::collections::HashMap;
use std::path::Path;

use crate::{Result, ScriptError};

/// 页面对象映射
///
/// 每个场景加载一次，由执行该场景的运行器独占。
#[derive(Debug, Clone, Default)]
pub struct PageObjectMap {
    entries: HashMap<String, String>,
}

impl PageObjectMap {
    /// 从 JSON 字符串加载
    ///
    /// 顶层必须是对象，且所有取值都是字符串。
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| ScriptError::ObjectMapParseFailed(e.to_string()))?;
        Ok(Self { entries })
    }

    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 查找对象的原始定位字符串
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// 映射条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全部对象名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str() {
        let map = PageObjectMap::from_json_str(
            r#"{"LoginButton": "id=login", "SearchBox": "//input[@name='q']"}"#,
        )
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("LoginButton"), Some("id=login"));
        assert_eq!(map.get("SearchBox"), Some("//input[@name='q']"));
    }

    #[test]
    fn test_missing_name_is_none() {
        let map = PageObjectMap::from_json_str(r#"{"A": "id=a"}"#).unwrap();
        assert_eq!(map.get("B"), None);
    }

    #[test]
    fn test_malformed_json_fails() {
        assert!(PageObjectMap::from_json_str("not json").is_err());
    }

    #[test]
    fn test_non_string_value_fails() {
        let result = PageObjectMap::from_json_str(r#"{"A": 42}"#);
        assert!(matches!(result, Err(ScriptError::ObjectMapParseFailed(_))));
    }

    #[test]
    fn test_top_level_array_fails() {
        assert!(PageObjectMap::from_json_str(r#"["id=a"]"#).is_err());
    }
}
