//! 场景与批次配置
//!
//! 批次运行前静态声明，运行期间不可变。没有进程级单例：
//! 全部配置显式传入编排器。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use uta_driver::Platform;

/// 单个场景的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// 场景标识（缺省时取脚本文件名主干）
    #[serde(default)]
    pub id: Option<String>,

    /// 场景脚本路径
    pub script: PathBuf,

    /// 页面对象映射路径
    pub objects: PathBuf,

    /// 目标平台
    #[serde(default)]
    pub platform: Platform,
}

impl ScenarioConfig {
    /// 创建新的场景配置
    pub fn new<P: AsRef<Path>>(script: P, objects: P) -> Self {
        Self {
            id: None,
            script: script.as_ref().to_path_buf(),
            objects: objects.as_ref().to_path_buf(),
            platform: Platform::default(),
        }
    }

    /// 设置目标平台
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// 设置场景标识
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// 场景标识：显式配置优先，否则取脚本文件名主干
    pub fn scenario_id(&self) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }

        self.script
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| self.script.display().to_string())
    }
}

/// 批次执行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// 工作池大小（固定值，与场景数量无关）
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// 批次总时限（秒），超时的场景被强制取消
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

// 受限宿主机（如 2 vCPU 的 CI 执行机）上避免过度并发
fn default_max_concurrent() -> usize {
    2
}

fn default_deadline_secs() -> u64 {
    900
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_id_defaults_to_file_stem() {
        let config = ScenarioConfig::new("scenarios/login.txt", "scenarios/login.json");
        assert_eq!(config.scenario_id(), "login");
    }

    #[test]
    fn test_explicit_id_wins() {
        let config =
            ScenarioConfig::new("scenarios/login.txt", "scenarios/login.json").with_id("冒烟-登录");
        assert_eq!(config.scenario_id(), "冒烟-登录");
    }

    #[test]
    fn test_batch_defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.deadline_secs, 900);
    }

    #[test]
    fn test_scenario_config_deserialization() {
        let json = r#"{
            "script": "scenarios/login.txt",
            "objects": "scenarios/login.json",
            "platform": "android_emulator"
        }"#;

        let config: ScenarioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.platform, Platform::AndroidEmulator);
        assert!(config.id.is_none());
    }
}
