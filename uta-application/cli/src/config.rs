//! CLI 配置管理
//!
//! 批次运行的全部配置来自显式配置文件与环境变量，进程内
//! 不保留任何全局可变状态。
//!
//! 配置文件搜索路径 (按优先级):
//! 1. 命令行 `--config` 指定的路径
//! 2. `UTA_CONFIG` 环境变量指定的路径
//! 3. `./uta.toml` (当前目录)
//! 4. `~/.config/uta/config.toml` (用户配置目录)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use uta_executor::{BatchConfig, ScenarioConfig};

/// webhook 地址的环境变量覆盖
const ENV_WEBHOOK_URL: &str = "UTA_WEBHOOK_URL";

/// 配置文件路径环境变量
const ENV_CONFIG_PATH: &str = "UTA_CONFIG";

/// CLI 配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// webhook 地址（可被 UTA_WEBHOOK_URL 覆盖）
    pub webhook_url: Option<String>,

    /// 批次执行配置
    #[serde(default)]
    pub batch: BatchConfig,

    /// 场景列表
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

impl CliConfig {
    /// 按搜索路径加载配置
    ///
    /// 显式路径必须存在；其余路径缺失时回退到默认配置。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::find_config_file(explicit) {
            Some(path) => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("读取配置文件失败: {:?}", path))?;
                toml::from_str(&content)
                    .with_context(|| format!("解析配置文件失败: {:?}", path))?
            }
            None => Self::default(),
        };

        // 环境变量覆盖
        if let Ok(url) = env::var(ENV_WEBHOOK_URL) {
            if !url.is_empty() {
                config.webhook_url = Some(url);
            }
        }

        Ok(config)
    }

    /// 定位配置文件
    fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = env::var(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from("./uta.toml");
        if local.exists() {
            return Some(local);
        }

        if let Some(home) = dirs::home_dir() {
            let user = home.join(".config").join("uta").join("config.toml");
            if user.exists() {
                return Some(user);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uta_driver::Platform;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
webhook_url = "https://hooks.example.com/T000/B000"

[batch]
max_concurrent = 4
deadline_secs = 600

[[scenarios]]
script = "scenarios/login.txt"
objects = "scenarios/login.json"
platform = "web"

[[scenarios]]
id = "结算-安卓"
script = "scenarios/checkout.txt"
objects = "scenarios/checkout.json"
platform = "android_emulator"
"#;

        let config: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.webhook_url.as_deref(),
            Some("https://hooks.example.com/T000/B000")
        );
        assert_eq!(config.batch.max_concurrent, 4);
        assert_eq!(config.scenarios.len(), 2);
        assert_eq!(config.scenarios[1].platform, Platform::AndroidEmulator);
        assert_eq!(config.scenarios[1].scenario_id(), "结算-安卓");
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert!(config.webhook_url.is_none());
        assert_eq!(config.batch.max_concurrent, 2);
        assert_eq!(config.batch.deadline_secs, 900);
        assert!(config.scenarios.is_empty());
    }
}
