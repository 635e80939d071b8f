//! 目标平台定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 目标执行平台
///
/// 决定为场景构造哪一种具体会话后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// 桌面浏览器
    #[default]
    Web,

    /// 移动端浏览器仿真
    MobileWeb,

    /// iOS 真机
    IosReal,

    /// iOS 模拟器
    IosSimulator,

    /// Android 模拟器
    AndroidEmulator,

    /// Android 真机
    AndroidRealDevice,
}

impl Platform {
    /// 平台的文本名称（与配置文件中的取值一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::MobileWeb => "mobile_web",
            Platform::IosReal => "ios_real",
            Platform::IosSimulator => "ios_simulator",
            Platform::AndroidEmulator => "android_emulator",
            Platform::AndroidRealDevice => "android_real_device",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "web" => Ok(Platform::Web),
            "mobile_web" => Ok(Platform::MobileWeb),
            "ios_real" => Ok(Platform::IosReal),
            "ios_simulator" => Ok(Platform::IosSimulator),
            "android_emulator" => Ok(Platform::AndroidEmulator),
            "android_real_device" => Ok(Platform::AndroidRealDevice),
            other => Err(format!("未知平台: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Platform::AndroidEmulator).unwrap();
        assert_eq!(json, r#""android_emulator""#);

        let platform: Platform = serde_json::from_str(r#""ios_simulator""#).unwrap();
        assert_eq!(platform, Platform::IosSimulator);
    }

    #[test]
    fn test_from_str_matches_display() {
        for platform in [
            Platform::Web,
            Platform::MobileWeb,
            Platform::IosReal,
            Platform::IosSimulator,
            Platform::AndroidEmulator,
            Platform::AndroidRealDevice,
        ] {
            assert_eq!(platform.to_string().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("windows_phone".parse::<Platform>().is_err());
    }
}
