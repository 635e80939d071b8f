//! 场景脚本
//!
//! 行式场景文本：一行一条命令，空行与注释行在加载时过滤。

use std::path::Path;

use crate::command::{self, Command};
use crate::{Result, ScriptError};

/// 已过滤的场景脚本
///
/// 仅保留可执行步骤行（去除首尾空白后的原始文本），
/// 顺序与文件一致。
#[derive(Debug, Clone, Default)]
pub struct ScenarioScript {
    steps: Vec<String>,
}

impl ScenarioScript {
    /// 从脚本文本加载
    pub fn from_text(text: &str) -> Self {
        let steps = text
            .lines()
            .filter(|line| command::is_step(line))
            .map(|line| line.trim().to_string())
            .collect();
        Self { steps }
    }

    /// 从文件加载
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ScriptError::ScriptReadFailed(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self::from_text(&content))
    }

    /// 步骤行（保持文件顺序）
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// 步骤数量
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 解析全部步骤为命令
    pub fn commands(&self) -> Vec<Command> {
        self.steps.iter().map(|line| command::parse(line)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
# 登录场景
Open Browser
Navigate to https://example.com/login

// 输入凭据
Type admin in UsernameField
Tap on LoginButton
Verify WelcomeBanner is visible
"#;

    #[test]
    fn test_filters_comments_and_blanks() {
        let script = ScenarioScript::from_text(SCRIPT);
        assert_eq!(script.len(), 5);
        assert_eq!(script.steps()[0], "Open Browser");
        assert_eq!(script.steps()[4], "Verify WelcomeBanner is visible");
    }

    #[test]
    fn test_preserves_file_order() {
        let script = ScenarioScript::from_text(SCRIPT);
        let commands = script.commands();
        assert_eq!(commands[0], Command::OpenSession);
        assert!(matches!(commands[1], Command::Navigate { .. }));
        assert!(matches!(commands[2], Command::Type { .. }));
        assert!(matches!(commands[3], Command::Tap { .. }));
        assert!(matches!(commands[4], Command::Verify { .. }));
    }

    #[test]
    fn test_empty_text() {
        let script = ScenarioScript::from_text("# 只有注释\n\n");
        assert!(script.is_empty());
    }
}
