//! Check 命令处理
//!
//! 只解析不执行：列出每一步解析出的命令，并校验步骤引用的
//! 对象名都存在于对象映射中。

use anyhow::{Context, Result};
use colored::Colorize;

use uta_script::{command, Command, LocatorSpec, PageObjectMap, ScenarioScript};

pub async fn handle(script_path: String, objects_path: Option<String>) -> Result<()> {
    let script = ScenarioScript::from_file(&script_path)
        .with_context(|| format!("加载场景脚本失败: {}", script_path))?;

    let objects = match &objects_path {
        Some(path) => Some(
            PageObjectMap::from_file(path)
                .with_context(|| format!("加载对象映射失败: {}", path))?,
        ),
        None => None,
    };

    println!("场景: {} ({} 个步骤)\n", script_path.cyan(), script.len());

    let mut problems = 0usize;

    for raw in script.steps() {
        let cmd = command::parse(raw);

        let (icon, detail) = match &cmd {
            Command::Unknown { raw } => {
                problems += 1;
                ("✗".red(), format!("无法识别: {}", raw))
            }

            Command::Tap { object }
            | Command::Verify { object }
            | Command::Type { object, .. } => match objects.as_ref() {
                Some(map) => match map.get(object) {
                    Some(raw_locator) => {
                        let locator = LocatorSpec::parse(raw_locator);
                        ("✓".green(), format!("{} -> {}", object, locator))
                    }
                    None => {
                        problems += 1;
                        ("✗".red(), format!("对象未定义: {}", object))
                    }
                },
                None => ("-".yellow(), format!("{} (未提供对象映射)", object)),
            },

            Command::Navigate { url } => ("✓".green(), format!("导航 -> {}", url)),
            Command::Wait { seconds } => ("✓".green(), format!("等待 {} 秒", seconds)),
            Command::OpenSession => ("✓".green(), "打开会话".to_string()),
        };

        println!("{} {}  {}", icon, raw, detail.bright_black());
    }

    println!();
    if problems > 0 {
        anyhow::bail!("{} 个步骤存在问题", problems);
    }

    println!("{}", "校验通过".green().bold());
    Ok(())
}
