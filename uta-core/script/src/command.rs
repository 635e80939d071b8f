//! 步骤命令解析
//!
//! 将一行场景文本解析为类型化命令。识别规则按固定优先级
//! 依次尝试，任何未匹配的行都得到 `Unknown`，解析本身永不失败。

use regex::Regex;

/// 场景步骤命令
///
/// 每行脚本解析出一条命令，命令本身不携带行号之外的身份。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 打开会话（会话已由执行器创建，此命令为空操作）
    OpenSession,

    /// 导航到指定 URL
    Navigate { url: String },

    /// 点击页面对象
    Tap { object: String },

    /// 向页面对象输入文本
    Type { text: String, object: String },

    /// 校验页面对象可见
    Verify { object: String },

    /// 等待固定秒数
    Wait { seconds: u64 },

    /// 无法识别的行
    Unknown { raw: String },
}

/// 判断一行是否为可执行步骤
///
/// 空行以及 `#`、`//` 开头的注释行在解析之前被过滤掉，
/// 不会成为命令。
pub fn is_step(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.starts_with("//")
}

/// 将一行场景文本解析为命令
///
/// 纯函数且全函数：同一输入永远得到结构相等的命令。
/// 除第 1 条规则外所有前缀匹配均区分大小写。
pub fn parse(line: &str) -> Command {
    let line = line.trim();

    // 1. 打开会话（唯一不区分大小写的规则）
    if line.eq_ignore_ascii_case("open browser") {
        return Command::OpenSession;
    }

    // 2. 导航
    if let Some(rest) = line.strip_prefix("Navigate to ") {
        return Command::Navigate {
            url: rest.trim().to_string(),
        };
    }

    // 3. 等待：取行内出现的第一串数字（"Wait for N seconds" 形式）；
    //    没有数字时继续往下匹配
    if line.strip_prefix("Wait for ").is_some() {
        if let Some(seconds) = extract_seconds(line) {
            return Command::Wait { seconds };
        }
    }

    // 4. 点击
    if let Some(rest) = line
        .strip_prefix("Tap on ")
        .or_else(|| line.strip_prefix("Click on "))
    {
        return Command::Tap {
            object: rest.trim().to_string(),
        };
    }

    // 5. 输入：以第一个 " in " 为分隔，左侧为文本，右侧为对象名；
    //    对象名中出现的后续 " in " 保留在右侧
    if let Some(rest) = line.strip_prefix("Type ") {
        if let Some((text, object)) = rest.split_once(" in ") {
            return Command::Type {
                text: text.trim().to_string(),
                object: object.trim().to_string(),
            };
        }
    }

    // 6. 可见性校验
    if let Some(rest) = line.strip_prefix("Verify ") {
        if let Some(object) = rest.strip_suffix(" is visible") {
            return Command::Verify {
                object: object.trim().to_string(),
            };
        }
    }

    // 7. 其余全部视为未知命令
    Command::Unknown {
        raw: line.to_string(),
    }
}

/// 提取行内第一串十进制数字
fn extract_seconds(line: &str) -> Option<u64> {
    Regex::new(r"\d+")
        .ok()
        .and_then(|re| re.find(line).and_then(|m| m.as_str().parse().ok()))
}
