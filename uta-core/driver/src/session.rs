//! 会话端口
//!
//! 解释器唯一依赖的自动化能力面。

use async_trait::async_trait;
use uta_script::LocatorSpec;

use crate::{Platform, RecorderPort, Result};

/// 会话端口
///
/// 所有会话后端必须实现此 trait。
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// 导航到指定 URL
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// 点击定位到的元素
    async fn tap(&mut self, locator: &LocatorSpec) -> Result<()>;

    /// 向定位到的元素输入文本
    async fn type_text(&mut self, text: &str, locator: &LocatorSpec) -> Result<()>;

    /// 校验元素可见
    ///
    /// 阻塞等待直到元素可见或后端的有界等待耗尽，仍不可见时
    /// 返回 `NotVisible`。
    async fn verify_visible(&mut self, locator: &LocatorSpec) -> Result<()>;

    /// 退出会话
    ///
    /// 会话退出后不可复用，每次场景执行都会创建新会话。
    async fn quit(&mut self) -> Result<()>;

    /// 会话所属平台
    fn platform(&self) -> Platform;
}

/// 会话工厂
///
/// 为单一平台创建会话与录屏器。录屏实现随平台在会话创建时
/// 一次性确定，不做运行期类型检查。
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// 创建新会话
    async fn open(&self) -> Result<Box<dyn SessionPort>>;

    /// 创建本平台对应的录屏器
    fn recorder(&self) -> Box<dyn RecorderPort>;

    /// 工厂服务的平台
    fn platform(&self) -> Platform;
}
