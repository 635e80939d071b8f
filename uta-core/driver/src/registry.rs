//! 会话注册表
//!
//! 平台枚举到会话工厂的固定映射。

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{DriverError, Platform, RecorderPort, Result, SessionFactory, SessionPort};

/// 会话注册表
///
/// 管理所有已注册平台的会话工厂。
pub struct SessionRegistry {
    /// 工厂映射
    factories: Arc<RwLock<HashMap<Platform, Box<dyn SessionFactory>>>>,
}

impl SessionRegistry {
    /// 创建新的会话注册表
    pub fn new() -> Self {
        Self {
            factories: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// 注册平台工厂
    pub async fn register(&self, factory: Box<dyn SessionFactory>) -> Result<()> {
        let platform = factory.platform();
        info!("注册平台: {}", platform);

        let mut factories = self.factories.write().await;

        if factories.contains_key(&platform) {
            return Err(DriverError::PlatformAlreadyRegistered(platform.to_string()));
        }

        factories.insert(platform, factory);

        Ok(())
    }

    /// 为指定平台创建新会话
    pub async fn open(&self, platform: Platform) -> Result<Box<dyn SessionPort>> {
        debug!("创建会话: {}", platform);

        let factories = self.factories.read().await;

        let factory = factories
            .get(&platform)
            .ok_or_else(|| DriverError::PlatformNotRegistered(platform.to_string()))?;

        factory.open().await
    }

    /// 为指定平台创建录屏器
    pub async fn recorder_for(&self, platform: Platform) -> Result<Box<dyn RecorderPort>> {
        let factories = self.factories.read().await;

        let factory = factories
            .get(&platform)
            .ok_or_else(|| DriverError::PlatformNotRegistered(platform.to_string()))?;

        Ok(factory.recorder())
    }

    /// 已注册的平台列表
    pub async fn list(&self) -> Vec<Platform> {
        let factories = self.factories.read().await;
        factories.keys().copied().collect()
    }

    /// 检查平台是否已注册
    pub async fn is_registered(&self, platform: Platform) -> bool {
        let factories = self.factories.read().await;
        factories.contains_key(&platform)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
