//! 批次编排器
//!
//! 以固定大小的工作池并行执行一批场景，整个批次受统一时限
//! 约束。场景之间完全独立：不共享会话、不共享状态、完成
//! 顺序不作保证，单个场景的失败不会中断兄弟场景。

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};
use tracing::{error, info, warn};

use chrono::Utc;
use uta_common::{ScenarioOutcome, ScenarioStatus};
use uta_driver::SessionRegistry;
use uta_notify::NotifierPort;

use crate::{BatchConfig, BatchReport, ExecutorError, ScenarioConfig, ScenarioRunner};

/// 批次编排器
pub struct Orchestrator {
    /// 平台会话注册表
    registry: Arc<SessionRegistry>,

    /// 结果通知通道
    notifier: Arc<dyn NotifierPort>,

    /// 批次配置
    config: BatchConfig,
}

impl Orchestrator {
    /// 创建新的编排器
    ///
    /// 所有依赖显式传入，没有进程级单例。
    pub fn new(
        registry: Arc<SessionRegistry>,
        notifier: Arc<dyn NotifierPort>,
        config: BatchConfig,
    ) -> Self {
        Self {
            registry,
            notifier,
            config,
        }
    }

    /// 并行执行一批场景
    ///
    /// 时限到达时仍未结束的场景（包括还在排队等待工作池的）
    /// 被强制取消并记为超时失败，其余场景不受影响。
    pub async fn run(&self, configs: Vec<ScenarioConfig>) -> BatchReport {
        let start = Instant::now();
        let deadline = start + Duration::from_secs(self.config.deadline_secs);
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent));

        info!(
            "开始批次执行: {} 个场景, 工作池 {}, 时限 {}s",
            configs.len(),
            self.config.max_concurrent,
            self.config.deadline_secs
        );

        let mut handles = Vec::with_capacity(configs.len());

        for config in configs {
            let scenario_id = config.scenario_id();
            let task_id = scenario_id.clone();
            let semaphore = Arc::clone(&semaphore);
            let notifier = Arc::clone(&self.notifier);
            let runner =
                ScenarioRunner::new(Arc::clone(&self.registry), Arc::clone(&self.notifier));

            let handle = tokio::spawn(async move {
                let scenario = async {
                    // 工作池满时在此排队，排队时间同样计入批次时限
                    let _permit = semaphore.acquire_owned().await.ok();
                    runner.run(&config).await
                };

                match timeout_at(deadline, scenario).await {
                    // 正常结束，结果已由执行器上报
                    Ok(outcome) => outcome,

                    // 时限到达：场景被强制取消，执行器已无法上报，
                    // 由此处代为合成并上报超时结果
                    Err(_) => {
                        warn!("场景 {} 超出批次时限, 已强制取消", task_id);

                        let outcome = Self::synthesize(
                            &task_id,
                            ExecutorError::ScenarioTimeout.to_string(),
                        );
                        if let Err(e) = notifier.send(&outcome).await {
                            warn!("场景 {} 超时结果上报失败: {}", task_id, e);
                        }
                        outcome
                    }
                }
            });

            handles.push((scenario_id, handle));
        }

        // 按声明顺序收集；每个任务最迟在时限到达后立即返回
        let mut outcomes = Vec::with_capacity(handles.len());
        for (scenario_id, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(join_err) => {
                    error!("场景 {} 任务异常退出: {}", scenario_id, join_err);

                    let outcome =
                        Self::synthesize(&scenario_id, format!("任务异常退出: {}", join_err));
                    if let Err(e) = self.notifier.send(&outcome).await {
                        warn!("场景 {} 结果上报失败: {}", scenario_id, e);
                    }
                    outcomes.push(outcome);
                }
            }
        }

        let report = BatchReport::new(outcomes, start.elapsed().as_millis() as u64);
        info!(
            "批次执行完成: {}/{} 通过, 耗时 {} ms",
            report.passed, report.total, report.duration_ms
        );
        report
    }

    /// 为无法正常结束的场景合成失败结果
    fn synthesize(scenario_id: &str, error: String) -> ScenarioOutcome {
        ScenarioOutcome {
            scenario_id: scenario_id.to_string(),
            status: ScenarioStatus::Failed,
            failed_step: None,
            error: Some(error),
            video: None,
            duration_ms: 0,
            finished_at: Utc::now(),
        }
    }
}
