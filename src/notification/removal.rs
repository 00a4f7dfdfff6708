//! 定时移除 - 非 sticky 通知在 timeout 后调用 dismiss

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::callbacks::DismissFn;
use super::resolver::EffectiveSettings;
use super::settings::NotificationHandle;
use crate::error::{NotifyError, Result};

/// 一个待执行的移除任务
///
/// drop 后任务继续在后台运行；调用 [`ScheduledRemoval::cancel`] 才会取消。
#[derive(Debug)]
pub struct ScheduledRemoval {
    handle: NotificationHandle,
    task: JoinHandle<Result<()>>,
}

impl ScheduledRemoval {
    /// 在当前 tokio runtime 上调度移除
    ///
    /// 缺少 dismiss 或不在 runtime 中时同步返回配置错误。
    pub(crate) fn schedule(handle: NotificationHandle, effective: EffectiveSettings) -> Result<Self> {
        let (dismiss, runtime) = Self::prepare(&effective)?;
        let delay = effective.timeout();

        let task_handle = handle.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let result = dismiss.dismiss(
                effective.target.as_ref(),
                &task_handle,
                effective.kind.as_deref(),
                effective.closeable,
                &effective.merged,
            );

            match result {
                Ok(()) => {
                    debug!(handle = %task_handle, kind = ?effective.kind, "Notification dismissed");
                    Ok(())
                }
                Err(e) => {
                    error!(handle = %task_handle, error = %e, "Dismiss failed");
                    Err(NotifyError::Dismiss {
                        handle: task_handle,
                        source: e,
                    })
                }
            }
        });

        debug!(handle = %handle, delay_ms = delay.as_millis() as u64, "Removal scheduled");
        Ok(Self { handle, task })
    }

    /// 检查能否调度移除（render 之前调用，避免留下无法移除的通知）
    pub(crate) fn ensure_schedulable(effective: &EffectiveSettings) -> Result<()> {
        Self::prepare(effective).map(|_| ())
    }

    fn prepare(effective: &EffectiveSettings) -> Result<(DismissFn, Handle)> {
        let dismiss = effective.dismiss.clone().ok_or(NotifyError::MissingDismisser)?;
        let runtime = Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;
        Ok((dismiss, runtime))
    }

    /// 对应的通知句柄
    pub fn handle(&self) -> &NotificationHandle {
        &self.handle
    }

    /// dismiss 是否已执行完毕（或任务已被取消）
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// 取消尚未触发的移除，dismiss 不会再被调用
    pub fn cancel(self) {
        debug!(handle = %self.handle, "Removal cancelled");
        self.task.abort();
    }

    /// 等待移除完成，返回 dismiss 的结果
    pub async fn wait(self) -> Result<()> {
        match self.task.await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::RemovalAborted),
        }
    }
}

/// 移除延迟的可读描述（用于日志）
pub(crate) fn describe_delay(delay: Duration) -> String {
    if delay.is_zero() {
        "immediately".to_string()
    } else {
        format!("in {}ms", delay.as_millis())
    }
}
