//! 通知错误类型

use thiserror::Error;

use crate::notification::settings::NotificationHandle;

/// 通知相关错误
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 当前设置中没有可用的 render 回调
    #[error("Missing 'render' setting")]
    MissingRenderer,

    /// 非 sticky 通知没有可用的 dismiss 回调
    #[error("Missing 'dismiss' setting")]
    MissingDismisser,

    /// 调度移除定时器时不在 tokio runtime 中
    #[error("Cannot schedule removal outside of a tokio runtime")]
    NoRuntime,

    /// render 回调返回错误
    #[error("Render failed: {0}")]
    Render(#[source] anyhow::Error),

    /// dismiss 回调返回错误（定时器触发时）
    #[error("Dismiss failed for {handle}: {source}")]
    Dismiss {
        handle: NotificationHandle,
        #[source]
        source: anyhow::Error,
    },

    /// 没有为该类型绑定通知器
    #[error("No notifier bound for type '{0}'")]
    UnknownType(String),

    /// 类型通知器所属的 controller 已被释放
    #[error("Notification controller has been dropped")]
    ControllerDropped,

    /// 移除任务被取消或异常终止
    #[error("Scheduled removal was aborted")]
    RemovalAborted,
}

impl NotifyError {
    /// 是否属于配置错误（调用方需要修正设置，重试无意义）
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            NotifyError::MissingRenderer | NotifyError::MissingDismisser | NotifyError::NoRuntime
        )
    }
}

/// crate 内部 Result 类型
pub type Result<T> = std::result::Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(NotifyError::MissingRenderer.is_configuration());
        assert!(NotifyError::MissingDismisser.is_configuration());
        assert!(NotifyError::NoRuntime.is_configuration());
        assert!(!NotifyError::ControllerDropped.is_configuration());
        assert!(!NotifyError::Render(anyhow::anyhow!("boom")).is_configuration());
    }

    #[test]
    fn test_dismiss_error_message_includes_handle() {
        let err = NotifyError::Dismiss {
            handle: NotificationHandle::from("toast-7"),
            source: anyhow::anyhow!("element gone"),
        };
        assert_eq!(err.to_string(), "Dismiss failed for toast-7: element gone");
    }
}
