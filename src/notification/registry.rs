//! 类型通知器 - 绑定到某个类型的便捷通知方法

use std::sync::{RwLock, Weak};

use super::controller::{ControllerState, Delivery, NotificationController};
use super::settings::{NotificationHandle, SettingsLayer};
use crate::error::{NotifyError, Result};

/// 绑定到某个通知类型的通知器
///
/// 发送时强制把调用设置的 `type` 设为绑定的类型（覆盖调用方传入的值）。
/// 只持有控制器的弱引用，控制器释放后调用返回 [`NotifyError::ControllerDropped`]。
#[derive(Debug, Clone)]
pub struct TypeNotifier {
    kind: String,
    state: Weak<RwLock<ControllerState>>,
}

impl TypeNotifier {
    pub(crate) fn new(kind: &str, state: Weak<RwLock<ControllerState>>) -> Self {
        Self {
            kind: kind.to_string(),
            state,
        }
    }

    /// 绑定的类型名
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn notify(&self, text: &str, call: SettingsLayer) -> Result<NotificationHandle> {
        self.controller()?.notify(text, call.with_kind(self.kind.as_str()))
    }

    pub fn notify_with_removal(&self, text: &str, call: SettingsLayer) -> Result<Delivery> {
        self.controller()?
            .notify_with_removal(text, call.with_kind(self.kind.as_str()))
    }

    fn controller(&self) -> Result<NotificationController> {
        self.state
            .upgrade()
            .map(NotificationController::from_state)
            .ok_or(NotifyError::ControllerDropped)
    }
}
