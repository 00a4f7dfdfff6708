//! 通知控制器 - 管理全局设置、类型注册，并驱动 显示 → 定时移除 流程

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use super::callbacks::{DismissFn, RenderFn};
use super::registry::TypeNotifier;
use super::removal::{describe_delay, ScheduledRemoval};
use super::resolver::{self, EffectiveSettings, SettingField, SettingValue};
use super::settings::{GlobalSettings, NotificationHandle, SettingsLayer, Target};
use crate::error::{NotifyError, Result};

/// 控制器内部状态
#[derive(Debug, Default)]
pub(crate) struct ControllerState {
    settings: GlobalSettings,
    /// 类型名 → 已绑定的便捷通知器
    notifiers: HashMap<String, TypeNotifier>,
    bound_render: Option<RenderFn>,
    bound_dismiss: Option<DismissFn>,
}

/// 一次通知的结果：句柄 + 可选的移除任务（sticky 时为 None）
#[derive(Debug)]
pub struct Delivery {
    pub handle: NotificationHandle,
    pub removal: Option<ScheduledRemoval>,
}

/// 通知控制器
///
/// 克隆开销很小，所有克隆共享同一份设置。控制器不跟踪已显示的通知，
/// 每条通知的生命周期只由创建时调度的移除任务驱动。
///
/// 回调中持有控制器克隆会形成引用环，此时需调用 [`NotificationController::shutdown`] 释放。
#[derive(Debug, Clone, Default)]
pub struct NotificationController {
    state: Arc<RwLock<ControllerState>>,
}

impl NotificationController {
    /// 创建使用默认设置的控制器
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建并立即 init
    pub fn with_settings(settings: GlobalSettings) -> Self {
        let controller = Self::new();
        controller.init(settings);
        controller
    }

    pub(crate) fn from_state(state: Arc<RwLock<ControllerState>>) -> Self {
        Self { state }
    }

    fn read(&self) -> RwLockReadGuard<'_, ControllerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ControllerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 整体替换全局设置，返回全局 target
    ///
    /// 之前的类型设置和绑定的通知器全部丢弃。开启自动绑定时，
    /// 为 `settings.types` 中的每个类型重新注册通知器。
    pub fn init(&self, settings: GlobalSettings) -> Option<Target> {
        let target = settings.defaults.target.clone();
        let auto_bind = settings.auto_bind_type_methods;
        let initial_types: Vec<(String, SettingsLayer)> = if auto_bind {
            settings.types.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        } else {
            Vec::new()
        };

        {
            let mut state = self.write();
            state.notifiers.clear();
            if auto_bind {
                state.bound_render = settings.defaults.render.clone();
                state.bound_dismiss = settings.defaults.dismiss.clone();
            } else {
                state.bound_render = None;
                state.bound_dismiss = None;
            }
            state.settings = settings;
        }

        for (name, layer) in initial_types {
            self.register_type(&name, layer);
        }

        info!(
            surface = ?target,
            types = self.read().settings.types.len(),
            auto_bind,
            "Notification controller initialised"
        );
        target
    }

    /// 清空全部设置、类型通知器和绑定的回调
    ///
    /// 回调捕获的控制器克隆随之释放；之后类型通知器在最后一个控制器
    /// 被 drop 时返回 [`NotifyError::ControllerDropped`]。
    pub fn shutdown(&self) {
        let old = std::mem::take(&mut *self.write());
        info!(types = old.settings.types.len(), "Notification controller shut down");
        drop(old);
    }

    /// 显示一条通知并返回其句柄，非 sticky 时在后台调度移除
    ///
    /// 移除任务在后台分离运行，定时触发时 dismiss 的错误只记录日志；
    /// 需要拿到该错误时改用 [`NotificationController::notify_with_removal`] 并 `wait()`。
    pub fn notify(&self, text: &str, call: SettingsLayer) -> Result<NotificationHandle> {
        self.notify_with_removal(text, call).map(|delivery| delivery.handle)
    }

    /// 显示一条通知，同时返回移除任务以便等待或取消
    ///
    /// 缺少 render，或非 sticky 但缺少 dismiss / runtime 时，
    /// 在调用 render 之前同步返回配置错误。
    pub fn notify_with_removal(&self, text: &str, call: SettingsLayer) -> Result<Delivery> {
        let effective = {
            let state = self.read();
            EffectiveSettings::resolve(&state.settings, &call)
        };

        let render = effective.render.clone().ok_or(NotifyError::MissingRenderer)?;
        let sticky = effective.is_sticky();
        if !sticky {
            ScheduledRemoval::ensure_schedulable(&effective)?;
        }

        let handle = render
            .render(
                effective.target.as_ref(),
                text,
                effective.kind.as_deref(),
                effective.closeable,
                &effective.merged,
            )
            .map_err(NotifyError::Render)?;

        if sticky {
            debug!(handle = %handle, kind = ?effective.kind, "Sticky notification displayed");
            return Ok(Delivery {
                handle,
                removal: None,
            });
        }

        debug!(
            handle = %handle,
            kind = ?effective.kind,
            "Notification displayed, removal {}",
            describe_delay(effective.timeout())
        );
        let removal = ScheduledRemoval::schedule(handle.clone(), effective)?;
        Ok(Delivery {
            handle,
            removal: Some(removal),
        })
    }

    /// 注册新类型或合并已有类型的设置，返回该类型的通知器
    ///
    /// 已有设置为底，新设置覆盖。开启自动绑定时通知器同时写入注册表。
    pub fn register_type(&self, name: &str, partial: SettingsLayer) -> TypeNotifier {
        let notifier = TypeNotifier::new(name, Arc::downgrade(&self.state));

        let mut state = self.write();
        let merged = match state.settings.types.get(name) {
            Some(existing) => existing.merged_with(&partial),
            None => partial,
        };
        state.settings.types.insert(name.to_string(), merged);

        let bound = state.settings.auto_bind_type_methods;
        if bound {
            state.notifiers.insert(name.to_string(), notifier.clone());
        }
        debug!(kind = name, bound, "Notification type registered");

        notifier
    }

    /// 移除类型设置及其通知器，未知类型直接忽略
    pub fn unregister_type(&self, name: &str) {
        let mut state = self.write();
        let had_notifier = state.notifiers.remove(name).is_some();
        let had_settings = state.settings.types.remove(name).is_some();

        if had_notifier || had_settings {
            debug!(kind = name, "Notification type unregistered");
        } else {
            debug!(kind = name, "Unregistering unknown type, ignored");
        }
    }

    /// 按类型名查找已绑定的通知器
    pub fn type_notifier(&self, name: &str) -> Option<TypeNotifier> {
        self.read().notifiers.get(name).cloned()
    }

    /// 通过已绑定的类型通知器发送
    pub fn notify_as(&self, name: &str, text: &str, call: SettingsLayer) -> Result<NotificationHandle> {
        let notifier = self
            .type_notifier(name)
            .ok_or_else(|| NotifyError::UnknownType(name.to_string()))?;
        notifier.notify(text, call)
    }

    /// 已存储的类型设置
    pub fn type_settings(&self, name: &str) -> Option<SettingsLayer> {
        self.read().settings.types.get(name).cloned()
    }

    /// 所有已注册类型名（有序）
    pub fn type_names(&self) -> Vec<String> {
        self.read().settings.types.keys().cloned().collect()
    }

    /// init 时绑定的全局 render
    pub fn bound_renderer(&self) -> Option<RenderFn> {
        self.read().bound_render.clone()
    }

    /// init 时绑定的全局 dismiss
    pub fn bound_dismisser(&self) -> Option<DismissFn> {
        self.read().bound_dismiss.clone()
    }

    /// 当前全局设置的快照
    pub fn settings(&self) -> GlobalSettings {
        self.read().settings.clone()
    }

    /// 针对给定调用设置解析单个字段
    pub fn resolve(&self, field: SettingField, call: &SettingsLayer) -> Option<SettingValue> {
        resolver::resolve(field, &self.read().settings, call)
    }
}
