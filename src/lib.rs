//! Growl Notify - Growl 风格通知分发器
//!
//! 分层设置（全局 → 类型 → 单次调用）+ 注入式渲染 / 定时移除。

pub mod config;
pub mod error;
pub mod notification;

pub use error::NotifyError;
pub use notification::{
    ControllerBuilder, Delivery, DismissFn, Dismisser, GlobalSettings, NotificationController,
    NotificationHandle, RenderFn, Renderer, ScheduledRemoval, SettingField, SettingValue,
    SettingsLayer, Target, TerminalSurface, TypeNotifier,
};
