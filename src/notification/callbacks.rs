//! render / dismiss 回调 trait 定义
//!
//! 渲染与移除都由调用方注入，核心只负责在正确的时机调用它们。
//! 闭包可以直接作为回调使用，也可以为自定义类型实现 trait。

use anyhow::Result;
use std::fmt;
use std::sync::Arc;

use super::settings::{NotificationHandle, SettingsLayer, Target};

/// 渲染回调：同步显示一条通知并返回其句柄
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        target: Option<&Target>,
        text: &str,
        kind: Option<&str>,
        closeable: Option<bool>,
        settings: &SettingsLayer,
    ) -> Result<NotificationHandle>;
}

/// 移除回调：移除 `handle` 对应的通知
pub trait Dismisser: Send + Sync {
    fn dismiss(
        &self,
        target: Option<&Target>,
        handle: &NotificationHandle,
        kind: Option<&str>,
        closeable: Option<bool>,
        settings: &SettingsLayer,
    ) -> Result<()>;
}

impl<F> Renderer for F
where
    F: Fn(Option<&Target>, &str, Option<&str>, Option<bool>, &SettingsLayer) -> Result<NotificationHandle>
        + Send
        + Sync,
{
    fn render(
        &self,
        target: Option<&Target>,
        text: &str,
        kind: Option<&str>,
        closeable: Option<bool>,
        settings: &SettingsLayer,
    ) -> Result<NotificationHandle> {
        self(target, text, kind, closeable, settings)
    }
}

impl<F> Dismisser for F
where
    F: Fn(Option<&Target>, &NotificationHandle, Option<&str>, Option<bool>, &SettingsLayer) -> Result<()>
        + Send
        + Sync,
{
    fn dismiss(
        &self,
        target: Option<&Target>,
        handle: &NotificationHandle,
        kind: Option<&str>,
        closeable: Option<bool>,
        settings: &SettingsLayer,
    ) -> Result<()> {
        self(target, handle, kind, closeable, settings)
    }
}

/// 可克隆、可放入设置层的渲染回调
#[derive(Clone)]
pub struct RenderFn(Arc<dyn Renderer>);

impl RenderFn {
    pub fn new<R: Renderer + 'static>(renderer: R) -> Self {
        Self(Arc::new(renderer))
    }

    /// 从闭包创建（直接约束 Fn 签名，闭包参数无需标注类型）
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Option<&Target>, &str, Option<&str>, Option<bool>, &SettingsLayer) -> Result<NotificationHandle>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn from_arc(renderer: Arc<dyn Renderer>) -> Self {
        Self(renderer)
    }

    pub fn render(
        &self,
        target: Option<&Target>,
        text: &str,
        kind: Option<&str>,
        closeable: Option<bool>,
        settings: &SettingsLayer,
    ) -> Result<NotificationHandle> {
        self.0.render(target, text, kind, closeable, settings)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFn(..)")
    }
}

impl PartialEq for RenderFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// 可克隆、可放入设置层的移除回调
#[derive(Clone)]
pub struct DismissFn(Arc<dyn Dismisser>);

impl DismissFn {
    pub fn new<D: Dismisser + 'static>(dismisser: D) -> Self {
        Self(Arc::new(dismisser))
    }

    /// 从闭包创建
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Option<&Target>, &NotificationHandle, Option<&str>, Option<bool>, &SettingsLayer) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn from_arc(dismisser: Arc<dyn Dismisser>) -> Self {
        Self(dismisser)
    }

    pub fn dismiss(
        &self,
        target: Option<&Target>,
        handle: &NotificationHandle,
        kind: Option<&str>,
        closeable: Option<bool>,
        settings: &SettingsLayer,
    ) -> Result<()> {
        self.0.dismiss(target, handle, kind, closeable, settings)
    }
}

impl fmt::Debug for DismissFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DismissFn(..)")
    }
}

impl PartialEq for DismissFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
