//! 设置解析 - 按 调用 > 类型 > 全局 的优先级逐字段解析

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::callbacks::{DismissFn, RenderFn};
use super::settings::{merge_layers, GlobalSettings, SettingsLayer, Target};

/// 可解析的设置字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Target,
    Timeout,
    Render,
    Dismiss,
    Sticky,
    Closeable,
}

impl SettingField {
    pub const ALL: [SettingField; 6] = [
        SettingField::Target,
        SettingField::Timeout,
        SettingField::Render,
        SettingField::Dismiss,
        SettingField::Sticky,
        SettingField::Closeable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingField::Target => "target",
            SettingField::Timeout => "timeout",
            SettingField::Render => "render",
            SettingField::Dismiss => "dismiss",
            SettingField::Sticky => "sticky",
            SettingField::Closeable => "closeable",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "target" => Ok(SettingField::Target),
            "timeout" | "timeout_ms" => Ok(SettingField::Timeout),
            "render" => Ok(SettingField::Render),
            "dismiss" => Ok(SettingField::Dismiss),
            "sticky" => Ok(SettingField::Sticky),
            "closeable" => Ok(SettingField::Closeable),
            other => Err(format!("unknown setting field: {}", other)),
        }
    }
}

/// 解析出的设置值
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Target(Target),
    Timeout(u64),
    Render(RenderFn),
    Dismiss(DismissFn),
    Sticky(bool),
    Closeable(bool),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Target(target) => write!(f, "{}", target),
            SettingValue::Timeout(ms) => write!(f, "{}ms", ms),
            SettingValue::Render(_) => f.write_str("<render>"),
            SettingValue::Dismiss(_) => f.write_str("<dismiss>"),
            SettingValue::Sticky(v) | SettingValue::Closeable(v) => write!(f, "{}", v),
        }
    }
}

/// 用取值函数解析单个字段
///
/// 1. 调用层存在则返回
/// 2. 调用层带 type 且该类型设置中存在则返回
/// 3. 全局默认值存在则返回
/// 4. 否则 `None`
pub fn resolve_with<T>(
    global: &GlobalSettings,
    call: &SettingsLayer,
    pick: impl Fn(&SettingsLayer) -> Option<T>,
) -> Option<T> {
    pick(call)
        .or_else(|| {
            call.kind
                .as_deref()
                .and_then(|kind| global.types.get(kind))
                .and_then(&pick)
        })
        .or_else(|| pick(&global.defaults))
}

/// 按字段名解析
pub fn resolve(field: SettingField, global: &GlobalSettings, call: &SettingsLayer) -> Option<SettingValue> {
    match field {
        SettingField::Target => resolve_with(global, call, |l| l.target.clone()).map(SettingValue::Target),
        SettingField::Timeout => resolve_with(global, call, |l| l.timeout_ms).map(SettingValue::Timeout),
        SettingField::Render => resolve_with(global, call, |l| l.render.clone()).map(SettingValue::Render),
        SettingField::Dismiss => resolve_with(global, call, |l| l.dismiss.clone()).map(SettingValue::Dismiss),
        SettingField::Sticky => resolve_with(global, call, |l| l.sticky).map(SettingValue::Sticky),
        SettingField::Closeable => resolve_with(global, call, |l| l.closeable).map(SettingValue::Closeable),
    }
}

/// 一条通知的有效设置
#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    /// 通知类型（来自调用层）
    pub kind: Option<String>,
    pub target: Option<Target>,
    pub timeout_ms: Option<u64>,
    pub closeable: Option<bool>,
    pub sticky: Option<bool>,
    pub render: Option<RenderFn>,
    pub dismiss: Option<DismissFn>,
    /// 原样传给 render / dismiss 的合并设置
    pub merged: SettingsLayer,
}

impl EffectiveSettings {
    /// 计算一次调用的有效设置
    ///
    /// 传给回调的 `merged` 以调用设置为底、类型设置覆盖；
    /// 而各字段解析时调用层优先于类型层。两者方向相反，保持兼容。
    pub fn resolve(global: &GlobalSettings, call: &SettingsLayer) -> Self {
        let kind = call.kind.clone();
        let merged = match kind.as_deref().and_then(|k| global.types.get(k)) {
            Some(type_settings) => merge_layers(&[call, type_settings]),
            None => call.clone(),
        };

        Self {
            target: resolve_with(global, &merged, |l| l.target.clone()),
            timeout_ms: resolve_with(global, &merged, |l| l.timeout_ms),
            closeable: resolve_with(global, &merged, |l| l.closeable),
            sticky: resolve_with(global, &merged, |l| l.sticky),
            render: resolve_with(global, &merged, |l| l.render.clone()),
            dismiss: resolve_with(global, &merged, |l| l.dismiss.clone()),
            kind,
            merged,
        }
    }

    /// 只有显式 `sticky == true` 才跳过自动移除
    pub fn is_sticky(&self) -> bool {
        self.sticky == Some(true)
    }

    /// 未设置 timeout 时立即移除
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(0))
    }
}
