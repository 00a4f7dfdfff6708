//! 通知设置模型 - 全局 / 类型 / 单次调用三层设置
//!
//! 每一层都是一个 [`SettingsLayer`]，所有字段均为可选，`None` 表示"交给下一层"。
//! 层与层之间的优先级解析见 [`super::resolver`]。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::callbacks::{DismissFn, RenderFn};

/// 显示区域句柄（例如容器选择器），核心代码只透传，不解析
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// render 返回的通知句柄，dismiss 时原样传回
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationHandle(String);

impl NotificationHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationHandle {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NotificationHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for NotificationHandle {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// 单层设置（类型设置、单次调用设置、全局默认值共用）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsLayer {
    /// 通知类型名（如 "error"、"info"）
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// 显示区域
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// 自动移除前的停留时间（毫秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// 是否允许用户手动关闭（只透传给 render / dismiss）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closeable: Option<bool>,
    /// 为 true 时不自动移除
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticky: Option<bool>,
    #[serde(skip)]
    pub render: Option<RenderFn>,
    #[serde(skip)]
    pub dismiss: Option<DismissFn>,
    /// 调用方自定义字段（title、class 等），合并时按 key 覆盖
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_closeable(mut self, closeable: bool) -> Self {
        self.closeable = Some(closeable);
        self
    }

    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = Some(sticky);
        self
    }

    pub fn with_render(mut self, render: RenderFn) -> Self {
        self.render = Some(render);
        self
    }

    pub fn with_dismiss(mut self, dismiss: DismissFn) -> Self {
        self.dismiss = Some(dismiss);
        self
    }

    /// 设置自定义字段
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// 以 self 为底，`over` 中存在的字段覆盖 self
    pub fn merged_with(&self, over: &SettingsLayer) -> SettingsLayer {
        let mut merged = self.clone();
        merged.overwrite_from(over);
        merged
    }

    fn overwrite_from(&mut self, over: &SettingsLayer) {
        if over.kind.is_some() {
            self.kind = over.kind.clone();
        }
        if over.target.is_some() {
            self.target = over.target.clone();
        }
        if over.timeout_ms.is_some() {
            self.timeout_ms = over.timeout_ms;
        }
        if over.closeable.is_some() {
            self.closeable = over.closeable;
        }
        if over.sticky.is_some() {
            self.sticky = over.sticky;
        }
        if over.render.is_some() {
            self.render = over.render.clone();
        }
        if over.dismiss.is_some() {
            self.dismiss = over.dismiss.clone();
        }
        for (key, value) in &over.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// 浅合并多层设置：从左到右，后面的层覆盖前面的层
///
/// 只有存在的字段才会覆盖；`extra` 按 key 覆盖，不做深合并。
pub fn merge_layers(layers: &[&SettingsLayer]) -> SettingsLayer {
    let mut merged = SettingsLayer::default();
    for layer in layers {
        merged.overwrite_from(layer);
    }
    merged
}

fn default_auto_bind() -> bool {
    true
}

/// 全局设置 - 每次 `init` 整体替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// 全局默认值（最低优先级）
    #[serde(flatten)]
    pub defaults: SettingsLayer,
    /// 已注册的通知类型
    #[serde(default)]
    pub types: BTreeMap<String, SettingsLayer>,
    /// 是否自动绑定 render / dismiss 以及各类型的便捷通知器
    #[serde(default = "default_auto_bind")]
    pub auto_bind_type_methods: bool,
}

impl GlobalSettings {
    pub fn new(defaults: SettingsLayer) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, name: impl Into<String>, layer: SettingsLayer) -> Self {
        self.types.insert(name.into(), layer);
        self
    }

    pub fn with_auto_bind(mut self, auto_bind: bool) -> Self {
        self.auto_bind_type_methods = auto_bind;
        self
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            defaults: SettingsLayer::default(),
            types: BTreeMap::new(),
            auto_bind_type_methods: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_later_layer_wins() {
        let base = SettingsLayer::new().with_timeout_ms(500).with_sticky(false);
        let over = SettingsLayer::new().with_timeout_ms(800).with_closeable(true);

        let merged = merge_layers(&[&base, &over]);

        assert_eq!(merged.timeout_ms, Some(800));
        assert_eq!(merged.sticky, Some(false));
        assert_eq!(merged.closeable, Some(true));
    }

    #[test]
    fn test_merge_absent_fields_do_not_overwrite() {
        let base = SettingsLayer::new().with_kind("info").with_target("#growl");
        let merged = merge_layers(&[&base, &SettingsLayer::new()]);
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_extra_is_shallow() {
        let base = SettingsLayer::new()
            .with_extra("title", "Heads up")
            .with_extra("style", json!({"color": "red", "bold": true}));
        let over = SettingsLayer::new().with_extra("style", json!({"color": "blue"}));

        let merged = base.merged_with(&over);

        assert_eq!(merged.extra["title"], json!("Heads up"));
        // 嵌套对象整体替换
        assert_eq!(merged.extra["style"], json!({"color": "blue"}));
    }

    #[test]
    fn test_merge_empty_list() {
        assert_eq!(merge_layers(&[]), SettingsLayer::default());
    }

    #[test]
    fn test_layer_deserialize_collects_extra_keys() {
        let layer: SettingsLayer = serde_json::from_value(json!({
            "type": "error",
            "timeout_ms": 1500,
            "sticky": true,
            "class": "growl-error"
        }))
        .unwrap();

        assert_eq!(layer.kind.as_deref(), Some("error"));
        assert_eq!(layer.timeout_ms, Some(1500));
        assert_eq!(layer.sticky, Some(true));
        assert_eq!(layer.closeable, None);
        assert_eq!(layer.extra["class"], json!("growl-error"));
    }

    #[test]
    fn test_global_settings_defaults_to_auto_bind() {
        let settings: GlobalSettings = serde_json::from_value(json!({
            "target": "#growl",
            "timeout_ms": 3000,
            "types": { "info": { "timeout_ms": 1000 } }
        }))
        .unwrap();

        assert!(settings.auto_bind_type_methods);
        assert_eq!(settings.defaults.target, Some(Target::from("#growl")));
        assert_eq!(settings.defaults.timeout_ms, Some(3000));
        assert_eq!(settings.types["info"].timeout_ms, Some(1000));
        assert!(settings.defaults.extra.is_empty());
    }

    #[test]
    fn test_handle_conversions() {
        assert_eq!(NotificationHandle::from(3u64).as_str(), "3");
        assert_eq!(NotificationHandle::from("toast-1").to_string(), "toast-1");
    }
}
