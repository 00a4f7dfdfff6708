//! 控制器构建器 - 合并配置文件与代码中的设置

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

use super::callbacks::{DismissFn, RenderFn};
use super::controller::NotificationController;
use super::settings::{GlobalSettings, SettingsLayer, Target};
use crate::config;

/// 控制器构建器
///
/// 代码中设置的字段覆盖配置文件中的同名字段；类型设置按类型名合并。
#[derive(Debug, Default)]
pub struct ControllerBuilder {
    config_path: Option<PathBuf>,
    defaults: SettingsLayer,
    types: BTreeMap<String, SettingsLayer>,
    auto_bind: Option<bool>,
}

impl ControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从配置文件读取基础设置
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn render(mut self, render: RenderFn) -> Self {
        self.defaults.render = Some(render);
        self
    }

    pub fn dismiss(mut self, dismiss: DismissFn) -> Self {
        self.defaults.dismiss = Some(dismiss);
        self
    }

    pub fn target(mut self, target: impl Into<Target>) -> Self {
        self.defaults.target = Some(target.into());
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.defaults.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.defaults.sticky = Some(sticky);
        self
    }

    pub fn closeable(mut self, closeable: bool) -> Self {
        self.defaults.closeable = Some(closeable);
        self
    }

    /// 添加（或合并）一个类型
    pub fn add_type(mut self, name: impl Into<String>, layer: SettingsLayer) -> Self {
        let name = name.into();
        let merged = match self.types.get(&name) {
            Some(existing) => existing.merged_with(&layer),
            None => layer,
        };
        self.types.insert(name, merged);
        self
    }

    pub fn auto_bind(mut self, auto_bind: bool) -> Self {
        self.auto_bind = Some(auto_bind);
        self
    }

    /// 只合并出设置，不创建控制器
    pub fn build_settings(self) -> Result<GlobalSettings> {
        let mut settings = match &self.config_path {
            Some(path) => config::load_settings(path)?,
            None => GlobalSettings::default(),
        };

        settings.defaults = settings.defaults.merged_with(&self.defaults);
        for (name, layer) in self.types {
            let merged = match settings.types.get(&name) {
                Some(existing) => existing.merged_with(&layer),
                None => layer,
            };
            settings.types.insert(name, merged);
        }
        if let Some(auto_bind) = self.auto_bind {
            settings.auto_bind_type_methods = auto_bind;
        }

        Ok(settings)
    }

    /// 构建 NotificationController
    pub fn build(self) -> Result<NotificationController> {
        let config_path = self.config_path.clone();
        let settings = self.build_settings()?;

        info!(
            config = ?config_path,
            types = settings.types.len(),
            has_render = settings.defaults.render.is_some(),
            has_dismiss = settings.defaults.dismiss.is_some(),
            "Building notification controller"
        );

        Ok(NotificationController::with_settings(settings))
    }
}
