//! 通知核心 - 分层设置解析与通知生命周期
//!
//! # 设计目标
//! 1. 渲染解耦：显示与移除都由调用方注入（`Renderer` / `Dismisser`）
//! 2. 分层设置：调用设置 > 类型设置 > 全局设置，逐字段解析
//! 3. 生命周期：render 同步显示，非 sticky 通知在 timeout 后自动 dismiss
//! 4. 显式注册表：类型通知器按名字查找，不做动态方法注入
//!
//! # 使用示例
//! ```ignore
//! use growl_notify::notification::{ControllerBuilder, SettingsLayer, TerminalSurface};
//!
//! let (render, dismiss) = Arc::new(TerminalSurface::stdout()).callbacks();
//! let controller = ControllerBuilder::new()
//!     .render(render)
//!     .dismiss(dismiss)
//!     .timeout_ms(3000)
//!     .add_type("error", SettingsLayer::new().with_sticky(true))
//!     .build()?;
//!
//! controller.notify("Saved", SettingsLayer::new())?;
//! controller.notify_as("error", "Disk full", SettingsLayer::new())?;
//! ```

pub mod builder;
pub mod callbacks;
pub mod controller;
pub mod registry;
pub mod removal;
pub mod resolver;
pub mod settings;
pub mod surfaces;

pub use builder::ControllerBuilder;
pub use callbacks::{DismissFn, Dismisser, RenderFn, Renderer};
pub use controller::{Delivery, NotificationController};
pub use registry::TypeNotifier;
pub use removal::ScheduledRemoval;
pub use resolver::{resolve, resolve_with, EffectiveSettings, SettingField, SettingValue};
pub use settings::{merge_layers, GlobalSettings, NotificationHandle, SettingsLayer, Target};
pub use surfaces::TerminalSurface;
