//! 终端显示面 - 把通知和移除事件逐行写到输出流

use anyhow::{anyhow, Result};
use chrono::Local;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::notification::callbacks::{DismissFn, Dismisser, RenderFn, Renderer};
use crate::notification::settings::{NotificationHandle, SettingsLayer, Target};

/// 终端显示面，句柄格式为 `toast-N`
pub struct TerminalSurface {
    next_id: AtomicU64,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSurface {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// 同一个显示面同时作为 render 和 dismiss
    pub fn callbacks(self: Arc<Self>) -> (RenderFn, DismissFn) {
        (RenderFn::from_arc(self.clone()), DismissFn::from_arc(self))
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("terminal writer poisoned"))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

/// 格式化一条通知
///
/// `[时间] [TYPE] 标题: 正文 [x]`，`title` 取自自定义字段，`[x]` 表示可关闭。
pub fn format_notification(
    timestamp: &str,
    target: Option<&Target>,
    text: &str,
    kind: Option<&str>,
    closeable: Option<bool>,
    settings: &SettingsLayer,
) -> String {
    let mut line = format!("[{}]", timestamp);
    if let Some(target) = target {
        line.push_str(&format!(" {}", target));
    }
    line.push_str(&format!(" [{}]", kind.unwrap_or("notice").to_uppercase()));
    match settings.extra.get("title").and_then(|v| v.as_str()) {
        Some(title) => line.push_str(&format!(" {}: {}", title, text)),
        None => line.push_str(&format!(" {}", text)),
    }
    if closeable == Some(true) {
        line.push_str(" [x]");
    }
    line
}

fn now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

impl Renderer for TerminalSurface {
    fn render(
        &self,
        target: Option<&Target>,
        text: &str,
        kind: Option<&str>,
        closeable: Option<bool>,
        settings: &SettingsLayer,
    ) -> Result<NotificationHandle> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let handle = NotificationHandle::new(format!("toast-{}", id));

        self.write_line(&format_notification(&now(), target, text, kind, closeable, settings))?;
        debug!(surface = "terminal", handle = %handle, "Notification rendered");
        Ok(handle)
    }
}

impl Dismisser for TerminalSurface {
    fn dismiss(
        &self,
        _target: Option<&Target>,
        handle: &NotificationHandle,
        kind: Option<&str>,
        _closeable: Option<bool>,
        _settings: &SettingsLayer,
    ) -> Result<()> {
        let kind = kind.map(|k| format!(" ({})", k)).unwrap_or_default();
        self.write_line(&format!("[{}] dismissed {}{}", now(), handle, kind))
    }
}
