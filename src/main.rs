//! Growl Notify CLI
//!
//! 在终端中显示 growl 风格通知，并查看分层设置的解析结果

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use growl_notify::config;
use growl_notify::{ControllerBuilder, NotificationController, SettingField, SettingsLayer, TerminalSurface};

#[derive(Parser)]
#[command(name = "growl")]
#[command(about = "Growl Notify - 分层设置的通知分发器")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/growl-notify/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示一条通知，等待其自动移除
    Notify {
        /// 通知内容
        text: String,
        /// 通知类型
        #[arg(long = "type", short = 't')]
        kind: Option<String>,
        /// 停留时间（毫秒）
        #[arg(long)]
        timeout: Option<u64>,
        /// 不自动移除（`--sticky=false` 覆盖配置中的 true）
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        sticky: Option<bool>,
        /// 允许手动关闭（`--closeable=false` 覆盖配置中的 true）
        #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        closeable: Option<bool>,
        /// 显示区域
        #[arg(long)]
        target: Option<String>,
        /// 标题
        #[arg(long)]
        title: Option<String>,
    },
    /// 列出已配置的通知类型
    Types {
        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 查看某个字段的解析结果
    Resolve {
        /// 字段名 (target/timeout/render/dismiss/sticky/closeable)
        field: SettingField,
        /// 通知类型
        #[arg(long = "type", short = 't')]
        kind: Option<String>,
    },
}

fn build_controller(config_path: PathBuf) -> Result<NotificationController> {
    let (render, dismiss) = Arc::new(TerminalSurface::stdout()).callbacks();
    ControllerBuilder::new()
        .config_path(config_path)
        .render(render)
        .dismiss(dismiss)
        .build()
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("growl_notify=info,growl=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::config_path);
    debug!(path = %config_path.display(), "Using config file");

    match cli.command {
        Commands::Notify {
            text,
            kind,
            timeout,
            sticky,
            closeable,
            target,
            title,
        } => {
            let controller = build_controller(config_path)?;

            let mut call = SettingsLayer::new();
            if let Some(kind) = kind {
                call = call.with_kind(kind);
            }
            if let Some(timeout) = timeout {
                call = call.with_timeout_ms(timeout);
            }
            if let Some(sticky) = sticky {
                call = call.with_sticky(sticky);
            }
            if let Some(closeable) = closeable {
                call = call.with_closeable(closeable);
            }
            if let Some(target) = target {
                call = call.with_target(target);
            }
            if let Some(title) = title {
                call = call.with_extra("title", title);
            }

            let delivery = controller.notify_with_removal(&text, call)?;
            match delivery.removal {
                Some(removal) => removal.wait().await?,
                None => info!(handle = %delivery.handle, "Sticky notification, not waiting for removal"),
            }
        }
        Commands::Types { json } => {
            let settings = config::load_settings(&config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings.types)?);
            } else if settings.types.is_empty() {
                println!("没有已配置的通知类型");
            } else {
                for (name, layer) in &settings.types {
                    println!("{:<12} {}", name, serde_json::to_string(layer)?);
                }
            }
        }
        Commands::Resolve { field, kind } => {
            let controller = build_controller(config_path)?;
            let call = match kind {
                Some(kind) => SettingsLayer::new().with_kind(kind),
                None => SettingsLayer::new(),
            };
            match controller.resolve(field, &call) {
                Some(value) => println!("{} = {}", field, value),
                None => println!("{} is not set", field),
            }
        }
    }

    Ok(())
}
