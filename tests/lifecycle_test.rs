//! 通知生命周期测试：render → 定时 dismiss

use growl_notify::{
    DismissFn, GlobalSettings, NotificationController, NotificationHandle, NotifyError, RenderFn,
    SettingsLayer,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 记录 render / dismiss 调用的测试显示面
#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    fn render(&self) -> RenderFn {
        let events = self.events.clone();
        RenderFn::from_fn(move |_, text, _, _, _| {
            let mut events = events.lock().unwrap();
            let handle = NotificationHandle::from(format!("n{}", events.len()));
            events.push(format!("render {} -> {}", text, handle));
            Ok(handle)
        })
    }

    fn dismiss(&self) -> DismissFn {
        let events = self.events.clone();
        DismissFn::from_fn(move |_, handle, _, _, _| {
            events.lock().unwrap().push(format!("dismiss {}", handle));
            Ok(())
        })
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[tokio::test(start_paused = true)]
async fn test_render_now_dismiss_after_timeout() {
    // Given: 不带全局设置的控制器，回调都在调用设置中
    let recorder = Recorder::default();
    let controller = NotificationController::new();

    // When: 发送 1000ms 的非 sticky 通知
    let handle = controller
        .notify(
            "hi",
            SettingsLayer::new()
                .with_sticky(false)
                .with_timeout_ms(1000)
                .with_render(recorder.render())
                .with_dismiss(recorder.dismiss()),
        )
        .unwrap();

    // Then: render 在返回前已调用一次，dismiss 尚未调用
    assert_eq!(handle.as_str(), "n0");
    assert_eq!(recorder.events(), vec!["render hi -> n0"]);

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(recorder.events().len(), 1);

    // 超过 timeout 后 dismiss 收到同一个句柄，且只调用一次
    tokio::time::sleep(Duration::from_millis(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(recorder.events(), vec!["render hi -> n0", "dismiss n0"]);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(recorder.events().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_sticky_never_dismissed() {
    let recorder = Recorder::default();
    let controller = NotificationController::new();

    let delivery = controller
        .notify_with_removal(
            "hi",
            SettingsLayer::new()
                .with_sticky(true)
                .with_render(recorder.render())
                .with_dismiss(recorder.dismiss()),
        )
        .unwrap();

    assert!(delivery.removal.is_none());
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(recorder.events(), vec!["render hi -> n0"]);
}

#[tokio::test(start_paused = true)]
async fn test_wait_returns_after_dismiss() {
    let recorder = Recorder::default();
    let controller = NotificationController::with_settings(GlobalSettings::new(
        SettingsLayer::new()
            .with_render(recorder.render())
            .with_dismiss(recorder.dismiss())
            .with_timeout_ms(250),
    ));

    let delivery = controller.notify_with_removal("saved", SettingsLayer::new()).unwrap();
    let removal = delivery.removal.unwrap();
    assert_eq!(removal.handle(), &delivery.handle);

    removal.wait().await.unwrap();
    assert_eq!(recorder.events(), vec!["render saved -> n0", "dismiss n0"]);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_removal_skips_dismiss() {
    let recorder = Recorder::default();
    let controller = NotificationController::with_settings(GlobalSettings::new(
        SettingsLayer::new()
            .with_render(recorder.render())
            .with_dismiss(recorder.dismiss())
            .with_timeout_ms(500),
    ));

    let delivery = controller.notify_with_removal("pinned", SettingsLayer::new()).unwrap();
    delivery.removal.unwrap().cancel();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(recorder.events(), vec!["render pinned -> n0"]);
}

#[tokio::test(start_paused = true)]
async fn test_independent_timers() {
    let recorder = Recorder::default();
    let controller = NotificationController::with_settings(
        GlobalSettings::new(
            SettingsLayer::new()
                .with_render(recorder.render())
                .with_dismiss(recorder.dismiss())
                .with_timeout_ms(3000),
        )
        .with_type("info", SettingsLayer::new().with_timeout_ms(1000)),
    );

    controller.notify("slow", SettingsLayer::new()).unwrap();
    controller.notify_as("info", "fast", SettingsLayer::new()).unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(
        recorder.events(),
        vec!["render slow -> n0", "render fast -> n1", "dismiss n1"]
    );

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(recorder.events().last().unwrap(), "dismiss n0");
}

#[tokio::test]
async fn test_missing_dismiss_is_synchronous_error() {
    let recorder = Recorder::default();
    let controller = NotificationController::new();

    let err = controller
        .notify("hi", SettingsLayer::new().with_render(recorder.render()))
        .unwrap_err();

    assert!(matches!(err, NotifyError::MissingDismisser));
    assert!(recorder.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_failure_is_reported() {
    let recorder = Recorder::default();
    let failing = DismissFn::from_fn(|_, _, _, _, _| Err(anyhow::anyhow!("already removed")));
    let controller = NotificationController::new();

    let delivery = controller
        .notify_with_removal(
            "hi",
            SettingsLayer::new()
                .with_render(recorder.render())
                .with_dismiss(failing)
                .with_timeout_ms(10),
        )
        .unwrap();

    let err = delivery.removal.unwrap().wait().await.unwrap_err();
    assert!(matches!(err, NotifyError::Dismiss { .. }));
    assert_eq!(err.to_string(), "Dismiss failed for n0: already removed");
}

#[tokio::test(start_paused = true)]
async fn test_plain_notify_detaches_removal() {
    // Given: dismiss 总是失败
    let recorder = Recorder::default();
    let failing = DismissFn::from_fn(|_, _, _, _, _| Err(anyhow::anyhow!("gone")));
    let controller = NotificationController::with_settings(GlobalSettings::new(
        SettingsLayer::new()
            .with_render(recorder.render())
            .with_dismiss(failing)
            .with_timeout_ms(10),
    ));

    // When: 普通 notify 只返回句柄，移除任务在后台运行
    let handle = controller.notify("plain", SettingsLayer::new()).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(handle.as_str(), "n0");

    // Then: 同样的失败通过 notify_with_removal 交给调用方
    let delivery = controller.notify_with_removal("tracked", SettingsLayer::new()).unwrap();
    let err = delivery.removal.unwrap().wait().await.unwrap_err();
    assert_eq!(err.to_string(), "Dismiss failed for n1: gone");
}

#[test]
fn test_non_sticky_outside_runtime_fails_fast() {
    let recorder = Recorder::default();
    let controller = NotificationController::new();

    let err = controller
        .notify(
            "hi",
            SettingsLayer::new()
                .with_render(recorder.render())
                .with_dismiss(recorder.dismiss()),
        )
        .unwrap_err();

    assert!(matches!(err, NotifyError::NoRuntime));
    assert!(recorder.events().is_empty());
}
