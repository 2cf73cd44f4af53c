//! 移动端适配单元测试

use crate::device::{DeviceClass, DoubleTapGuard, OrientationReset};
use crate::dom::Document;
use crate::timer::TimerQueue;
use crate::Point;

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/120.0 Safari/537.36";

/// 测试 UA 和视口宽度判定
#[test]
fn test_device_detection() {
    assert_eq!(DeviceClass::detect(IPHONE, 1280.0), DeviceClass::Mobile);
    assert_eq!(DeviceClass::detect("opera mini/8.0", 1280.0), DeviceClass::Mobile);
    assert_eq!(DeviceClass::detect(DESKTOP, 1280.0), DeviceClass::Desktop);
    assert_eq!(DeviceClass::detect(DESKTOP, 768.0), DeviceClass::Mobile);
    assert_eq!(DeviceClass::detect(DESKTOP, 769.0), DeviceClass::Desktop);
}

/// 测试 body 类名替换
#[test]
fn test_device_body_class() {
    let mut doc = Document::new();
    let body = doc.body();
    DeviceClass::Mobile.apply(&mut doc);
    assert!(doc.has_class(body, "mobile-device"));
    DeviceClass::Desktop.apply(&mut doc);
    assert!(doc.has_class(body, "desktop-device"));
    assert!(!doc.has_class(body, "mobile-device"));
}

/// 测试双击窗口：300ms 内、30px 内的第二击被抑制
#[test]
fn test_double_tap_guard() {
    let mut guard = DoubleTapGuard::new();
    assert!(!guard.on_touch_end(Point::new(100.0, 100.0), 1000));
    assert!(guard.on_touch_end(Point::new(110.0, 105.0), 1250));

    // 被抑制的一击不再作为下一次的起点
    assert!(!guard.on_touch_end(Point::new(110.0, 105.0), 1400));

    // 超时
    assert!(!guard.on_touch_end(Point::new(110.0, 105.0), 1701));

    // 距离过远
    assert!(!guard.on_touch_end(Point::new(300.0, 105.0), 1800));
}

/// 测试横竖屏切换：100ms 后关闭过渡，再 100ms 后恢复
#[test]
fn test_orientation_reset() {
    let mut doc = Document::new();
    let body = doc.body();
    let track = doc.create_element(body, "div", &["gallery-track"]);
    if let Some(style) = doc.style_mut(track) {
        style.transition = Some("transform 0.5s".to_string());
    }
    let mut timers = TimerQueue::new();
    let mut reset = OrientationReset::new(track, "transform 0.5s");

    reset.on_orientation_change(0, &mut timers);
    assert_eq!(timers.pop_due(99), None);

    let first = timers.pop_due(100).expect("disable timer");
    assert!(reset.on_timer(first, 100, &mut doc, &mut timers));
    assert_eq!(doc.get(track).and_then(|e| e.style.transition.clone()), None);

    let second = timers.pop_due(200).expect("restore timer");
    assert!(reset.on_timer(second, 200, &mut doc, &mut timers));
    assert_eq!(
        doc.get(track).and_then(|e| e.style.transition.clone()),
        Some("transform 0.5s".to_string())
    );
    assert!(timers.is_empty());
}

/// 测试连续切换只保留最后一次的定时器
#[test]
fn test_orientation_reset_restarts() {
    let mut doc = Document::new();
    let body = doc.body();
    let track = doc.create_element(body, "div", &[]);
    let mut timers = TimerQueue::new();
    let mut reset = OrientationReset::new(track, "t");

    reset.on_orientation_change(0, &mut timers);
    reset.on_orientation_change(50, &mut timers);
    assert_eq!(timers.len(), 1);
    assert_eq!(timers.next_deadline(), Some(150));
}
