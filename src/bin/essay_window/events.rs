//! winit 输入 → 页面事件

use photo_essay::event::{Key, PageEvent};
use winit::event::MouseScrollDelta;
use winit::keyboard::{KeyCode, PhysicalKey};

/// 每行滚轮对应的像素
const LINE_SCROLL_PX: f32 = 40.0;

/// 键盘动作
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// 直接交给页面
    Page(PageEvent),
    /// 平滑滚动到页首
    ScrollHome,
    /// 平滑滚动到页尾
    ScrollEnd,
    /// 模拟横竖屏切换（调试用）
    Rotate,
}

pub fn map_key(key: PhysicalKey) -> Option<KeyAction> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    match code {
        KeyCode::ArrowLeft => Some(KeyAction::Page(PageEvent::KeyDown(Key::ArrowLeft))),
        KeyCode::ArrowRight => Some(KeyAction::Page(PageEvent::KeyDown(Key::ArrowRight))),
        KeyCode::Home => Some(KeyAction::ScrollHome),
        KeyCode::End => Some(KeyAction::ScrollEnd),
        KeyCode::KeyR => Some(KeyAction::Rotate),
        other => Some(KeyAction::Page(PageEvent::KeyDown(Key::Other(format!("{:?}", other))))),
    }
}

/// 滚轮位移（逻辑像素，向下为正）
pub fn wheel_delta(delta: MouseScrollDelta, scale_factor: f64) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_SCROLL_PX,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y / scale_factor) as f32,
    }
}
