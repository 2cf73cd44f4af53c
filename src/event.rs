//! 事件系统 - 宿主投递给页面的输入事件
//!
//! 坐标均为视口坐标（逻辑像素），时间戳为页面时钟的毫秒数。

use crate::Point;

/// 页面事件
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    // 鼠标/指针
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },

    // 触摸
    TouchStart(TouchEvent),
    TouchMove(TouchEvent),
    TouchEnd(TouchEvent),

    // 键盘
    KeyDown(Key),

    // 视口
    Scroll { y: f32 },
    Resize { width: f32, height: f32 },
    OrientationChange,
}

/// 触摸事件
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchEvent {
    pub touches: Vec<Touch>,
    pub changed_touches: Vec<Touch>,
}

impl TouchEvent {
    /// 单点触摸事件（touchstart / touchmove）
    pub fn single(x: f32, y: f32) -> Self {
        let touch = Touch::new(0, x, y);
        Self {
            touches: vec![touch.clone()],
            changed_touches: vec![touch],
        }
    }

    /// 手指抬起：touches 为空，changed_touches 保留抬起位置
    pub fn lifted(x: f32, y: f32) -> Self {
        Self {
            touches: Vec::new(),
            changed_touches: vec![Touch::new(0, x, y)],
        }
    }

    /// 事件的主触点：优先 touches[0]，其次 changed_touches[0]
    pub fn primary(&self) -> Option<&Touch> {
        self.touches.first().or_else(|| self.changed_touches.first())
    }
}

/// 单个触摸点
#[derive(Debug, Clone, PartialEq)]
pub struct Touch {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl Touch {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// 键盘按键
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}
