//! Photo Essay - 滚动叙事图文页引擎
//! 支持图集轮播、成员幻灯片、滚动显现效果和软件渲染

mod canvas;
mod color;
mod geometry;
mod paint;
pub mod text;

pub use canvas::{Canvas, ImageFit};
pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use paint::{Paint, PaintStyle};
pub use text::TextRenderer;

// 错误类型和日志
pub mod error;
pub mod logging;

// 输入事件和定时器
pub mod event;
pub mod timer;

// 轮播控制器
pub mod carousel;

// 文档模型和布局
pub mod dom;
pub mod layout;

// 页面效果
pub mod device;
pub mod effects;
pub mod media;

// 配置和页面运行时
pub mod config;
pub mod page;
pub mod painter;

// FFI 导出
mod ffi;
pub use ffi::*;

// 单元测试
#[cfg(test)]
mod tests;
