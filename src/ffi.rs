//! FFI 接口 - 供 C 宿主驱动单个轮播
//!
//! 宿主负责把自己的时钟（毫秒）传进来，并在每帧调用 `pe_carousel_tick`。
//! 所有函数对空句柄都是空操作。

use crate::carousel::{Carousel, CarouselConfig, TrackFrame, Transition};
use crate::timer::TimerQueue;
use once_cell::sync::OnceCell;

static LOGGING: OnceCell<()> = OnceCell::new();

/// 轮播句柄
pub struct CarouselHandle {
    carousel: Carousel,
    frame: TrackFrame,
    timers: TimerQueue,
}

/// 初始化日志（只生效一次）
#[no_mangle]
pub extern "C" fn pe_init_logging() {
    LOGGING.get_or_init(crate::logging::init_logging);
}

/// 创建轮播；`auto_advance` 为 false 时不自动播放
#[no_mangle]
pub extern "C" fn pe_carousel_new(total_slides: u32, auto_advance: bool, now_ms: u64) -> *mut CarouselHandle {
    let total = total_slides.max(1) as usize;
    let mut config = CarouselConfig::main_gallery(total);
    if !auto_advance {
        config = config.with_auto_advance(None);
    }
    let mut handle = CarouselHandle {
        carousel: Carousel::new(config),
        frame: TrackFrame::new(total, 0.0),
        timers: TimerQueue::new(),
    };
    handle.carousel.start(now_ms, &mut handle.frame, &mut handle.timers);
    Box::into_raw(Box::new(handle))
}

/// 销毁轮播
#[no_mangle]
pub extern "C" fn pe_carousel_free(handle: *mut CarouselHandle) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)); }
    }
}

/// 容器宽度（像素），拖动跟手换算用
#[no_mangle]
pub extern "C" fn pe_carousel_set_container_width(handle: *mut CarouselHandle, width: f32) {
    if let Some(h) = unsafe { handle.as_mut() } {
        h.frame.container_width = width;
    }
}

#[no_mangle]
pub extern "C" fn pe_carousel_go_to(handle: *mut CarouselHandle, index: i64) {
    if let Some(h) = unsafe { handle.as_mut() } {
        h.carousel.go_to(index, &mut h.frame);
    }
}

#[no_mangle]
pub extern "C" fn pe_carousel_next(handle: *mut CarouselHandle) {
    if let Some(h) = unsafe { handle.as_mut() } {
        h.carousel.next(&mut h.frame);
    }
}

#[no_mangle]
pub extern "C" fn pe_carousel_previous(handle: *mut CarouselHandle) {
    if let Some(h) = unsafe { handle.as_mut() } {
        h.carousel.previous(&mut h.frame);
    }
}

/// 指针按下 / 触摸开始
#[no_mangle]
pub extern "C" fn pe_carousel_pointer_down(handle: *mut CarouselHandle, x: f32, now_ms: u64) {
    if let Some(h) = unsafe { handle.as_mut() } {
        h.carousel.begin_drag(x, now_ms, &mut h.frame, &mut h.timers);
    }
}

#[no_mangle]
pub extern "C" fn pe_carousel_pointer_move(handle: *mut CarouselHandle, x: f32) {
    if let Some(h) = unsafe { handle.as_mut() } {
        h.carousel.drag_to(x, &mut h.frame);
    }
}

/// 指针抬起，返回是否结束了一次拖动
#[no_mangle]
pub extern "C" fn pe_carousel_pointer_up(handle: *mut CarouselHandle, now_ms: u64) -> bool {
    match unsafe { handle.as_mut() } {
        Some(h) => h.carousel.end_drag(now_ms, &mut h.frame).is_some(),
        None => false,
    }
}

#[no_mangle]
pub extern "C" fn pe_carousel_click_dot(handle: *mut CarouselHandle, index: u32, now_ms: u64) {
    if let Some(h) = unsafe { handle.as_mut() } {
        h.carousel.click_dot(index as usize, now_ms, &mut h.frame, &mut h.timers);
    }
}

/// 触发到期定时器，返回是否有定时器生效
#[no_mangle]
pub extern "C" fn pe_carousel_tick(handle: *mut CarouselHandle, now_ms: u64) -> bool {
    let Some(h) = (unsafe { handle.as_mut() }) else {
        return false;
    };
    let mut fired = false;
    while let Some(id) = h.timers.pop_due(now_ms) {
        fired |= h.carousel.on_timer(id, now_ms, &mut h.frame, &mut h.timers);
    }
    fired
}

#[no_mangle]
pub extern "C" fn pe_carousel_current(handle: *const CarouselHandle) -> u32 {
    unsafe { handle.as_ref() }.map(|h| h.carousel.current() as u32).unwrap_or(0)
}

/// 轨道位移（百分比）
#[no_mangle]
pub extern "C" fn pe_carousel_offset_percent(handle: *const CarouselHandle) -> f32 {
    unsafe { handle.as_ref() }.map(|h| h.frame.offset_percent).unwrap_or(0.0)
}

/// 激活的指示点，没有时返回 -1
#[no_mangle]
pub extern "C" fn pe_carousel_active_dot(handle: *const CarouselHandle) -> i32 {
    unsafe { handle.as_ref() }
        .and_then(|h| h.frame.active_dot())
        .map(|i| i as i32)
        .unwrap_or(-1)
}

/// 轨道过渡动画是否开启（拖动中关闭）
#[no_mangle]
pub extern "C" fn pe_carousel_transition_enabled(handle: *const CarouselHandle) -> bool {
    unsafe { handle.as_ref() }
        .map(|h| h.frame.transition == Transition::Smooth)
        .unwrap_or(false)
}
