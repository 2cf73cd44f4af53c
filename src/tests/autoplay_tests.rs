//! 自动播放单元测试
//! 测试间隔前进、交互暂停与恢复、定时器不叠加

use crate::carousel::{Carousel, CarouselConfig, TrackFrame};
use crate::timer::TimerQueue;

struct Rig {
    carousel: Carousel,
    frame: TrackFrame,
    timers: TimerQueue,
}

impl Rig {
    fn new() -> Self {
        let mut carousel = Carousel::new(CarouselConfig::main_gallery(3));
        let mut frame = TrackFrame::new(3, 300.0);
        let mut timers = TimerQueue::new();
        carousel.start(0, &mut frame, &mut timers);
        Self { carousel, frame, timers }
    }

    fn run_until(&mut self, now: u64) {
        while let Some(id) = self.timers.pop_due(now) {
            self.carousel.on_timer(id, now, &mut self.frame, &mut self.timers);
        }
    }
}

/// 测试启动后只有一个间隔定时器
#[test]
fn test_start_schedules_one_interval() {
    let rig = Rig::new();
    assert_eq!(rig.timers.len(), 1);
    assert_eq!(rig.timers.recurring_count(), 1);
    assert!(rig.carousel.auto_advance().map(|a| a.is_active()).unwrap_or(false));
}

/// 测试每 3 秒前进一页并在末页回到首页
#[test]
fn test_interval_advances_and_wraps() {
    let mut rig = Rig::new();
    rig.run_until(2999);
    assert_eq!(rig.carousel.current(), 0);
    rig.run_until(3000);
    assert_eq!(rig.carousel.current(), 1);
    rig.run_until(6000);
    assert_eq!(rig.carousel.current(), 2);
    rig.run_until(9000);
    assert_eq!(rig.carousel.current(), 0);
    assert_eq!(rig.frame.active_dot(), Some(0));
}

/// 测试点击指示点后暂停 5 秒
#[test]
fn test_dot_click_pauses_then_resumes() {
    let mut rig = Rig::new();
    rig.carousel.click_dot(2, 1000, &mut rig.frame, &mut rig.timers);
    assert_eq!(rig.carousel.current(), 2);
    assert!(rig.carousel.auto_advance().map(|a| a.is_paused()).unwrap_or(false));
    assert_eq!(rig.timers.recurring_count(), 0);

    // 原本 3000ms 的前进不再发生
    rig.run_until(5999);
    assert_eq!(rig.carousel.current(), 2);

    // 6000ms 恢复，9000ms 前进（末页回到首页）
    rig.run_until(6000);
    assert_eq!(rig.timers.recurring_count(), 1);
    rig.run_until(9000);
    assert_eq!(rig.carousel.current(), 0);
}

/// 测试 5 秒内两次交互只留下一个间隔定时器
#[test]
fn test_repeated_interactions_do_not_stack() {
    let mut rig = Rig::new();
    rig.carousel.click_dot(1, 1000, &mut rig.frame, &mut rig.timers);
    rig.carousel.begin_drag(200.0, 3000, &mut rig.frame, &mut rig.timers);
    rig.carousel.end_drag(3300, &mut rig.frame);
    assert_eq!(rig.timers.len(), 1);

    // 第一次暂停的恢复时间已被取消
    rig.run_until(6000);
    assert_eq!(rig.timers.recurring_count(), 0);

    rig.run_until(8000);
    assert_eq!(rig.timers.recurring_count(), 1);
    assert_eq!(rig.timers.len(), 1);

    rig.run_until(20_000);
    assert_eq!(rig.timers.recurring_count(), 1);
}

/// 测试拖动开始即暂停
#[test]
fn test_drag_start_pauses() {
    let mut rig = Rig::new();
    rig.carousel.begin_drag(100.0, 500, &mut rig.frame, &mut rig.timers);
    assert!(rig.carousel.auto_advance().map(|a| a.is_paused()).unwrap_or(false));
    rig.run_until(3000);
    assert_eq!(rig.carousel.current(), 0);
}

/// 测试键盘导航不影响自动播放
#[test]
fn test_keyboard_does_not_pause() {
    let mut rig = Rig::new();
    rig.carousel.handle_key(&crate::event::Key::ArrowRight, &mut rig.frame);
    assert!(rig.carousel.auto_advance().map(|a| a.is_active()).unwrap_or(false));
    rig.run_until(3000);
    assert_eq!(rig.carousel.current(), 2);
}

/// 测试停止后不再持有定时器
#[test]
fn test_shutdown_clears_timers() {
    let mut rig = Rig::new();
    rig.carousel.click_dot(1, 100, &mut rig.frame, &mut rig.timers);
    rig.carousel.shutdown(&mut rig.timers);
    assert!(rig.timers.is_empty());
    rig.run_until(60_000);
    assert_eq!(rig.carousel.current(), 1);
}
