//! 自动播放：3s 间隔前进，用户交互后暂停 5s 再恢复
//!
//! 任一时刻至多持有一个定时器（间隔定时器或恢复定时器），
//! 每次暂停都会先取消当前持有的那个，连续交互不会叠加间隔定时器。

use super::config::AutoAdvanceConfig;
use crate::timer::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Running(TimerId),
    /// 等待恢复
    Paused(TimerId),
}

/// 定时器回调的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoTick {
    /// 间隔定时器触发，应前进一页（首尾循环）
    Advance,
    /// 恢复定时器触发，间隔定时器已重新启动
    Resumed,
    /// 不属于本实例的定时器
    Ignored,
}

#[derive(Debug)]
pub struct AutoAdvance {
    config: AutoAdvanceConfig,
    phase: Phase,
}

impl AutoAdvance {
    pub fn new(config: AutoAdvanceConfig) -> Self {
        Self {
            config,
            phase: Phase::Stopped,
        }
    }

    pub fn config(&self) -> &AutoAdvanceConfig {
        &self.config
    }

    /// 未被暂停且已启动
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused(_))
    }

    /// 当前持有的定时器
    pub fn timer(&self) -> Option<TimerId> {
        match self.phase {
            Phase::Stopped => None,
            Phase::Running(id) | Phase::Paused(id) => Some(id),
        }
    }

    fn cancel(&mut self, timers: &mut TimerQueue) {
        if let Some(id) = self.timer() {
            timers.clear(id);
        }
        self.phase = Phase::Stopped;
    }

    /// 启动（或重启）间隔定时器
    pub fn start(&mut self, now: u64, timers: &mut TimerQueue) {
        self.cancel(timers);
        let id = timers.set_interval(now, self.config.interval_ms);
        self.phase = Phase::Running(id);
    }

    /// 用户交互：取消当前定时器，安排一次性恢复
    pub fn pause(&mut self, now: u64, timers: &mut TimerQueue) {
        self.cancel(timers);
        let id = timers.set_timeout(now, self.config.resume_after_ms);
        self.phase = Phase::Paused(id);
        tracing::debug!("auto-advance paused, resume at {}ms", now + self.config.resume_after_ms);
    }

    pub fn stop(&mut self, timers: &mut TimerQueue) {
        self.cancel(timers);
    }

    pub fn on_timer(&mut self, id: TimerId, now: u64, timers: &mut TimerQueue) -> AutoTick {
        match self.phase {
            Phase::Running(running) if running == id => AutoTick::Advance,
            Phase::Paused(pending) if pending == id => {
                // 一次性定时器已被队列移除
                self.phase = Phase::Stopped;
                self.start(now, timers);
                tracing::debug!("auto-advance resumed");
                AutoTick::Resumed
            }
            _ => AutoTick::Ignored,
        }
    }
}
