//! 定时器队列 - setTimeout / setInterval 的单线程实现
//!
//! 时钟由调用方提供（毫秒）。`pop_due` 每次只弹出一个到期定时器，
//! 调用方处理完回调后再弹下一个，这样回调里做的取消和重新调度对
//! 后续定时器立即生效。

use std::collections::BTreeMap;

/// 定时器句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct TimerState {
    due_ms: u64,
    /// 间隔定时器的周期，None 表示一次性
    period_ms: Option<u64>,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    timers: BTreeMap<TimerId, TimerState>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, due_ms: u64, period_ms: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(id, TimerState { due_ms, period_ms });
        id
    }

    /// 一次性定时器，`now + delay` 到期
    pub fn set_timeout(&mut self, now: u64, delay_ms: u64) -> TimerId {
        self.insert(now.saturating_add(delay_ms), None)
    }

    /// 间隔定时器，周期至少 1ms
    pub fn set_interval(&mut self, now: u64, period_ms: u64) -> TimerId {
        let period = period_ms.max(1);
        self.insert(now.saturating_add(period), Some(period))
    }

    /// 取消定时器，返回是否确实存在
    pub fn clear(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn is_recurring(&self, id: TimerId) -> bool {
        self.timers.get(&id).map(|t| t.period_ms.is_some()).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// 当前存活的间隔定时器数量
    pub fn recurring_count(&self) -> usize {
        self.timers.values().filter(|t| t.period_ms.is_some()).count()
    }

    /// 最早的到期时间
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.values().map(|t| t.due_ms).min()
    }

    /// 弹出一个 `due <= now` 的定时器（到期时间最早者优先，相同则先创建者优先）
    pub fn pop_due(&mut self, now: u64) -> Option<TimerId> {
        let (id, state) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due_ms <= now)
            .min_by_key(|(id, t)| (t.due_ms, **id))
            .map(|(id, t)| (*id, t.clone()))?;

        match state.period_ms {
            Some(period) => {
                // 宿主停顿后只补发一次，下一次从当前时间起算
                let next = state.due_ms.saturating_add(period);
                if let Some(timer) = self.timers.get_mut(&id) {
                    timer.due_ms = if next <= now { now.saturating_add(period) } else { next };
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }
}
