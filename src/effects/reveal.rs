//! 滚动显现：元素进入视口后加类名，且永不撤销

use super::Viewport;
use crate::dom::{Document, ElementId};
use crate::timer::{TimerId, TimerQueue};

/// 显现规则
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealRule {
    pub selector: &'static str,
    pub class: &'static str,
    /// 可见比例阈值
    pub threshold: f32,
    /// 视口底边调整（负值收缩）
    pub bottom_margin: f32,
    /// `data-delay` 每一级对应的毫秒数
    pub delay_step_ms: u64,
    /// 兜底：超过该时间仍未显现的元素强制显现
    pub fallback_ms: Option<u64>,
}

impl RevealRule {
    /// 正文段落和图片
    pub const CONTENT: RevealRule = RevealRule {
        selector: ".reveal",
        class: "revealed",
        threshold: 0.1,
        bottom_margin: 0.0,
        delay_step_ms: 0,
        fallback_ms: Some(3000),
    };

    /// 高亮文字，按 data-delay 依次点亮
    pub const HIGHLIGHT: RevealRule = RevealRule {
        selector: ".highlight-text",
        class: "active",
        threshold: 0.5,
        bottom_margin: -50.0,
        delay_step_ms: 200,
        fallback_ms: None,
    };

    pub fn with_fallback(mut self, fallback_ms: Option<u64>) -> Self {
        self.fallback_ms = fallback_ms;
        self
    }
}

#[derive(Debug)]
pub struct ScrollReveal {
    rule: RevealRule,
    /// 仍在观察的元素
    observed: Vec<ElementId>,
    /// 已进入视口、等待延迟到期的元素
    scheduled: Vec<(TimerId, ElementId)>,
    fallback: Option<TimerId>,
}

impl ScrollReveal {
    /// 没有匹配元素时返回 None
    pub fn new(doc: &Document, rule: RevealRule, now: u64, timers: &mut TimerQueue) -> Option<Self> {
        let observed = doc.query_selector_all(rule.selector);
        if observed.is_empty() {
            return None;
        }
        let fallback = rule.fallback_ms.map(|ms| timers.set_timeout(now, ms));
        tracing::info!("scroll reveal initialized for {} {} elements", observed.len(), rule.selector);
        Some(Self {
            rule,
            observed,
            scheduled: Vec::new(),
            fallback,
        })
    }

    pub fn rule(&self) -> &RevealRule {
        &self.rule
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    fn reveal(&self, doc: &mut Document, id: ElementId) {
        doc.add_class(id, self.rule.class);
    }

    /// 检查进入视口的元素
    pub fn observe(&mut self, doc: &mut Document, viewport: &Viewport, now: u64, timers: &mut TimerQueue) {
        let top = viewport.scroll_y;
        let bottom = viewport.bottom() + self.rule.bottom_margin;

        let mut entered = Vec::new();
        self.observed.retain(|id| {
            let fraction = doc.rect(*id).visible_fraction(top, bottom);
            if fraction > 0.0 && fraction >= self.rule.threshold {
                entered.push(*id);
                false
            } else {
                true
            }
        });

        for id in entered {
            let steps = doc
                .get(id)
                .and_then(|e| e.attr("data-delay"))
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(0);
            let delay = steps * self.rule.delay_step_ms;
            if delay == 0 {
                self.reveal(doc, id);
            } else {
                let timer = timers.set_timeout(now, delay);
                self.scheduled.push((timer, id));
            }
        }
    }

    /// 定时器分发，返回是否属于本实例
    pub fn on_timer(&mut self, id: TimerId, doc: &mut Document, timers: &mut TimerQueue) -> bool {
        if let Some(pos) = self.scheduled.iter().position(|(timer, _)| *timer == id) {
            let (_, element) = self.scheduled.remove(pos);
            self.reveal(doc, element);
            return true;
        }

        if self.fallback == Some(id) {
            self.fallback = None;
            let pending: Vec<ElementId> = self
                .observed
                .drain(..)
                .chain(self.scheduled.drain(..).map(|(timer, element)| {
                    timers.clear(timer);
                    element
                }))
                .collect();
            if !pending.is_empty() {
                tracing::debug!("fallback revealing {} {} elements", pending.len(), self.rule.selector);
            }
            for element in pending {
                self.reveal(doc, element);
            }
            return true;
        }
        false
    }
}
