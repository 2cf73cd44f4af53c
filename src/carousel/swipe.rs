//! 手势结束时的提交判定

use super::config::SwipeThresholds;

/// 速度计算的最小时长，避免极快手势除以零
pub const MIN_GESTURE_MS: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDecision {
    Previous,
    Next,
    SnapBack,
}

/// 根据位移和时长决定提交方向
///
/// 向右拖（`delta_x > 0`）回到上一页，向左拖进入下一页；
/// 越过首尾边界的提交退化为回弹。
pub fn decide_swipe(
    delta_x: f32,
    delta_ms: u64,
    current: usize,
    total: usize,
    thresholds: &SwipeThresholds,
) -> SwipeDecision {
    let elapsed = delta_ms.max(MIN_GESTURE_MS) as f32;
    let distance = delta_x.abs();
    let velocity = distance / elapsed;

    let significant = distance > thresholds.distance_px || velocity > thresholds.velocity_px_per_ms;
    if !significant {
        return SwipeDecision::SnapBack;
    }

    if delta_x > 0.0 && current > 0 {
        SwipeDecision::Previous
    } else if delta_x < 0.0 && current + 1 < total {
        SwipeDecision::Next
    } else {
        SwipeDecision::SnapBack
    }
}
