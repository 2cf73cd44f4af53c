//! 轮播控制器
//!
//! 一个 `Carousel` 对应页面上的一个轮播实例（主图集或成员幻灯片），
//! 通过 `CarouselSurface` 把位置和指示点状态写回宿主。

mod autoplay;
mod config;
mod controller;
mod state;
mod surface;
mod swipe;

pub use autoplay::{AutoAdvance, AutoTick};
pub use config::{AutoAdvanceConfig, CarouselConfig, SwipeThresholds, TrackLayout};
pub use controller::Carousel;
pub use state::{CarouselState, GesturePhase};
pub use surface::{CarouselSurface, TrackFrame, Transition, TRACK_TRANSITION};
pub use swipe::{decide_swipe, SwipeDecision, MIN_GESTURE_MS};
