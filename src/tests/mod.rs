//! 单元测试模块
//! 覆盖轮播控制器、定时器、文档布局、滚动效果、设备适配、配置和页面运行时

pub mod autoplay_tests;
pub mod effects_tests;
pub mod device_tests;
pub mod media_tests;
pub mod config_tests;
pub mod canvas_tests;
