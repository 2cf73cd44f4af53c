//! 带窗口的图文页运行器
//!
//! 用法：essay-window [config.json]
//! 方向键切换图集，Home/End 平滑滚动，R 模拟横竖屏切换。

mod essay_window;

use essay_window::EssayWindow;
use photo_essay::config::PageConfig;
use photo_essay::logging::init_logging;
use photo_essay::page::EssayPage;
use photo_essay::TextRenderer;
use std::path::PathBuf;
use std::time::Instant;
use winit::event_loop::EventLoop;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("demos/essay.json"));
    let config = PageConfig::from_file(&path)?;

    let text = match TextRenderer::load_system_font() {
        Ok(renderer) => Some(renderer),
        Err(e) => {
            tracing::warn!("{}; text will not be drawn", e);
            None
        }
    };

    let started = Instant::now();
    let page = EssayPage::new(config, text, 0)?;

    let event_loop = EventLoop::new()?;
    let mut app = EssayWindow::new(page, started);
    event_loop.run_app(&mut app)?;
    Ok(())
}
