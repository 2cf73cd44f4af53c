//! 把画布拷贝到窗口缓冲区

use photo_essay::Canvas;

/// 按缩放比例最近邻放大画布，写入 0RGB 缓冲区
pub fn present_to_buffer(buffer: &mut [u32], buffer_width: u32, buffer_height: u32, canvas: &Canvas, scale: f32) {
    let canvas_width = canvas.width();
    let canvas_height = canvas.height();
    if canvas_width == 0 || canvas_height == 0 || scale <= 0.0 {
        return;
    }
    let pixels = canvas.pixels();

    for y in 0..buffer_height {
        let src_y = ((y as f32 / scale) as u32).min(canvas_height - 1);
        for x in 0..buffer_width {
            let dst_idx = (y * buffer_width + x) as usize;
            let src_x = (x as f32 / scale) as u32;
            if src_x >= canvas_width || dst_idx >= buffer.len() {
                continue;
            }
            let c = pixels[(src_y * canvas_width + src_x) as usize];
            buffer[dst_idx] = ((c.r as u32) << 16) | ((c.g as u32) << 8) | c.b as u32;
        }
    }
}
