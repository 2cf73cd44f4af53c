//! 错误类型
//!
//! 控制器和页面效果从不返回错误（越界索引被夹取，缺失结构跳过初始化），
//! 只有读取配置、解码图片、加载字体、布局和导出快照这些边界操作会失败。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EssayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("font error: {0}")]
    Font(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("failed to write snapshot: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, EssayError>;
