//! 纹理加载
//!
//! 使用 `image` crate 解码，统一转换为 RGBA8。

use std::path::Path;

use tracing::{info, warn};

use crate::core::error::{Result, TextureError};

/// 解码后的 RGBA8 纹理
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// 1x1 白色纹理
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![255; 4],
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// 从磁盘加载纹理
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTextureLoader {
    /// 加载失败时退回白色纹理
    pub fallback: bool,
}

impl ImageTextureLoader {
    pub fn new(fallback: bool) -> Self {
        Self { fallback }
    }

    pub fn load(&self, path: &Path) -> Result<TextureData> {
        match Self::decode(path) {
            Ok(texture) => {
                info!(
                    path = %path.display(),
                    width = texture.width,
                    height = texture.height,
                    "Texture loaded"
                );
                Ok(texture)
            }
            Err(e) if self.fallback => {
                warn!(path = %path.display(), error = %e, "Using white fallback texture");
                Ok(TextureData::white())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn decode(path: &Path) -> std::result::Result<TextureData, TextureError> {
        if !path.exists() {
            return Err(TextureError::FileNotFound(path.to_path_buf()));
        }

        let image = image::open(path)
            .map_err(|e| TextureError::Decode(e.to_string()))?
            .to_rgba8();

        Ok(TextureData {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        })
    }
}
