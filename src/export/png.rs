// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/export/png.rs - PNG 快照导出
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::PathBuf;

use image::codecs::png::PngEncoder;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::export::{CAPTURE_SCALE, ExportDocument, export_file_name};
use crate::render::CaptureSource;
use crate::{FromUrl, FromUrlWithScheme};

/// PNG 快照导出：整幅捕获原样落盘，不做分页。
pub struct PngExporter {
  directory: PathBuf,
}

#[derive(Error, Debug)]
pub enum PngExportError {
  #[error("视图捕获失败: {0}")]
  CaptureError(#[from] anyhow::Error),
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

impl FromUrlWithScheme for PngExporter {
  const SCHEME: &'static str = "png";
}

impl FromUrl for PngExporter {
  type Error = PngExportError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(PngExportError::SchemeMismatch(format!(
        "期望导出方式 '{}', 实际导出方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    Ok(PngExporter {
      directory: PathBuf::from(uri.path()),
    })
  }
}

impl PngExporter {
  pub fn new(directory: impl Into<PathBuf>) -> Self {
    PngExporter {
      directory: directory.into(),
    }
  }
}

impl ExportDocument for PngExporter {
  type Error = PngExportError;

  fn export_document<C: CaptureSource>(&self, view: &C) -> Result<PathBuf, Self::Error> {
    let capture = view.capture(CAPTURE_SCALE)?;

    let mut encoded = Vec::new();
    capture.write_with_encoder(PngEncoder::new(&mut encoded))?;

    std::fs::create_dir_all(&self.directory)?;

    // 先写临时文件再改名，导出中途失败不会留下半截文件
    let file_name = export_file_name("png");
    let path = self.directory.join(&file_name);
    let staging = self.directory.join(format!("{file_name}.part"));
    std::fs::write(&staging, &encoded)?;
    std::fs::rename(&staging, &path)?;

    info!("导出 PNG 报告快照: {}", path.display());
    Ok(path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use image::{Rgb, RgbImage};

  struct FlatCapture {
    width: u32,
    height: u32,
  }

  impl CaptureSource for FlatCapture {
    fn capture(&self, scale: u32) -> anyhow::Result<RgbImage> {
      Ok(RgbImage::from_pixel(
        self.width * scale,
        self.height * scale,
        Rgb([250, 250, 250]),
      ))
    }
  }

  #[test]
  fn snapshot_keeps_the_whole_capture_unsliced() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = PngExporter::new(dir.path());

    // 两页高的内容也只产出一张完整快照
    let path = exporter
      .export_document(&FlatCapture {
        width: 210,
        height: 594,
      })
      .unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("brain-report-"), "{name}");
    assert!(name.ends_with(".png"), "{name}");

    let snapshot = image::open(&path).unwrap().to_rgb8();
    assert_eq!(snapshot.width(), 210 * CAPTURE_SCALE);
    assert_eq!(snapshot.height(), 594 * CAPTURE_SCALE);

    let leftovers = std::fs::read_dir(dir.path())
      .unwrap()
      .filter(|entry| {
        entry
          .as_ref()
          .unwrap()
          .file_name()
          .to_string_lossy()
          .ends_with(".part")
      })
      .count();
    assert_eq!(leftovers, 0);
  }

  #[test]
  fn from_url_requires_png_scheme() {
    let url = Url::parse("png:reports").unwrap();
    let exporter = PngExporter::from_url(&url).unwrap();
    assert_eq!(exporter.directory, PathBuf::from("reports"));

    let url = Url::parse("pdf:reports").unwrap();
    assert!(matches!(
      PngExporter::from_url(&url),
      Err(PngExportError::SchemeMismatch(_))
    ));
  }
}
