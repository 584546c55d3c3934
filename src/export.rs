// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/export.rs - 报告导出定义
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

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use url::Url;

use crate::FromUrl;
#[cfg(any(feature = "export_pdf", feature = "export_png"))]
use crate::FromUrlWithScheme;
use crate::render::CaptureSource;

/// A4 页面宽度（毫米），图像统一缩放到整页宽
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 页面高度（毫米）
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// 捕获倍率，打印保真度取 2 倍超采样
pub const CAPTURE_SCALE: u32 = 2;

/// 报告导出后端。
///
/// 按固定倍率捕获视图并产出带时间戳命名的文档文件，
/// 导出失败不得留下部分写入的文件。
pub trait ExportDocument: Sized {
  type Error;
  fn export_document<C: CaptureSource>(&self, view: &C) -> Result<PathBuf, Self::Error>;
}

#[cfg(feature = "export_pdf")]
mod pdf;
#[cfg(feature = "export_pdf")]
pub use self::pdf::{PdfExportError, PdfExporter};

#[cfg(feature = "export_png")]
mod png;
#[cfg(feature = "export_png")]
pub use self::png::{PngExportError, PngExporter};

/// 单张长图到连续 A4 页的切分方案。
///
/// 每一页放置同一张完整长图，只是按已消耗的整页高度上移，
/// 超出页界的部分由页面边界裁剪。
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
  /// 图像缩放到整页宽后的高度（毫米）
  pub image_height_mm: f64,
  /// 每页图像顶边相对页顶的纵向位移（毫米）。首页为 0，其余为负。
  pub offsets_mm: Vec<f64>,
}

impl PagePlan {
  pub fn page_count(&self) -> usize {
    self.offsets_mm.len()
  }
}

/// 按捕获光栅的像素尺寸计算分页方案。
pub fn paginate(raster_width: u32, raster_height: u32) -> PagePlan {
  let image_height_mm = if raster_width == 0 {
    0.0
  } else {
    raster_height as f64 * PAGE_WIDTH_MM / raster_width as f64
  };

  let mut offsets_mm = vec![0.0];
  let mut remaining = image_height_mm - PAGE_HEIGHT_MM;
  // 剩余高度恰好为零（内容恰为整页）时不追加空白尾页
  while remaining > 0.0 {
    offsets_mm.push(remaining - image_height_mm);
    remaining -= PAGE_HEIGHT_MM;
  }

  PagePlan {
    image_height_mm,
    offsets_mm,
  }
}

/// 带可排序时间戳的导出文件名。
/// 时间戳中的 ':' 与 '.' 替换为 '-'，同一会话内重复导出不会互相覆盖。
pub fn export_file_name(extension: &str) -> String {
  let stamp = Utc::now()
    .to_rfc3339_opts(SecondsFormat::Millis, true)
    .replace([':', '.'], "-");
  format!("brain-report-{stamp}.{extension}")
}

#[derive(Error, Debug)]
pub enum ExportError {
  #[cfg(feature = "export_pdf")]
  #[error("PDF 导出错误: {0}")]
  PdfExportError(#[from] PdfExportError),
  #[cfg(feature = "export_png")]
  #[error("PNG 导出错误: {0}")]
  PngExportError(#[from] PngExportError),
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

pub enum ExporterWrapper {
  #[cfg(feature = "export_pdf")]
  PdfExporter(PdfExporter),
  #[cfg(feature = "export_png")]
  PngExporter(PngExporter),
}

impl FromUrl for ExporterWrapper {
  type Error = ExportError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      #[cfg(feature = "export_pdf")]
      PdfExporter::SCHEME => {
        let exporter = PdfExporter::from_url(url)?;
        Ok(ExporterWrapper::PdfExporter(exporter))
      }
      #[cfg(feature = "export_png")]
      PngExporter::SCHEME => {
        let exporter = PngExporter::from_url(url)?;
        Ok(ExporterWrapper::PngExporter(exporter))
      }
      _ => Err(ExportError::SchemeMismatch),
    }
  }
}

impl ExportDocument for ExporterWrapper {
  type Error = ExportError;

  fn export_document<C: CaptureSource>(&self, view: &C) -> Result<PathBuf, Self::Error> {
    match self {
      #[cfg(feature = "export_pdf")]
      ExporterWrapper::PdfExporter(exporter) => {
        exporter.export_document(view).map_err(ExportError::from)
      }
      #[cfg(feature = "export_png")]
      ExporterWrapper::PngExporter(exporter) => {
        exporter.export_document(view).map_err(ExportError::from)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_content_stays_on_one_page() {
    let plan = paginate(210, 100);
    assert_eq!(plan.page_count(), 1);
    assert_eq!(plan.offsets_mm, vec![0.0]);
    assert_eq!(plan.image_height_mm, 100.0);
  }

  #[test]
  fn exact_page_height_yields_exactly_one_page() {
    let plan = paginate(210, 297);
    assert_eq!(plan.page_count(), 1);
    assert_eq!(plan.image_height_mm, PAGE_HEIGHT_MM);
  }

  #[test]
  fn half_page_overflow_adds_one_page_at_the_right_offset() {
    // 891 px 高、420 px 宽 → 445.5 mm，一页半
    let plan = paginate(420, 891);
    assert_eq!(plan.page_count(), 2);
    assert_eq!(plan.offsets_mm, vec![0.0, -PAGE_HEIGHT_MM]);
  }

  #[test]
  fn exact_multiples_emit_no_trailing_blank_page() {
    let plan = paginate(210, 594);
    assert_eq!(plan.page_count(), 2);
    assert_eq!(plan.offsets_mm, vec![0.0, -PAGE_HEIGHT_MM]);

    let plan = paginate(210, 891);
    assert_eq!(plan.page_count(), 3);
    assert_eq!(
      plan.offsets_mm,
      vec![0.0, -PAGE_HEIGHT_MM, -2.0 * PAGE_HEIGHT_MM]
    );
  }

  #[test]
  fn capture_scale_does_not_change_the_plan() {
    let base = paginate(210, 446);
    let doubled = paginate(420, 892);
    assert_eq!(base, doubled);
  }

  #[test]
  fn empty_raster_degrades_to_a_single_page() {
    assert_eq!(paginate(0, 0).page_count(), 1);
    assert_eq!(paginate(100, 0).page_count(), 1);
  }

  #[test]
  fn file_name_token_is_filesystem_safe_and_sortable() {
    let name = export_file_name("pdf");
    assert!(name.starts_with("brain-report-20"), "{name}");
    assert!(name.ends_with("Z.pdf"), "{name}");
    assert!(!name.contains(':'));
    // 扩展名分隔符之外不允许出现 '.'
    assert!(!name.trim_end_matches(".pdf").contains('.'));
  }
}
