// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/export/pdf.rs - 分页 PDF 导出
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

use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::export::{
  CAPTURE_SCALE, ExportDocument, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PagePlan, export_file_name,
  paginate,
};
use crate::render::CaptureSource;
use crate::{FromUrl, FromUrlWithScheme};

// 毫米到 PDF 点（1/72 英寸）
const PT_PER_MM: f64 = 72.0 / 25.4;
const JPEG_QUALITY: u8 = 100;

/// 分页 PDF 导出。
///
/// 报告视图捕获为单张长图，按 A4 页高切分装配为多页文档。
/// 整份文档只嵌入一份图像数据，各页共用同一个 XObject，
/// 仅放置位移不同，越界部分由页面边界裁剪。
pub struct PdfExporter {
  directory: PathBuf,
}

#[derive(Error, Debug)]
pub enum PdfExportError {
  #[error("视图捕获失败: {0}")]
  CaptureError(#[from] anyhow::Error),
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("PDF 错误: {0}")]
  PdfError(#[from] lopdf::Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

impl FromUrlWithScheme for PdfExporter {
  const SCHEME: &'static str = "pdf";
}

impl FromUrl for PdfExporter {
  type Error = PdfExportError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(PdfExportError::SchemeMismatch(format!(
        "期望导出方式 '{}', 实际导出方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    Ok(PdfExporter {
      directory: PathBuf::from(uri.path()),
    })
  }
}

impl PdfExporter {
  pub fn new(directory: impl Into<PathBuf>) -> Self {
    PdfExporter {
      directory: directory.into(),
    }
  }

  fn assemble_document(capture: &RgbImage, plan: &PagePlan) -> Result<Document, PdfExportError> {
    let mut jpeg = Vec::new();
    capture.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY))?;

    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let image_id = document.add_object(Stream::new(
      dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => capture.width() as i64,
        "Height" => capture.height() as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "DCTDecode",
      },
      jpeg,
    ));
    let resources_id = document.add_object(dictionary! {
      "XObject" => dictionary! { "Im0" => image_id },
    });

    let page_width_pt = PAGE_WIDTH_MM * PT_PER_MM;
    let page_height_pt = PAGE_HEIGHT_MM * PT_PER_MM;
    let image_height_pt = plan.image_height_mm * PT_PER_MM;

    let mut kids: Vec<Object> = Vec::with_capacity(plan.page_count());
    for offset_mm in &plan.offsets_mm {
      // PDF 纵轴向上，顶边位移换算成图像底边坐标
      let bottom_pt = page_height_pt - offset_mm * PT_PER_MM - image_height_pt;
      let content = Content {
        operations: vec![
          Operation::new("q", vec![]),
          Operation::new(
            "cm",
            vec![
              Object::Real(page_width_pt as f32),
              0.into(),
              0.into(),
              Object::Real(image_height_pt as f32),
              0.into(),
              Object::Real(bottom_pt as f32),
            ],
          ),
          Operation::new("Do", vec!["Im0".into()]),
          Operation::new("Q", vec![]),
        ],
      };
      let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));
      let page_id = document.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
      });
      kids.push(page_id.into());
    }

    // MediaBox 与 Resources 挂在页树节点上，由各页继承
    let pages = dictionary! {
      "Type" => "Pages",
      "Kids" => kids,
      "Count" => plan.page_count() as i64,
      "Resources" => resources_id,
      "MediaBox" => vec![
        0.into(),
        0.into(),
        Object::Real(page_width_pt as f32),
        Object::Real(page_height_pt as f32),
      ],
    };
    document.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = document.add_object(dictionary! {
      "Type" => "Catalog",
      "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);
    document.compress();

    Ok(document)
  }
}

impl ExportDocument for PdfExporter {
  type Error = PdfExportError;

  fn export_document<C: CaptureSource>(&self, view: &C) -> Result<PathBuf, Self::Error> {
    let capture = view.capture(CAPTURE_SCALE)?;
    let plan = paginate(capture.width(), capture.height());
    let mut document = Self::assemble_document(&capture, &plan)?;

    std::fs::create_dir_all(&self.directory)?;

    // 先写临时文件再改名，导出中途失败不会留下半截文档
    let file_name = export_file_name("pdf");
    let path = self.directory.join(&file_name);
    let staging = self.directory.join(format!("{file_name}.part"));
    document.save(&staging)?;
    std::fs::rename(&staging, &path)?;

    info!("导出 PDF 报告 {} 页: {}", plan.page_count(), path.display());
    Ok(path)
  }
}
