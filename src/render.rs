// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/render.rs - 报告视图排版与光栅化
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

use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use thiserror::Error;

use crate::metrics::TOTAL_SLICE_COUNT;
use crate::report::{MEDICAL_DISCLAIMER, PLATFORM_NAME, ReportDocument};

/// 报告画布逻辑宽度（A4 宽按 96 dpi 折算）
pub const CANVAS_WIDTH: u32 = 794;

const MARGIN: i32 = 48;
const CONTENT_WIDTH: i32 = CANVAS_WIDTH as i32 - 2 * MARGIN;
const COLUMN_GAP: i32 = 16;
const CARD_HEIGHT: i32 = 64;
const PANEL_PADDING: i32 = 16;

// 字号与文本渲染常量
const TITLE_SIZE: f32 = 28.0;
const HEADING_SIZE: f32 = 18.0;
const VALUE_SIZE: f32 = 20.0;
const SCORE_SIZE: f32 = 26.0;
const BODY_SIZE: f32 = 14.0;
const SMALL_SIZE: f32 = 11.0;
const CHAR_WIDTH_RATIO: f32 = 0.55; // 每字符平均宽度系数（粗略估计）

const INK: [u8; 3] = [33, 37, 41];
const MUTED: [u8; 3] = [108, 117, 125];
const ACCENT: [u8; 3] = [59, 130, 246];
const CARD_BG: [u8; 3] = [248, 250, 252];
const RULE: [u8; 3] = [226, 232, 240];
const WHITE: [u8; 3] = [255, 255, 255];

// 超出该像素数的画布视为排版失控
const MAX_CANVAS_PIXELS: u64 = 1 << 26;

#[derive(Error, Debug)]
pub enum RenderError {
  #[error("字体文件读取失败 {path}: {source}")]
  FontLoad {
    path: String,
    source: std::io::Error,
  },
  #[error("无效字体: {0}")]
  InvalidFont(#[from] ab_glyph::InvalidFont),
  #[error("画布尺寸过大: {width}x{height}")]
  CanvasTooLarge { width: u32, height: u32 },
}

/// 从文件加载报告字体。
pub fn load_font(path: &Path) -> Result<FontArc, RenderError> {
  let bytes = std::fs::read(path).map_err(|source| RenderError::FontLoad {
    path: path.display().to_string(),
    source,
  })?;
  Ok(FontArc::try_from_vec(bytes)?)
}

/// 可按倍率捕获为单张光栅图的报告视图。
/// 导出阶段只依赖这一接口。
pub trait CaptureSource {
  fn capture(&self, scale: u32) -> anyhow::Result<RgbImage>;
}

/// 由报告文档构造视图的工厂。
pub trait ViewReport {
  type Source: CaptureSource;
  fn view_report(&self, document: ReportDocument) -> Self::Source;
}

/// 排版结果：定位元素加画布总高。
pub struct Layout {
  pub width: u32,
  pub height: u32,
  pub elements: Vec<PlacedElement>,
}

/// 一个已定位的排版元素。文本内容随元素保存。
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedElement {
  Fill {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: [u8; 3],
  },
  Frame {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: [u8; 3],
  },
  Text {
    x: i32,
    y: i32,
    size: f32,
    color: [u8; 3],
    content: String,
  },
  Preview {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
  },
}

struct Flow {
  elements: Vec<PlacedElement>,
  cursor: i32,
}

impl Flow {
  fn new() -> Self {
    Flow {
      elements: Vec::new(),
      cursor: MARGIN,
    }
  }

  fn gap(&mut self, height: i32) {
    self.cursor += height;
  }

  fn put_text(&mut self, x: i32, y: i32, size: f32, color: [u8; 3], content: impl Into<String>) {
    self.elements.push(PlacedElement::Text {
      x,
      y,
      size,
      color,
      content: content.into(),
    });
  }

  /// 左对齐一行文本并推进光标。
  fn line(&mut self, size: f32, color: [u8; 3], content: impl Into<String>) {
    self.put_text(MARGIN, self.cursor, size, color, content);
    self.cursor += line_height(size);
  }

  /// 水平居中一行文本并推进光标。
  fn centered_line(&mut self, size: f32, color: [u8; 3], content: impl Into<String>) {
    let content = content.into();
    let x = MARGIN + (CONTENT_WIDTH - estimated_width(&content, size)) / 2;
    self.put_text(x.max(MARGIN), self.cursor, size, color, content);
    self.cursor += line_height(size);
  }

  fn heading(&mut self, content: &str) {
    self.line(HEADING_SIZE, INK, content);
    self.gap(8);
  }

  fn rule(&mut self) {
    self.gap(12);
    self.elements.push(PlacedElement::Fill {
      x: MARGIN,
      y: self.cursor,
      width: CONTENT_WIDTH as u32,
      height: 2,
      color: RULE,
    });
    self.gap(14);
  }

  /// 严重程度徽标：底色块加白色大写标签，返回占用高度。
  fn badge(&mut self, x: i32, y: i32, label: &str, color: [u8; 3]) -> i32 {
    let label = label.to_uppercase();
    let width = estimated_width(&label, BODY_SIZE) + 16;
    let height = line_height(BODY_SIZE) + 8;
    self.elements.push(PlacedElement::Fill {
      x,
      y,
      width: width as u32,
      height: height as u32,
      color,
    });
    self.put_text(x + 8, y + 4, BODY_SIZE, WHITE, label);
    height
  }

  /// 预留底色面板位置，内容排完后由 [`Flow::end_panel`] 回填实际高度。
  fn begin_panel(&mut self) -> (usize, i32) {
    let index = self.elements.len();
    self.elements.push(PlacedElement::Fill {
      x: MARGIN,
      y: self.cursor,
      width: CONTENT_WIDTH as u32,
      height: 0,
      color: CARD_BG,
    });
    let top = self.cursor;
    self.gap(PANEL_PADDING);
    (index, top)
  }

  fn end_panel(&mut self, index: usize, top: i32) {
    self.gap(PANEL_PADDING);
    let height = (self.cursor - top) as u32;
    self.elements[index] = PlacedElement::Fill {
      x: MARGIN,
      y: top,
      width: CONTENT_WIDTH as u32,
      height,
      color: CARD_BG,
    };
  }

  /// 标题加单值的小卡片，占格栅的一列。
  fn grid_card(&mut self, x: i32, y: i32, width: i32, title: &str, value: &str) {
    self.elements.push(PlacedElement::Frame {
      x,
      y,
      width: width as u32,
      height: CARD_HEIGHT as u32,
      color: RULE,
    });
    self.put_text(x + 12, y + 10, SMALL_SIZE, MUTED, title);
    let fitted = truncate_to(value, fit_chars(width - 24, BODY_SIZE));
    self.put_text(x + 12, y + 32, BODY_SIZE, INK, fitted);
  }
}

/// 报告排版。纯函数，与字体和绘制后端无关，可独立测试。
pub fn layout(document: &ReportDocument) -> Layout {
  let mut flow = Flow::new();
  let column = (CONTENT_WIDTH - COLUMN_GAP) / 2;

  // 头部
  flow.centered_line(SMALL_SIZE, ACCENT, "Medical Diagnostic Report");
  flow.gap(6);
  flow.centered_line(TITLE_SIZE, INK, format!("{PLATFORM_NAME} Analysis Report"));
  flow.centered_line(BODY_SIZE, MUTED, "AI-Powered Brain MRI Analysis Platform");
  flow.rule();

  // 患者与扫描信息，三列并排
  let info = [
    ("Patient ID", document.meta.patient_id.as_str()),
    ("Scan Date", document.meta.scan_date.as_str()),
    ("Report Generated", document.meta.report_date.as_str()),
  ];
  let info_top = flow.cursor;
  let info_column = CONTENT_WIDTH / 3;
  for (index, (label, value)) in info.iter().enumerate() {
    let x = MARGIN + info_column * index as i32;
    flow.put_text(x, info_top, SMALL_SIZE, MUTED, *label);
    flow.put_text(x, info_top + line_height(SMALL_SIZE) + 2, BODY_SIZE, INK, *value);
  }
  flow.cursor = info_top + line_height(SMALL_SIZE) + 2 + line_height(BODY_SIZE);
  flow.rule();

  // 分类结论
  flow.heading("Classification Results");
  let (panel, panel_top) = flow.begin_panel();
  let body_top = flow.cursor;
  let left = MARGIN + PANEL_PADDING;
  let right = MARGIN + column + COLUMN_GAP + PANEL_PADDING;
  flow.put_text(left, body_top, SMALL_SIZE, MUTED, "Diagnosis");
  flow.put_text(
    left,
    body_top + line_height(SMALL_SIZE) + 4,
    VALUE_SIZE,
    INK,
    document.classification.diagnosis.clone(),
  );
  let badge_top = body_top + line_height(SMALL_SIZE) + 4 + line_height(VALUE_SIZE) + 8;
  let badge_height = flow.badge(
    left,
    badge_top,
    &document.classification.status,
    document.segmentation.severity.badge_color(),
  );
  flow.put_text(right, body_top, SMALL_SIZE, MUTED, "Confidence Score");
  let score = format!("{:.1}", document.classification.confidence);
  let score_top = body_top + line_height(SMALL_SIZE) + 4;
  flow.put_text(right, score_top, SCORE_SIZE, ACCENT, score.clone());
  flow.put_text(
    right + estimated_width(&score, SCORE_SIZE) + 8,
    score_top + (line_height(SCORE_SIZE) - line_height(BODY_SIZE)),
    BODY_SIZE,
    MUTED,
    "%",
  );
  flow.cursor = badge_top + badge_height;
  flow.end_panel(panel, panel_top);
  flow.gap(20);

  // 分割明细格栅
  flow.heading("Segmentation Analysis");
  let grid_top = flow.cursor;
  let right_x = MARGIN + column + COLUMN_GAP;
  flow.grid_card(
    MARGIN,
    grid_top,
    column,
    "Affected Region",
    &document.segmentation.region,
  );
  flow.grid_card(
    right_x,
    grid_top,
    column,
    "Lesion Volume",
    &document.derived.formatted_volume,
  );
  let second_row = grid_top + CARD_HEIGHT + COLUMN_GAP;
  flow.elements.push(PlacedElement::Frame {
    x: MARGIN,
    y: second_row,
    width: column as u32,
    height: CARD_HEIGHT as u32,
    color: RULE,
  });
  flow.put_text(MARGIN + 12, second_row + 10, SMALL_SIZE, MUTED, "Severity Assessment");
  flow.badge(
    MARGIN + 12,
    second_row + 28,
    document.segmentation.severity.label(),
    document.segmentation.severity.badge_color(),
  );
  flow.grid_card(
    right_x,
    second_row,
    column,
    "Affected Slices",
    &format!(
      "{} / {}",
      document.derived.estimated_affected_slices, TOTAL_SLICE_COUNT
    ),
  );

  // 包围盒占满整行
  let coords_top = second_row + CARD_HEIGHT + COLUMN_GAP;
  let coords_height = if document.segmentation.bounding_box.is_some() {
    CARD_HEIGHT + 20
  } else {
    CARD_HEIGHT
  };
  flow.elements.push(PlacedElement::Frame {
    x: MARGIN,
    y: coords_top,
    width: CONTENT_WIDTH as u32,
    height: coords_height as u32,
    color: RULE,
  });
  flow.put_text(
    MARGIN + 12,
    coords_top + 10,
    SMALL_SIZE,
    MUTED,
    "Spatial Coordinates (Bounding Box)",
  );
  match document.segmentation.bounding_box {
    Some(bounding_box) => {
      flow.put_text(MARGIN + 12, coords_top + 32, SMALL_SIZE, MUTED, "X (min - max)");
      flow.put_text(
        MARGIN + 12,
        coords_top + 50,
        BODY_SIZE,
        INK,
        format!("{} - {}", bounding_box.x_min, bounding_box.x_max),
      );
      flow.put_text(
        MARGIN + 12 + column,
        coords_top + 32,
        SMALL_SIZE,
        MUTED,
        "Y (min - max)",
      );
      flow.put_text(
        MARGIN + 12 + column,
        coords_top + 50,
        BODY_SIZE,
        INK,
        format!("{} - {}", bounding_box.y_min, bounding_box.y_max),
      );
    }
    None => {
      flow.put_text(
        MARGIN + 12,
        coords_top + 32,
        BODY_SIZE,
        MUTED,
        "No coordinates available",
      );
    }
  }
  flow.cursor = coords_top + coords_height;
  flow.gap(20);

  // 分割预览，按内容宽度等比缩放
  if let Some(preview) = &document.preview {
    flow.heading("Segmentation Preview");
    let width = CONTENT_WIDTH as u32;
    let height = if preview.width() == 0 {
      0
    } else {
      width * preview.height() / preview.width()
    };
    flow.elements.push(PlacedElement::Preview {
      x: MARGIN,
      y: flow.cursor,
      width,
      height,
    });
    flow.cursor += height as i32;
    flow.gap(20);
  }

  // 临床建议
  flow.rule();
  flow.heading("Clinical Recommendations");
  for recommendation in &document.meta.recommendations {
    for (index, piece) in wrap_text(recommendation, fit_chars(CONTENT_WIDTH - 20, BODY_SIZE))
      .into_iter()
      .enumerate()
    {
      let prefix = if index == 0 { "• " } else { "  " };
      flow.line(BODY_SIZE, INK, format!("{prefix}{piece}"));
    }
    flow.gap(4);
  }

  // 技术参数，两列标签-值
  flow.rule();
  flow.heading("Technical Details");
  let rows = [
    ("Scan Type:", document.meta.scan_type.as_str()),
    ("Format:", document.meta.format.as_str()),
    ("Resolution:", document.meta.resolution.as_str()),
    ("Processing Time:", document.meta.processing_time.as_str()),
    ("Model Version:", document.meta.model_version.as_str()),
    ("Analysis Date:", document.meta.report_date.as_str()),
  ];
  let rows_top = flow.cursor;
  for (index, (label, value)) in rows.iter().enumerate() {
    let x = if index < 3 { MARGIN } else { MARGIN + column + COLUMN_GAP };
    let y = rows_top + line_height(BODY_SIZE) * (index as i32 % 3);
    flow.put_text(x, y, BODY_SIZE, MUTED, *label);
    let value_x = x + column - estimated_width(value, BODY_SIZE);
    flow.put_text(value_x, y, BODY_SIZE, INK, *value);
  }
  flow.cursor = rows_top + line_height(BODY_SIZE) * 3;
  flow.gap(20);

  // 免责声明
  let (panel, panel_top) = flow.begin_panel();
  let disclaimer_left = MARGIN + PANEL_PADDING;
  flow.put_text(
    disclaimer_left,
    flow.cursor,
    SMALL_SIZE,
    INK,
    "Medical Disclaimer:",
  );
  flow.cursor += line_height(SMALL_SIZE) + 2;
  for piece in wrap_text(
    MEDICAL_DISCLAIMER,
    fit_chars(CONTENT_WIDTH - 2 * PANEL_PADDING, SMALL_SIZE),
  ) {
    flow.put_text(disclaimer_left, flow.cursor, SMALL_SIZE, MUTED, piece);
    flow.cursor += line_height(SMALL_SIZE);
  }
  flow.end_panel(panel, panel_top);
  flow.gap(16);

  // 页脚
  flow.centered_line(SMALL_SIZE, MUTED, document.footer_line());

  let height = (flow.cursor + MARGIN) as u32;
  Layout {
    width: CANVAS_WIDTH,
    height,
    elements: flow.elements,
  }
}

/// 报告视图：持有文档与字体，按倍率光栅化。
pub struct ReportView {
  document: ReportDocument,
  font: FontArc,
}

impl ReportView {
  pub fn new(document: ReportDocument, font: FontArc) -> Self {
    ReportView { document, font }
  }

  pub fn document(&self) -> &ReportDocument {
    &self.document
  }

  fn paint(&self, scale: u32) -> Result<RgbImage, RenderError> {
    let plan = layout(&self.document);
    let width = plan.width * scale;
    let height = plan.height * scale;
    if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
      return Err(RenderError::CanvasTooLarge { width, height });
    }

    let mut canvas = RgbImage::from_pixel(width, height, Rgb(WHITE));
    let s = scale as i32;

    for element in &plan.elements {
      match element {
        PlacedElement::Fill {
          x,
          y,
          width,
          height,
          color,
        } => {
          if *width > 0 && *height > 0 {
            let rect = Rect::at(x * s, y * s).of_size(width * scale, height * scale);
            draw_filled_rect_mut(&mut canvas, rect, Rgb(*color));
          }
        }
        PlacedElement::Frame {
          x,
          y,
          width,
          height,
          color,
        } => {
          // 两层空心矩形画出 2 像素边框
          for inset in 0..2i32 {
            let w = width * scale - 2 * inset as u32;
            let h = height * scale - 2 * inset as u32;
            let rect = Rect::at(x * s + inset, y * s + inset).of_size(w, h);
            draw_hollow_rect_mut(&mut canvas, rect, Rgb(*color));
          }
        }
        PlacedElement::Text {
          x,
          y,
          size,
          color,
          content,
        } => {
          let px = PxScale::from(size * scale as f32);
          draw_text_mut(&mut canvas, Rgb(*color), x * s, y * s, px, &self.font, content);
        }
        PlacedElement::Preview {
          x,
          y,
          width,
          height,
        } => {
          if let Some(preview) = &self.document.preview
            && *width > 0
            && *height > 0
          {
            let resized = image::imageops::resize(
              preview,
              width * scale,
              height * scale,
              image::imageops::FilterType::Triangle,
            );
            image::imageops::overlay(&mut canvas, &resized, (x * s) as i64, (y * s) as i64);
          }
        }
      }
    }

    Ok(canvas)
  }
}

impl CaptureSource for ReportView {
  fn capture(&self, scale: u32) -> anyhow::Result<RgbImage> {
    anyhow::ensure!(scale >= 1, "捕获倍率必须不小于 1");
    Ok(self.paint(scale)?)
  }
}

/// [`ReportView`] 的工厂，给每份文档配同一字体。
pub struct ReportViewer {
  font: FontArc,
}

impl ReportViewer {
  pub fn new(font: FontArc) -> Self {
    ReportViewer { font }
  }
}

impl ViewReport for ReportViewer {
  type Source = ReportView;

  fn view_report(&self, document: ReportDocument) -> ReportView {
    ReportView::new(document, self.font.clone())
  }
}

fn line_height(size: f32) -> i32 {
  (size * 1.5) as i32
}

// 估算文本宽度（粗略估计）
fn estimated_width(text: &str, size: f32) -> i32 {
  (text.chars().count() as f32 * size * CHAR_WIDTH_RATIO) as i32
}

fn fit_chars(width: i32, size: f32) -> usize {
  (width as f32 / (size * CHAR_WIDTH_RATIO)) as usize
}

fn truncate_to(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }
  let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
  format!("{kept}…")
}

// 按词贪心换行，超长单词整词成行
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current = String::new();

  for word in text.split_whitespace() {
    if current.is_empty() {
      current = word.to_string();
    } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
      current.push(' ');
      current.push_str(word);
    } else {
      lines.push(current);
      current = word.to_string();
    }
  }
  if !current.is_empty() {
    lines.push(current);
  }

  lines
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::metrics::{FixedPerturbation, derive_metrics};
  use crate::report::{ReportMeta, assemble};
  use crate::stats::{BoundingBox, SegmentationStats, Severity};

  fn document_for(stats: Option<SegmentationStats>, preview: Option<RgbImage>) -> ReportDocument {
    let mut perturbation = FixedPerturbation(0.0);
    let effective = stats.clone().unwrap_or_default();
    let derived = derive_metrics(&effective, &mut perturbation);
    assemble(stats, derived, preview, ReportMeta::default())
  }

  fn texts(plan: &Layout) -> Vec<&str> {
    plan
      .elements
      .iter()
      .filter_map(|element| match element {
        PlacedElement::Text { content, .. } => Some(content.as_str()),
        _ => None,
      })
      .collect()
  }

  #[test]
  fn empty_state_document_still_lays_out() {
    let plan = layout(&document_for(None, None));
    assert_eq!(plan.width, CANVAS_WIDTH);
    assert!(plan.height > 0);
    assert!(texts(&plan).contains(&"No coordinates available"));
    assert!(
      !plan
        .elements
        .iter()
        .any(|element| matches!(element, PlacedElement::Preview { .. }))
    );
  }

  #[test]
  fn all_elements_stay_inside_the_canvas() {
    let stats = SegmentationStats {
      region: "Frontal Lobe".to_string(),
      volume_mm3: 4500.0,
      severity: Severity::Severe,
      bounding_box: Some(BoundingBox {
        x_min: 10,
        x_max: 50,
        y_min: 20,
        y_max: 60,
      }),
      area_pixels: 1500,
      coverage_percent: 30.0,
      affected_slices: None,
    };
    let preview = RgbImage::from_pixel(256, 256, Rgb([40, 40, 40]));
    let plan = layout(&document_for(Some(stats), Some(preview)));

    for element in &plan.elements {
      let (x, y, w, h) = match element {
        PlacedElement::Fill {
          x, y, width, height, ..
        }
        | PlacedElement::Frame {
          x, y, width, height, ..
        }
        | PlacedElement::Preview {
          x, y, width, height,
        } => (*x, *y, *width as i32, *height as i32),
        PlacedElement::Text { x, y, .. } => (*x, *y, 0, 0),
      };
      assert!(x >= 0 && y >= 0, "{element:?}");
      assert!(x + w <= CANVAS_WIDTH as i32, "{element:?}");
      assert!(y + h <= plan.height as i32, "{element:?}");
    }
  }

  #[test]
  fn preview_is_scaled_to_content_width() {
    let preview = RgbImage::from_pixel(256, 128, Rgb([0, 0, 0]));
    let plan = layout(&document_for(None, Some(preview)));

    let placed = plan
      .elements
      .iter()
      .find_map(|element| match element {
        PlacedElement::Preview { width, height, .. } => Some((*width, *height)),
        _ => None,
      })
      .unwrap();
    assert_eq!(placed.0, (CANVAS_WIDTH as i32 - 2 * MARGIN) as u32);
    assert_eq!(placed.1, placed.0 / 2);
  }

  #[test]
  fn severity_badge_carries_severity_color() {
    let stats = SegmentationStats {
      volume_mm3: 4500.0,
      severity: Severity::Severe,
      ..SegmentationStats::default()
    };
    let plan = layout(&document_for(Some(stats), None));

    let badge_fills = plan
      .elements
      .iter()
      .filter(|element| {
        matches!(
          element,
          PlacedElement::Fill { color, .. } if *color == Severity::Severe.badge_color()
        )
      })
      .count();
    // 分类结论与严重程度卡片各一个徽标
    assert_eq!(badge_fills, 2);
    assert!(texts(&plan).contains(&"SEVERE"));
  }

  #[test]
  fn layout_height_grows_with_recommendations() {
    let short = layout(&document_for(None, None)).height;

    let mut perturbation = FixedPerturbation(0.0);
    let stats = SegmentationStats::default();
    let derived = derive_metrics(&stats, &mut perturbation);
    let mut meta = ReportMeta::default();
    meta
      .recommendations
      .extend((0..8).map(|index| format!("Additional follow-up item number {index}")));
    let long = layout(&assemble(None, derived, None, meta)).height;

    assert!(long > short);
  }

  #[test]
  fn wrap_text_respects_the_limit() {
    let pieces = wrap_text("one two three four five", 9);
    assert_eq!(pieces, vec!["one two", "three", "four five"]);
    assert!(pieces.iter().all(|piece| piece.chars().count() <= 9));

    assert_eq!(wrap_text("", 10), Vec::<String>::new());
    assert_eq!(wrap_text("oversizedword", 5), vec!["oversizedword"]);
  }
}
