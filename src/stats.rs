// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/stats.rs - 规范化分割统计数据模型
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

use serde::{Deserialize, Serialize};

// 体积分级阈值（单位 mm³，左闭右开）
const SEVERITY_MODERATE_MM3: f64 = 1000.0;
const SEVERITY_SEVERE_MM3: f64 = 3000.0;
const SEVERITY_CRITICAL_MM3: f64 = 8000.0;

/// 病灶严重程度分级。
///
/// 上游给出的分级标签按原样解析；标签缺失时由体积推导，
/// 无法识别的标签一律归入 [`Severity::Unknown`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Severity {
  Mild,
  Moderate,
  Severe,
  Critical,
  #[default]
  Unknown,
}

impl Severity {
  /// 按体积分级：`<1000` Mild、`[1000,3000)` Moderate、
  /// `[3000,8000)` Severe、`>=8000` Critical。
  pub fn from_volume(volume_mm3: f64) -> Self {
    if volume_mm3 < SEVERITY_MODERATE_MM3 {
      Severity::Mild
    } else if volume_mm3 < SEVERITY_SEVERE_MM3 {
      Severity::Moderate
    } else if volume_mm3 < SEVERITY_CRITICAL_MM3 {
      Severity::Severe
    } else {
      Severity::Critical
    }
  }

  /// 大小写不敏感地解析分级标签。
  pub fn parse(label: &str) -> Self {
    match label.trim().to_ascii_lowercase().as_str() {
      "mild" => Severity::Mild,
      "moderate" => Severity::Moderate,
      "severe" => Severity::Severe,
      "critical" => Severity::Critical,
      _ => Severity::Unknown,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Severity::Mild => "Mild",
      Severity::Moderate => "Moderate",
      Severity::Severe => "Severe",
      Severity::Critical => "Critical",
      Severity::Unknown => "Unknown",
    }
  }

  /// 报告徽标底色（RGB）。
  pub fn badge_color(self) -> [u8; 3] {
    match self {
      Severity::Mild => [34, 197, 94],
      Severity::Moderate => [234, 179, 8],
      Severity::Severe => [249, 115, 22],
      Severity::Critical => [239, 68, 68],
      Severity::Unknown => [115, 115, 115],
    }
  }
}

impl std::fmt::Display for Severity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

/// 病灶在扫描平面上的包围盒，单位为像素。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
  pub x_min: i64,
  pub x_max: i64,
  pub y_min: i64,
  pub y_max: i64,
}

/// 规范化后的分割统计。
///
/// 所有来源（推理服务响应、存储的分割明细）统一归并到这一形状，
/// 下游阶段只消费本结构。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationStats {
  pub region: String,
  pub volume_mm3: f64,
  pub severity: Severity,
  pub bounding_box: Option<BoundingBox>,
  #[serde(rename = "tumor_area_pixels")]
  pub area_pixels: u64,
  pub coverage_percent: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub affected_slices: Option<u32>,
}

impl Default for SegmentationStats {
  /// 空态记录：页面在没有任何结果时展示的占位值。
  fn default() -> Self {
    SegmentationStats {
      region: "Unknown".to_string(),
      volume_mm3: 0.0,
      severity: Severity::Unknown,
      bounding_box: None,
      area_pixels: 0,
      coverage_percent: 0.0,
      affected_slices: None,
    }
  }
}
