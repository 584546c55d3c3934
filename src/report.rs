// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/report.rs - 诊断报告装配
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

use chrono::Local;
use image::RgbImage;

use crate::metrics::DerivedMetrics;
use crate::stats::SegmentationStats;

pub const PLATFORM_NAME: &str = "DeepBrainDx";

pub const MEDICAL_DISCLAIMER: &str = "This report is generated by an AI-assisted diagnostic \
system and should be used as a decision support tool only. All findings must be reviewed and \
validated by a qualified radiologist or medical professional. This analysis does not replace \
professional medical judgment and should not be used as the sole basis for clinical decisions.";

/// 本部署固定的报告元数据。
#[derive(Debug, Clone, PartialEq)]
pub struct ReportMeta {
  pub patient_id: String,
  pub scan_date: String,
  pub report_date: String,
  pub diagnosis: String,
  pub scan_type: String,
  pub format: String,
  pub resolution: String,
  pub processing_time: String,
  pub model_version: String,
  pub recommendations: Vec<String>,
}

impl Default for ReportMeta {
  fn default() -> Self {
    let today = Local::now().format("%Y-%m-%d").to_string();
    ReportMeta {
      patient_id: "DBD-2024-001".to_string(),
      scan_date: today.clone(),
      report_date: today,
      diagnosis: "Tumor".to_string(),
      scan_type: "MRI Brain".to_string(),
      format: "DICOM".to_string(),
      resolution: "256x256x128".to_string(),
      processing_time: "3.9s".to_string(),
      model_version: "v2.1.0".to_string(),
      recommendations: vec![
        "Immediate neurological consultation recommended".to_string(),
        "Follow-up scan in 24-48 hours to assess progression".to_string(),
        "Consider anticoagulation therapy pending specialist review".to_string(),
        "Monitor vital signs and neurological status closely".to_string(),
      ],
    }
  }
}

/// 分类结论。置信度取自派生指标，状态取自分割严重程度；
/// 两条流水线在报告里首次汇合，这一耦合是有意为之。
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
  pub diagnosis: String,
  pub confidence: f64,
  pub status: String,
}

/// 一次报告渲染的完整输入，在每次进入报告阶段时重建。
#[derive(Debug, Clone)]
pub struct ReportDocument {
  pub meta: ReportMeta,
  pub classification: Classification,
  pub segmentation: SegmentationStats,
  pub derived: DerivedMetrics,
  pub preview: Option<RgbImage>,
}

impl ReportDocument {
  /// 页脚行："Report ID ... | Generated by ..."
  pub fn footer_line(&self) -> String {
    format!(
      "Report ID: {} | Generated by {} {}",
      self.meta.patient_id, PLATFORM_NAME, self.meta.model_version
    )
  }
}

/// 装配报告文档。
///
/// `stats` 为 `None`（尚无扫描结果）时退化为占位记录，
/// 报告必须始终可渲染，空态也要产出结构完整的文档。
pub fn assemble(
  stats: Option<SegmentationStats>,
  derived: DerivedMetrics,
  preview: Option<RgbImage>,
  meta: ReportMeta,
) -> ReportDocument {
  let segmentation = stats.unwrap_or_default();
  let classification = Classification {
    diagnosis: meta.diagnosis.clone(),
    confidence: derived.confidence_score,
    status: segmentation.severity.to_string(),
  };

  ReportDocument {
    meta,
    classification,
    segmentation,
    derived,
    preview,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::metrics::{FixedPerturbation, derive_metrics};
  use crate::stats::Severity;

  fn derived_for(stats: &SegmentationStats) -> DerivedMetrics {
    let mut perturbation = FixedPerturbation(0.0);
    derive_metrics(stats, &mut perturbation)
  }

  #[test]
  fn absent_stats_assemble_into_placeholder_document() {
    let placeholder = SegmentationStats::default();
    let derived = derived_for(&placeholder);
    let document = assemble(None, derived, None, ReportMeta::default());

    assert_eq!(document.segmentation, placeholder);
    assert_eq!(document.classification.status, "Unknown");
    // 空态体积为零，置信度固定在基线
    assert_eq!(document.classification.confidence, 93.5);
    assert_eq!(document.derived.formatted_volume, "0.00 mm³");
    assert!(document.preview.is_none());
  }

  #[test]
  fn classification_couples_to_derived_confidence_and_severity() {
    let stats = SegmentationStats {
      volume_mm3: 4500.0,
      coverage_percent: 30.0,
      severity: Severity::Severe,
      ..SegmentationStats::default()
    };
    let derived = derived_for(&stats);
    let confidence = derived.confidence_score;
    let document = assemble(Some(stats), derived, None, ReportMeta::default());

    assert_eq!(document.classification.confidence, confidence);
    assert_eq!(document.classification.status, "Severe");
    assert_eq!(document.classification.diagnosis, "Tumor");
  }

  #[test]
  fn footer_names_patient_and_model_version() {
    let stats = SegmentationStats::default();
    let derived = derived_for(&stats);
    let document = assemble(None, derived, None, ReportMeta::default());

    assert_eq!(
      document.footer_line(),
      "Report ID: DBD-2024-001 | Generated by DeepBrainDx v2.1.0"
    );
  }
}
