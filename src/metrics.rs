// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/metrics.rs - 派生指标计算
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

use rand::Rng;
use serde::Serialize;

use crate::stats::SegmentationStats;

/// 本部署的扫描切片总数
pub const TOTAL_SLICE_COUNT: u32 = 128;

// 置信度合成参数：基线加有界扰动加覆盖率加成，夹在 [92, 95]
const CONFIDENCE_BASELINE: f64 = 93.5;
const CONFIDENCE_JITTER: f64 = 1.5;
const CONFIDENCE_COVERAGE_GAIN: f64 = 1.5;
const CONFIDENCE_MIN: f64 = 92.0;
const CONFIDENCE_MAX: f64 = 95.0;

const CM3_THRESHOLD_MM3: f64 = 1000.0;

/// 置信度扰动来源。
///
/// 置信度不是模型输出，而是叠加在真实覆盖率之上的有界展示指标，
/// 生产环境取均匀随机扰动，测试注入固定值以获得确定性。
pub trait Perturbation {
  /// 取一个 `[-1.5, 1.5)` 内的扰动样本。
  fn sample(&mut self) -> f64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPerturbation;

impl Perturbation for UniformPerturbation {
  fn sample(&mut self) -> f64 {
    rand::rng().random_range(-CONFIDENCE_JITTER..CONFIDENCE_JITTER)
  }
}

/// 固定扰动，用于确定性测试。
#[derive(Debug, Clone, Copy)]
pub struct FixedPerturbation(pub f64);

impl Perturbation for FixedPerturbation {
  fn sample(&mut self) -> f64 {
    self.0
  }
}

/// 每次报告装配时重新计算的派生指标，从不缓存。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
  pub confidence_score: f64,
  pub formatted_volume: String,
  pub estimated_affected_slices: u32,
}

pub fn derive_metrics(
  stats: &SegmentationStats,
  perturbation: &mut dyn Perturbation,
) -> DerivedMetrics {
  // 受累切片数一律按覆盖率重新估算，上游给出的计数只保留在规范记录里
  DerivedMetrics {
    confidence_score: confidence_score(stats.volume_mm3, stats.coverage_percent, perturbation),
    formatted_volume: format_volume(stats.volume_mm3),
    estimated_affected_slices: estimate_affected_slices(stats.coverage_percent),
  }
}

/// 合成置信度：体积为零时固定取基线 93.5，
/// 否则 `93.5 + 扰动 + 覆盖率/100 × 1.5`，夹到 `[92, 95]` 后保留一位小数。
pub fn confidence_score(
  volume_mm3: f64,
  coverage_percent: f64,
  perturbation: &mut dyn Perturbation,
) -> f64 {
  if volume_mm3 == 0.0 {
    return CONFIDENCE_BASELINE;
  }

  let raw = CONFIDENCE_BASELINE
    + perturbation.sample()
    + (coverage_percent / 100.0) * CONFIDENCE_COVERAGE_GAIN;
  let clamped = raw.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
  (clamped * 10.0).round() / 10.0
}

/// 按覆盖率估算受累切片数：`ceil(coverage × 128 / 100)`，下限为 0。
pub fn estimate_affected_slices(coverage_percent: f64) -> u32 {
  let estimate = (coverage_percent * TOTAL_SLICE_COUNT as f64 / 100.0).ceil();
  if estimate.is_finite() && estimate > 0.0 {
    estimate as u32
  } else {
    0
  }
}

/// 体积展示：零显示为 `"0.00 mm³"`，超过 1000 mm³ 换算为 cm³，均保留两位小数。
pub fn format_volume(volume_mm3: f64) -> String {
  if volume_mm3 == 0.0 {
    return "0.00 mm³".to_string();
  }
  if volume_mm3 >= CM3_THRESHOLD_MM3 {
    format!("{:.2} cm³", volume_mm3 / CM3_THRESHOLD_MM3)
  } else {
    format!("{volume_mm3:.2} mm³")
  }
}
