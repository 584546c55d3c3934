// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/normalize.rs - 分割统计字段归并
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

use serde_json::Value;

use crate::stats::{BoundingBox, SegmentationStats, Severity};

// 各规范字段的候选键，按优先级排列，取第一个有定义（存在且非 null）的值。
// 上游服务的字段命名会随版本漂移，这里集中吸收所有已知拼写。
const REGION_KEYS: [&str; 4] = ["affected_region", "affectedRegion", "region", "location"];
const VOLUME_KEYS: [&str; 5] = [
  "tumor_volume_mm3",
  "volume_mm3",
  "volume_mm",
  "volume",
  "tumorVolume",
];
const BOUNDING_BOX_KEYS: [&str; 3] = ["bounding_box", "bbox", "boundingBox"];
const AREA_KEYS: [&str; 3] = ["tumor_area_pixels", "area_px", "area"];
const COVERAGE_KEYS: [&str; 4] = [
  "tumor_coverage_percent",
  "coverage_percent",
  "coveragePercent",
  "coverage",
];
const SLICE_KEYS: [&str; 4] = [
  "affected_slices",
  "affectedSlices",
  "slice_count",
  "slicesAffected",
];

const DEFAULT_REGION: &str = "Unknown";

/// 把任意形状的原始统计归并为规范记录。
///
/// 输入为 `None` 或 JSON null 时返回 `None`，表示“尚无结果”而非错误。
/// 字符串输入先尝试按 JSON 解析，解析失败则按原值探测（得到全默认记录）。
/// 本函数是全函数：永不失败，缺失的数据退化为默认值。
pub fn normalize(raw: Option<&Value>) -> Option<SegmentationStats> {
  let raw = raw?;
  let parsed;
  let source = match raw {
    Value::Null => return None,
    Value::String(text) => {
      parsed = serde_json::from_str::<Value>(text).unwrap_or_else(|_| raw.clone());
      match &parsed {
        Value::Null => return None,
        _ => &parsed,
      }
    }
    other => other,
  };

  Some(resolve(source))
}

fn resolve(source: &Value) -> SegmentationStats {
  let region = first_defined(source, &REGION_KEYS)
    .and_then(Value::as_str)
    .unwrap_or(DEFAULT_REGION)
    .to_string();

  let volume_mm3 = first_defined(source, &VOLUME_KEYS)
    .map(|value| as_number(value).unwrap_or(0.0))
    .unwrap_or(0.0);
  let volume_mm3 = if volume_mm3.is_finite() && volume_mm3 > 0.0 {
    volume_mm3
  } else {
    0.0
  };

  // 上游给了标签就按原样解析，否则仅在体积非零时按体积推导
  let severity = match source.get("severity").filter(|v| !v.is_null()) {
    Some(value) => match value.as_str() {
      Some(label) => Severity::parse(label),
      None => derive_severity(volume_mm3),
    },
    None => derive_severity(volume_mm3),
  };

  let bounding_box = first_defined(source, &BOUNDING_BOX_KEYS).and_then(resolve_bounding_box);

  let area_pixels = first_defined(source, &AREA_KEYS)
    .and_then(as_number)
    .filter(|n| n.is_finite() && *n > 0.0)
    .map(|n| n as u64)
    .unwrap_or(0);

  let coverage_percent = first_defined(source, &COVERAGE_KEYS)
    .and_then(as_number)
    .filter(|n| n.is_finite())
    .map(|n| n.clamp(0.0, 100.0))
    .unwrap_or(0.0);

  let affected_slices = first_defined(source, &SLICE_KEYS)
    .and_then(as_number)
    .filter(|n| n.is_finite() && *n >= 0.0)
    .map(|n| n as u32);

  SegmentationStats {
    region,
    volume_mm3,
    severity,
    bounding_box,
    area_pixels,
    coverage_percent,
    affected_slices,
  }
}

fn derive_severity(volume_mm3: f64) -> Severity {
  if volume_mm3 > 0.0 {
    Severity::from_volume(volume_mm3)
  } else {
    Severity::Unknown
  }
}

// “有定义”指键存在且取值非 null
fn first_defined<'a>(source: &'a Value, keys: &[&str]) -> Option<&'a Value> {
  keys
    .iter()
    .find_map(|key| source.get(key).filter(|value| !value.is_null()))
}

// 数字或数字字符串，其余一律视为无值
fn as_number(value: &Value) -> Option<f64> {
  value
    .as_f64()
    .or_else(|| value.as_str().and_then(|text| text.trim().parse().ok()))
}

// 包围盒四轴同时解析蛇形与驼峰拼写，任一轴缺失则整体视为无包围盒
fn resolve_bounding_box(value: &Value) -> Option<BoundingBox> {
  if !value.is_object() {
    return None;
  }

  let x_min = resolve_axis(value, "x_min", "xMin")?;
  let x_max = resolve_axis(value, "x_max", "xMax")?;
  let y_min = resolve_axis(value, "y_min", "yMin")?;
  let y_max = resolve_axis(value, "y_max", "yMax")?;

  Some(BoundingBox {
    x_min,
    x_max,
    y_min,
    y_max,
  })
}

fn resolve_axis(value: &Value, snake: &str, camel: &str) -> Option<i64> {
  first_defined(value, &[snake, camel])
    .and_then(as_number)
    .filter(|n| n.is_finite())
    .map(|n| n as i64)
}
