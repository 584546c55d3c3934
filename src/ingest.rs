// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/ingest.rs - 推理服务响应接收
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

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// 推理服务的响应信封。
/// 成功时携带 `image`（base64 PNG）与 `stats`，失败时携带 `error`。
#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
  image: Option<String>,
  stats: Option<Value>,
  error: Option<String>,
}

/// 校验通过的一次扫描结果。
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPayload {
  /// 原始统计子树，原样入库
  pub stats: Value,
  /// 解码后的预览图字节（PNG）
  pub preview: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum IngestError {
  #[error("响应载荷无法解析: {0}")]
  MalformedPayload(#[from] serde_json::Error),
  #[error("推理服务返回错误: {0}")]
  ServiceError(String),
  #[error("响应缺少 {0} 字段")]
  MissingField(&'static str),
  #[error("预览图像解码失败: {0}")]
  PreviewDecode(#[from] base64::DecodeError),
}

/// 解析并校验响应载荷。
///
/// 全部校验在返回前完成，调用方拿到 `Ok` 之后才允许写存储，
/// 任何失败都不会留下部分状态。
pub fn parse_response(payload: &[u8]) -> Result<ScanPayload, IngestError> {
  let envelope: ResponseEnvelope = serde_json::from_slice(payload)?;

  if let Some(message) = envelope.error {
    return Err(IngestError::ServiceError(message));
  }

  let image = envelope.image.ok_or(IngestError::MissingField("image"))?;
  let stats = envelope.stats.ok_or(IngestError::MissingField("stats"))?;

  let preview = STANDARD.decode(strip_data_url_prefix(&image))?;

  Ok(ScanPayload { stats, preview })
}

// 兼容 data URL 形式（"data:image/png;base64,..."）的图像字段
fn strip_data_url_prefix(image: &str) -> &str {
  if image.starts_with("data:") {
    match image.split_once(',') {
      Some((_, tail)) => tail,
      None => image,
    }
  } else {
    image
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn encoded(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
  }

  #[test]
  fn valid_response_yields_stats_and_preview() {
    let payload = json!({
      "image": encoded(b"png-bytes"),
      "stats": { "tumor_volume_mm3": 4500 }
    })
    .to_string();

    let scan = parse_response(payload.as_bytes()).unwrap();
    assert_eq!(scan.preview, b"png-bytes");
    assert_eq!(scan.stats["tumor_volume_mm3"], 4500);
  }

  #[test]
  fn data_url_prefix_is_tolerated() {
    let payload = json!({
      "image": format!("data:image/png;base64,{}", encoded(b"png-bytes")),
      "stats": {}
    })
    .to_string();

    let scan = parse_response(payload.as_bytes()).unwrap();
    assert_eq!(scan.preview, b"png-bytes");
  }

  #[test]
  fn service_error_payload_is_rejected() {
    let payload = json!({ "error": "No file uploaded" }).to_string();
    match parse_response(payload.as_bytes()) {
      Err(IngestError::ServiceError(message)) => assert_eq!(message, "No file uploaded"),
      other => panic!("意外结果: {other:?}"),
    }
  }

  #[test]
  fn error_field_wins_even_next_to_data() {
    let payload = json!({
      "error": "model crashed",
      "image": encoded(b"x"),
      "stats": {}
    })
    .to_string();
    assert!(matches!(
      parse_response(payload.as_bytes()),
      Err(IngestError::ServiceError(_))
    ));
  }

  #[test]
  fn missing_fields_are_rejected() {
    let payload = json!({ "stats": {} }).to_string();
    assert!(matches!(
      parse_response(payload.as_bytes()),
      Err(IngestError::MissingField("image"))
    ));

    let payload = json!({ "image": encoded(b"x") }).to_string();
    assert!(matches!(
      parse_response(payload.as_bytes()),
      Err(IngestError::MissingField("stats"))
    ));
  }

  #[test]
  fn malformed_json_and_bad_base64_are_rejected() {
    assert!(matches!(
      parse_response(b"not json"),
      Err(IngestError::MalformedPayload(_))
    ));

    let payload = json!({ "image": "@@not-base64@@", "stats": {} }).to_string();
    assert!(matches!(
      parse_response(payload.as_bytes()),
      Err(IngestError::PreviewDecode(_))
    ));
  }
}
