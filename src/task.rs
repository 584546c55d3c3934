// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/task.rs - 阶段任务编排
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
use tracing::{info, warn};

use crate::export::ExportDocument;
use crate::ingest;
use crate::metrics::{UniformPerturbation, derive_metrics};
use crate::normalize::normalize;
use crate::render::ViewReport;
use crate::report::{ReportMeta, assemble};
use crate::stats::SegmentationStats;
use crate::store::{ResultStore, Slot};

/// 流水线阶段任务。
///
/// 各阶段只通过结果存储交接数据，既可以在同一进程内串联，
/// 也可以经由目录存储作为独立进程分别运行。
pub trait Task<S: ResultStore>: Sized {
  type Error;
  fn run_task(self, store: &mut S) -> Result<(), Self::Error>;
}

/// 接收阶段：校验推理服务响应并写入存储。
///
/// 校验在任何写入之前完成，失败时存储保持原状；
/// 校验通过则本轮扫描覆盖全部槽位，上一轮的归并结果一并作废。
pub struct IngestTask {
  payload: Vec<u8>,
}

impl IngestTask {
  pub fn new(payload: Vec<u8>) -> Self {
    IngestTask { payload }
  }
}

impl<S: ResultStore> Task<S> for IngestTask
where
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Error = anyhow::Error;

  fn run_task(self, store: &mut S) -> Result<(), Self::Error> {
    info!("开始接收推理响应...");
    let scan = ingest::parse_response(&self.payload)?;
    info!("响应校验通过，预览图 {} 字节", scan.preview.len());

    store.put(Slot::RawResult, &serde_json::to_vec(&scan.stats)?)?;
    store.put(Slot::PreviewImage, &scan.preview)?;
    store.clear(Slot::SegmentationDetails)?;

    info!("原始结果与预览图已入库");
    Ok(())
  }
}

/// 查看阶段：消费原始结果，归并为规范统计并写回存储。
///
/// 原始结果为消费型读取，归并后的明细写入
/// [`Slot::SegmentationDetails`] 供导出阶段使用；
/// 存储为空时静默跳过，不视为错误。
#[derive(Debug, Default)]
pub struct InspectTask;

impl<S: ResultStore> Task<S> for InspectTask
where
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Error = anyhow::Error;

  fn run_task(self, store: &mut S) -> Result<(), Self::Error> {
    info!("开始归并分割统计...");
    let raw = store.take(Slot::RawResult)?.map(parse_slot);

    let Some(stats) = normalize(raw.as_ref()) else {
      info!("暂无扫描结果，等待上传");
      return Ok(());
    };

    info!("病灶区域: {}", stats.region);
    info!("严重程度: {}", stats.severity);
    info!(
      "病灶体积: {:.2} mm³ (覆盖率 {:.1}%)",
      stats.volume_mm3, stats.coverage_percent
    );

    store.put(Slot::SegmentationDetails, &serde_json::to_vec(&stats)?)?;
    info!("分割明细已入库");
    Ok(())
  }
}

/// 导出阶段：读取归并明细与预览图，装配报告并导出文档。
///
/// 明细缺失时导出空态报告。全部槽位只在导出成功后清空，
/// 失败时存储保持原状，重新执行导出即为重试。
pub struct ExportTask<V, E> {
  viewer: V,
  exporter: E,
}

impl<V, E> ExportTask<V, E> {
  pub fn new(viewer: V, exporter: E) -> Self {
    ExportTask { viewer, exporter }
  }
}

impl<S, V, E> Task<S> for ExportTask<V, E>
where
  S: ResultStore,
  S::Error: std::error::Error + Send + Sync + 'static,
  V: ViewReport,
  E: ExportDocument,
  E::Error: std::error::Error + Send + Sync + 'static,
{
  type Error = anyhow::Error;

  fn run_task(self, store: &mut S) -> Result<(), Self::Error> {
    info!("开始装配导出报告...");

    let details = store.get(Slot::SegmentationDetails)?.map(parse_slot);
    let stats = normalize(details.as_ref());
    if stats.is_none() {
      warn!("暂无分割明细，导出空态报告");
    }

    let preview = match store.get(Slot::PreviewImage)? {
      Some(bytes) => Some(image::load_from_memory(&bytes)?.to_rgb8()),
      None => None,
    };

    let placeholder = SegmentationStats::default();
    let mut perturbation = UniformPerturbation;
    let derived = derive_metrics(stats.as_ref().unwrap_or(&placeholder), &mut perturbation);
    let document = assemble(stats, derived, preview, ReportMeta::default());

    let view = self.viewer.view_report(document);
    let path = self.exporter.export_document(&view)?;
    info!("报告已导出: {}", path.display());

    // 导出落盘后，本轮扫描的交接数据即告消费完毕
    for slot in Slot::ALL {
      store.clear(slot)?;
    }

    Ok(())
  }
}

// 槽位内容应当是合法 JSON；不是时按原文退化处理
fn parse_slot(bytes: Vec<u8>) -> Value {
  match serde_json::from_slice(&bytes) {
    Ok(value) => value,
    Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
  }
}
