// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use lingshu::FromUrl;
use lingshu::export::ExporterWrapper;
use lingshu::render::{ReportViewer, load_font};
use lingshu::store::StoreWrapper;
use lingshu::task::{ExportTask, IngestTask, InspectTask, Task};

/// 完整流水线：接收 → 归并 → 导出，一次执行三个阶段。
fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("响应载荷: {}", args.response.display());
  info!("结果存储: {}", args.store);
  info!("导出方式: {}", args.export);

  let mut store = StoreWrapper::from_url(&args.store)?;

  let payload = std::fs::read(&args.response)?;
  IngestTask::new(payload).run_task(&mut store)?;
  InspectTask.run_task(&mut store)?;

  let font = load_font(&args.font)?;
  let exporter = ExporterWrapper::from_url(&args.export)?;
  ExportTask::new(ReportViewer::new(font), exporter).run_task(&mut store)?;

  Ok(())
}
