// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/bin/report_export.rs - 导出阶段入口
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

use anyhow::Result;
use clap::Parser;
use tracing::info;
use url::Url;

use lingshu::FromUrl;
use lingshu::export::ExporterWrapper;
use lingshu::render::{ReportViewer, load_font};
use lingshu::store::StoreWrapper;
use lingshu::task::{ExportTask, Task};

/// 导出阶段：装配诊断报告并导出分页文档
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 结果存储（dir:<路径>）
  #[arg(long, value_name = "STORE", default_value = "dir:lingshu-store")]
  pub store: Url,

  /// 报告导出方式（pdf:<目录> 或 png:<目录>）
  #[arg(long, value_name = "EXPORT", default_value = "pdf:reports")]
  pub export: Url,

  /// 报告字体文件路径（TTF/OTF，仓库不附带字体）
  #[arg(long, value_name = "FONT")]
  pub font: PathBuf,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("结果存储: {}", args.store);
  info!("导出方式: {}", args.export);

  let mut store = StoreWrapper::from_url(&args.store)?;
  let font = load_font(&args.font)?;
  let exporter = ExporterWrapper::from_url(&args.export)?;
  ExportTask::new(ReportViewer::new(font), exporter).run_task(&mut store)?;

  Ok(())
}
