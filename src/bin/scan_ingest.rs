// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/bin/scan_ingest.rs - 接收阶段入口
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
use lingshu::store::StoreWrapper;
use lingshu::task::{IngestTask, Task};

/// 接收阶段：校验推理服务响应并写入共享结果存储
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 推理服务响应载荷文件（JSON）
  #[arg(long, value_name = "FILE")]
  pub response: PathBuf,

  /// 结果存储（dir:<路径>）
  #[arg(long, value_name = "STORE", default_value = "dir:lingshu-store")]
  pub store: Url,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("响应载荷: {}", args.response.display());
  info!("结果存储: {}", args.store);

  let mut store = StoreWrapper::from_url(&args.store)?;
  let payload = std::fs::read(&args.response)?;
  IngestTask::new(payload).run_task(&mut store)?;

  Ok(())
}
