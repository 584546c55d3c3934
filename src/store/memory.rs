// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/store/memory.rs - 内存存储
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

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

use crate::store::{ResultStore, Slot};
use crate::{FromUrl, FromUrlWithScheme};

/// 进程内结果存储，用于单进程流水线与测试。
#[derive(Debug, Default)]
pub struct MemoryStore {
  slots: HashMap<Slot, Vec<u8>>,
}

#[derive(Error, Debug)]
pub enum MemoryStoreError {
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

impl FromUrlWithScheme for MemoryStore {
  const SCHEME: &'static str = "mem";
}

impl FromUrl for MemoryStore {
  type Error = MemoryStoreError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(MemoryStoreError::SchemeMismatch(format!(
        "期望存储方式 '{}', 实际存储方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    Ok(MemoryStore::default())
  }
}

impl ResultStore for MemoryStore {
  type Error = MemoryStoreError;

  fn put(&mut self, slot: Slot, value: &[u8]) -> Result<(), Self::Error> {
    self.slots.insert(slot, value.to_vec());
    Ok(())
  }

  fn get(&self, slot: Slot) -> Result<Option<Vec<u8>>, Self::Error> {
    Ok(self.slots.get(&slot).cloned())
  }

  fn clear(&mut self, slot: Slot) -> Result<(), Self::Error> {
    self.slots.remove(&slot);
    Ok(())
  }
}
