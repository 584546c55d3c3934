// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/store.rs - 共享结果存储定义
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

use thiserror::Error;
use url::Url;

use crate::{FromUrl, FromUrlWithScheme};

mod directory;
pub use self::directory::{DirectoryStore, DirectoryStoreError};

mod memory;
pub use self::memory::{MemoryStore, MemoryStoreError};

/// 存储槽位。一次扫描写一轮，消费后清空。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
  /// 推理服务返回的原始统计（JSON）
  RawResult,
  /// 推理服务返回的分割预览图（PNG）
  PreviewImage,
  /// 归并后的分割明细（JSON）
  SegmentationDetails,
}

impl Slot {
  pub const ALL: [Slot; 3] = [Slot::RawResult, Slot::PreviewImage, Slot::SegmentationDetails];

  pub fn key(self) -> &'static str {
    match self {
      Slot::RawResult => "rawResult",
      Slot::PreviewImage => "previewImage",
      Slot::SegmentationDetails => "segmentationDetails",
    }
  }
}

impl std::fmt::Display for Slot {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.key())
  }
}

/// 各阶段之间唯一的交接通道。
///
/// 值是不透明字节串，槽位缺失读出 `Ok(None)`（空态），不是错误。
pub trait ResultStore {
  type Error;

  fn put(&mut self, slot: Slot, value: &[u8]) -> Result<(), Self::Error>;
  fn get(&self, slot: Slot) -> Result<Option<Vec<u8>>, Self::Error>;
  fn clear(&mut self, slot: Slot) -> Result<(), Self::Error>;

  /// 读出并清空，消费型读取。
  fn take(&mut self, slot: Slot) -> Result<Option<Vec<u8>>, Self::Error> {
    let value = self.get(slot)?;
    if value.is_some() {
      self.clear(slot)?;
    }
    Ok(value)
  }
}

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("目录存储错误: {0}")]
  DirectoryStoreError(#[from] DirectoryStoreError),
  #[error("内存存储错误: {0}")]
  MemoryStoreError(#[from] MemoryStoreError),
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

pub enum StoreWrapper {
  DirectoryStore(DirectoryStore),
  MemoryStore(MemoryStore),
}

impl FromUrl for StoreWrapper {
  type Error = StoreError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      DirectoryStore::SCHEME => {
        let store = DirectoryStore::from_url(url)?;
        Ok(StoreWrapper::DirectoryStore(store))
      }
      MemoryStore::SCHEME => {
        let store = MemoryStore::from_url(url)?;
        Ok(StoreWrapper::MemoryStore(store))
      }
      _ => Err(StoreError::SchemeMismatch),
    }
  }
}

impl ResultStore for StoreWrapper {
  type Error = StoreError;

  fn put(&mut self, slot: Slot, value: &[u8]) -> Result<(), Self::Error> {
    match self {
      StoreWrapper::DirectoryStore(store) => store.put(slot, value).map_err(StoreError::from),
      StoreWrapper::MemoryStore(store) => store.put(slot, value).map_err(StoreError::from),
    }
  }

  fn get(&self, slot: Slot) -> Result<Option<Vec<u8>>, Self::Error> {
    match self {
      StoreWrapper::DirectoryStore(store) => store.get(slot).map_err(StoreError::from),
      StoreWrapper::MemoryStore(store) => store.get(slot).map_err(StoreError::from),
    }
  }

  fn clear(&mut self, slot: Slot) -> Result<(), Self::Error> {
    match self {
      StoreWrapper::DirectoryStore(store) => store.clear(slot).map_err(StoreError::from),
      StoreWrapper::MemoryStore(store) => store.clear(slot).map_err(StoreError::from),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wrapper_dispatches_by_scheme() {
    let url = Url::parse("mem:").unwrap();
    assert!(matches!(
      StoreWrapper::from_url(&url),
      Ok(StoreWrapper::MemoryStore(_))
    ));

    let url = Url::parse("dir:./store").unwrap();
    assert!(matches!(
      StoreWrapper::from_url(&url),
      Ok(StoreWrapper::DirectoryStore(_))
    ));

    let url = Url::parse("ftp://nowhere").unwrap();
    assert!(matches!(
      StoreWrapper::from_url(&url),
      Err(StoreError::SchemeMismatch)
    ));
  }

  #[test]
  fn take_reads_then_clears() {
    let mut store = MemoryStore::default();
    store.put(Slot::RawResult, b"{}").unwrap();

    assert_eq!(store.take(Slot::RawResult).unwrap(), Some(b"{}".to_vec()));
    assert_eq!(store.take(Slot::RawResult).unwrap(), None);
    assert_eq!(store.get(Slot::RawResult).unwrap(), None);
  }

  #[test]
  fn slots_are_independent() {
    let mut store = MemoryStore::default();
    for slot in Slot::ALL {
      store.put(slot, slot.key().as_bytes()).unwrap();
    }

    store.clear(Slot::RawResult).unwrap();
    assert_eq!(store.get(Slot::RawResult).unwrap(), None);
    assert_eq!(
      store.get(Slot::PreviewImage).unwrap(),
      Some(b"previewImage".to_vec())
    );
    assert_eq!(
      store.get(Slot::SegmentationDetails).unwrap(),
      Some(b"segmentationDetails".to_vec())
    );
  }
}
