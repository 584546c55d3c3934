// 该文件是 Lingshu （灵枢） 项目的一部分。
// src/store/directory.rs - 目录存储
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

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::store::{ResultStore, Slot};
use crate::{FromUrl, FromUrlWithScheme};

/// 以目录为介质的结果存储，每个槽位一个文件。
///
/// 独立运行的各阶段进程通过同一目录交接数据。
pub struct DirectoryStore {
  root: PathBuf,
}

#[derive(Error, Debug)]
pub enum DirectoryStoreError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

impl FromUrlWithScheme for DirectoryStore {
  const SCHEME: &'static str = "dir";
}

impl FromUrl for DirectoryStore {
  type Error = DirectoryStoreError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(DirectoryStoreError::SchemeMismatch(format!(
        "期望存储方式 '{}', 实际存储方式 '{}'",
        Self::SCHEME,
        uri.scheme()
      )));
    }

    Ok(DirectoryStore {
      root: PathBuf::from(uri.path()),
    })
  }
}

impl DirectoryStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    DirectoryStore { root: root.into() }
  }

  fn slot_path(&self, slot: Slot) -> PathBuf {
    self.root.join(slot_file_name(slot))
  }
}

impl ResultStore for DirectoryStore {
  type Error = DirectoryStoreError;

  fn put(&mut self, slot: Slot, value: &[u8]) -> Result<(), Self::Error> {
    std::fs::create_dir_all(&self.root)?;

    // 先写临时文件再改名，阶段中途失败不会留下半截槽位
    let path = self.slot_path(slot);
    let staging = self.root.join(format!("{}.part", slot_file_name(slot)));
    std::fs::write(&staging, value)?;
    std::fs::rename(&staging, &path)?;

    debug!("写入槽位 {}: {} 字节", slot, value.len());
    Ok(())
  }

  fn get(&self, slot: Slot) -> Result<Option<Vec<u8>>, Self::Error> {
    match std::fs::read(self.slot_path(slot)) {
      Ok(value) => Ok(Some(value)),
      Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
      Err(error) => Err(error.into()),
    }
  }

  fn clear(&mut self, slot: Slot) -> Result<(), Self::Error> {
    match std::fs::remove_file(self.slot_path(slot)) {
      Ok(()) => Ok(()),
      Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
      Err(error) => Err(error.into()),
    }
  }
}

fn slot_file_name(slot: Slot) -> &'static str {
  match slot {
    Slot::RawResult => "raw_result.json",
    Slot::PreviewImage => "preview_image.png",
    Slot::SegmentationDetails => "segmentation_details.json",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn put_get_clear_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::new(dir.path());

    assert_eq!(store.get(Slot::RawResult).unwrap(), None);

    store.put(Slot::RawResult, b"{\"a\":1}").unwrap();
    assert_eq!(
      store.get(Slot::RawResult).unwrap(),
      Some(b"{\"a\":1}".to_vec())
    );

    store.put(Slot::RawResult, b"{\"a\":2}").unwrap();
    assert_eq!(
      store.get(Slot::RawResult).unwrap(),
      Some(b"{\"a\":2}".to_vec())
    );

    store.clear(Slot::RawResult).unwrap();
    assert_eq!(store.get(Slot::RawResult).unwrap(), None);

    // 清空缺失槽位是幂等操作
    store.clear(Slot::RawResult).unwrap();
  }

  #[test]
  fn slots_persist_across_instances() {
    let dir = tempfile::tempdir().unwrap();

    {
      let mut store = DirectoryStore::new(dir.path());
      store.put(Slot::SegmentationDetails, b"details").unwrap();
    }

    let store = DirectoryStore::new(dir.path());
    assert_eq!(
      store.get(Slot::SegmentationDetails).unwrap(),
      Some(b"details".to_vec())
    );
  }

  #[test]
  fn put_leaves_no_staging_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::new(dir.path());
    store.put(Slot::PreviewImage, &[1, 2, 3]).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
      .unwrap()
      .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    assert_eq!(names, vec!["preview_image.png".to_string()]);
  }

  #[test]
  fn from_url_requires_dir_scheme() {
    let url = Url::parse("dir:/tmp/lingshu-store").unwrap();
    let store = DirectoryStore::from_url(&url).unwrap();
    assert_eq!(store.root, PathBuf::from("/tmp/lingshu-store"));

    let url = Url::parse("mem:").unwrap();
    assert!(matches!(
      DirectoryStore::from_url(&url),
      Err(DirectoryStoreError::SchemeMismatch(_))
    ));
  }
}
