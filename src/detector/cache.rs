//! 解析结果缓存
//! 以原始 UA 字符串为键的有界缓存；达到容量时按哈希表迭代顺序淘汰约 1/3，
//! 不保证 LRU/LFU，仅用于约束内存

use std::sync::{Mutex, MutexGuard, PoisonError};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::FALLBACK_CACHE_CAPACITY;

#[derive(Debug)]
struct CacheState<V> {
    max_size: usize,
    map: FxHashMap<String, V>,
}

impl<V> CacheState<V> {
    // 腾出空间后 len <= max_size - 1
    fn evict(&mut self) {
        let overflow = (self.map.len() + 1).saturating_sub(self.max_size);
        let mut remaining = (self.max_size / 3).max(1).max(overflow);
        let before = self.map.len();
        self.map.retain(|_, _| {
            if remaining > 0 {
                remaining -= 1;
                false
            } else {
                true
            }
        });
        debug!(
            "Result cache evicted {} entries (max_size={}, remaining={})",
            before - self.map.len(),
            self.max_size,
            self.map.len()
        );
    }
}

/// 有界结果缓存，内部单锁保护
#[derive(Debug)]
pub struct ResultCache<V> {
    inner: Mutex<CacheState<V>>,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(CacheState {
                max_size: resolve_capacity(max_size),
                map: FxHashMap::default(),
            }),
        }
    }

    // 锁中毒时缓存内容依然一致（单次操作内不会留下半写状态），直接继续使用
    fn lock(&self) -> MutexGuard<'_, CacheState<V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().map.get(key).cloned()
    }

    /// 写入缓存；新键且已满时先淘汰，已存在的键直接覆盖
    pub fn insert(&self, key: String, value: V) {
        let mut state = self.lock();
        if !state.map.contains_key(&key) && state.map.len() >= state.max_size {
            state.evict();
        }
        state.map.insert(key, value);
    }

    /// 命中直接返回；未命中时在锁外计算，计算结果为 Some 才写入
    /// 并发下同一键可能被重复计算，结果确定，后写覆盖即可
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        if let Some(hit) = self.get(key) {
            return Some(hit);
        }
        let value = compute()?;
        self.insert(key.to_string(), value.clone());
        Some(value)
    }

    /// 调整容量，0 回退为默认回退容量；下一次写入时生效
    pub fn set_max_size(&self, max_size: usize) {
        self.lock().max_size = resolve_capacity(max_size);
    }

    pub fn max_size(&self) -> usize {
        self.lock().max_size
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().map.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().map.contains_key(key)
    }

    pub fn clear(&self) {
        self.lock().map.clear();
    }
}

fn resolve_capacity(max_size: usize) -> usize {
    if max_size == 0 { FALLBACK_CACHE_CAPACITY } else { max_size }
}
