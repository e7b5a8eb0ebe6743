// src/common/cache.rs

use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;

// Cache de relatórios: chave -> JSON já montado.
// Expiração por TTL fixo e capacidade limitada (sem crescimento sem fim).
#[derive(Clone)]
pub struct ReportCache {
    inner: Cache<String, Value>,
}

impl ReportCache {
    pub fn new(ttl_secs: u64, max_entries: u64) -> Self {
        let inner = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_secs))
            .max_capacity(max_entries)
            .build();
        Self { inner }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).await
    }

    pub async fn insert(&self, key: &str, value: Value) {
        self.inner.insert(key.to_string(), value).await;
    }

    /// Invalida tudo. Usado depois de escritas que mudam os números dos
    /// relatórios (aprovação de pedido, por exemplo).
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
