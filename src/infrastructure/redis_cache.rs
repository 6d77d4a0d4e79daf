use std::time::Duration;

use redis::Commands;

use crate::db::RedisPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::CacheStore;

pub struct RedisCache {
    pool: RedisPool,
}

impl RedisCache {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

impl CacheStore for RedisCache {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.pool.get()?;
        // A nil reply is the only thing mapped to a miss.
        let value: Option<String> = conn.get(key)?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        match ttl {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))?,
            None => conn.set::<_, _, ()>(key, value)?,
        }
        Ok(())
    }

    fn delete(&self, keys: &[String]) -> Result<(), DomainError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.pool.get()?;
        conn.del::<_, ()>(keys)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use redis::Commands;

    use super::RedisCache;
    use crate::domain::ports::CacheStore;
    use crate::infrastructure::containers::setup_redis;

    #[tokio::test]
    async fn absent_key_is_a_miss_not_an_error() {
        let (_container, pool) = setup_redis().await;
        let cache = RedisCache::new(pool);

        assert_eq!(cache.get("missing").expect("get failed"), None);
    }

    #[tokio::test]
    async fn set_with_ttl_then_delete() {
        let (_container, pool) = setup_redis().await;
        let cache = RedisCache::new(pool.clone());

        cache
            .set("products", "[]", Some(Duration::from_secs(60)))
            .expect("set failed");
        cache.set("order:1", "{}", None).expect("set failed");

        assert_eq!(cache.get("products").expect("get failed").as_deref(), Some("[]"));
        let mut conn = pool.get().expect("connection");
        let ttl: i64 = conn.ttl("products").expect("ttl");
        assert!(ttl > 0 && ttl <= 60);
        let no_expiry: i64 = conn.ttl("order:1").expect("ttl");
        assert_eq!(no_expiry, -1);

        cache
            .delete(&["products".to_string(), "order:1".to_string()])
            .expect("delete failed");
        assert_eq!(cache.get("products").expect("get failed"), None);
        assert_eq!(cache.get("order:1").expect("get failed"), None);
    }
}
