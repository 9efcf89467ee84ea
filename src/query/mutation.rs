use std::future::Future;

use crate::error::ApiError;

use super::cache::QueryCache;
use super::key::QueryKey;

type SuccessHook<'a, T> = Box<dyn FnOnce(&T) + Send + 'a>;
type ErrorHook<'a> = Box<dyn FnOnce(&ApiError) + Send + 'a>;

/// A confirm-then-sync write.
///
/// On success every registered identity is invalidated (and mounted
/// consumers refetched) before `on_success` runs and before [`run`]
/// resolves. Nothing is applied locally ahead of the server.
///
/// [`run`]: Mutation::run
pub struct Mutation<'a, T> {
    cache: &'a QueryCache,
    invalidates: Vec<QueryKey>,
    on_success: Option<SuccessHook<'a, T>>,
    on_error: Option<ErrorHook<'a>>,
}

impl<'a, T> Mutation<'a, T> {
    pub(crate) fn new(cache: &'a QueryCache) -> Self {
        Self {
            cache,
            invalidates: Vec::new(),
            on_success: None,
            on_error: None,
        }
    }

    pub fn invalidates(mut self, key: QueryKey) -> Self {
        self.invalidates.push(key);
        self
    }

    pub fn on_success(mut self, hook: impl FnOnce(&T) + Send + 'a) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl FnOnce(&ApiError) + Send + 'a) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub async fn run<Fut>(self, write: Fut) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match write.await {
            Ok(value) => {
                for key in &self.invalidates {
                    self.cache.invalidate(key).await;
                }
                if let Some(hook) = self.on_success {
                    hook(&value);
                }
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(error = %err, kind = err.kind(), "mutation failed");
                if let Some(hook) = self.on_error {
                    hook(&err);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn success_refetches_mounted_queries_before_resolving() {
        let cache = QueryCache::default();
        let version = Arc::new(AtomicUsize::new(1));
        let key = QueryKey::new("rules");

        let fetch_version = version.clone();
        let subscription = cache.subscribe(key.clone(), move || {
            let v = fetch_version.load(Ordering::SeqCst);
            async move { Ok::<_, ApiError>(v) }
        });
        subscription.ensure_fresh().await;
        assert_eq!(subscription.state().data.as_deref(), Some(&1));

        let write_version = version.clone();
        let result = cache
            .mutation()
            .invalidates(key.clone())
            .run(async move {
                write_version.store(2, Ordering::SeqCst);
                Ok::<_, ApiError>(())
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(subscription.state().data.as_deref(), Some(&2));
    }

    #[tokio::test]
    async fn failure_skips_invalidation_and_runs_error_hook() {
        let cache = QueryCache::default();
        let key = QueryKey::new("rules");
        cache.query(key.clone(), || async { Ok::<_, ApiError>(1u8) }).await;

        let errors = AtomicUsize::new(0);
        let result = cache
            .mutation::<()>()
            .invalidates(key.clone())
            .on_success(|_| panic!("success hook must not run"))
            .on_error(|_| {
                errors.fetch_add(1, Ordering::SeqCst);
            })
            .run(async {
                Err(ApiError::Http {
                    status: 400,
                    message: "bad".to_string(),
                    body: String::new(),
                })
            })
            .await;

        assert!(result.is_err());
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        let state = cache.snapshot::<u8>(&key);
        assert_eq!(state.data.as_deref(), Some(&1));
    }
}
