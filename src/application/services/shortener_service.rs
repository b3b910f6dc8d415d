//! Shorten and unshorten orchestration.

use tracing::{error, info, warn};

use crate::application::services::{CounterClient, MappingClient, ServiceError};
use crate::domain::entities::{PutOutcome, UrlMapping};
use crate::utils::code_generator::CodeGenerator;

/// Default number of increment-and-generate cycles tried when a code collides.
pub const DEFAULT_COLLISION_RETRIES: u32 = 3;

/// A freshly created short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub long_url: String,
    pub short_code: String,
    pub short_url: String,
    /// Counter value the code was derived from.
    pub counter_value: u64,
}

/// Service for creating and resolving short codes.
///
/// Stateless between calls: every request draws a fresh counter value from the
/// store and writes its mapping there. The counter is the uniqueness guard; a
/// code that nevertheless collides with an existing mapping is never
/// overwritten, a new counter value is drawn instead.
pub struct ShortenerService {
    counter: CounterClient,
    mappings: MappingClient,
    generator: CodeGenerator,
    collision_retries: u32,
}

impl ShortenerService {
    /// Creates a new shortener service. `collision_retries` is clamped to at least one.
    pub fn new(
        counter: CounterClient,
        mappings: MappingClient,
        generator: CodeGenerator,
        collision_retries: u32,
    ) -> Self {
        Self {
            counter,
            mappings,
            generator,
            collision_retries: collision_retries.max(1),
        }
    }

    /// Shortens `long_url` for the caller identified by `client_identity`.
    ///
    /// # Flow
    ///
    /// 1. Increment the counter; a failure here ends the request before any
    ///    code is generated or stored
    /// 2. Derive the code from the counter value, URL prefix and identity
    /// 3. Conditionally store the mapping; on collision go back to step 1
    ///
    /// # Errors
    ///
    /// - [`ServiceError::StoreUnavailable`] if the counter or mapping store
    ///   exhausted its retries
    /// - [`ServiceError::CollisionExhausted`] if every cycle hit an existing code
    pub async fn shorten(
        &self,
        long_url: &str,
        cdn_prefix: &str,
        client_identity: &str,
    ) -> Result<ShortenedUrl, ServiceError> {
        for attempt in 1..=self.collision_retries {
            let counter_value = self.counter.increment().await?;
            let short_code = self
                .generator
                .generate(counter_value, long_url, client_identity);

            let mapping = UrlMapping::new(short_code, long_url);

            match self.mappings.put(&mapping).await? {
                PutOutcome::Created => {
                    info!(
                        code = %mapping.short_code,
                        counter_value,
                        "Short URL created"
                    );

                    let short_url = Self::short_url(cdn_prefix, &mapping.short_code);
                    return Ok(ShortenedUrl {
                        long_url: mapping.long_url,
                        short_code: mapping.short_code,
                        short_url,
                        counter_value,
                    });
                }
                PutOutcome::AlreadyExists => {
                    warn!(
                        code = %mapping.short_code,
                        counter_value,
                        attempt,
                        "Short code collision, drawing a new counter value"
                    );
                }
            }
        }

        error!(
            attempts = self.collision_retries,
            "Giving up after repeated short code collisions"
        );

        Err(ServiceError::CollisionExhausted {
            attempts: self.collision_retries,
        })
    }

    /// Resolves a short code to its mapping.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if no mapping exists for the code.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StoreUnavailable`] if the lookup exhausted its retries.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<UrlMapping>, ServiceError> {
        self.mappings.get(short_code).await
    }

    /// Composes the public short URL: `cdn_prefix + "/" + code`.
    pub fn short_url(cdn_prefix: &str, short_code: &str) -> String {
        format!("{}/{}", cdn_prefix, short_code)
    }

    pub async fn counter_store_healthy(&self) -> bool {
        self.counter.is_healthy().await
    }

    pub async fn mapping_store_healthy(&self) -> bool {
        self.mappings.is_healthy().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::retry::RetryPolicy;
    use crate::domain::entities::CounterRecord;
    use crate::domain::repositories::{MockCounterRepository, MockMappingRepository, StoreError};
    use mockall::Sequence;
    use std::sync::Arc;

    const URL: &str = "https://example.com/some/long/path";
    const CLIENT: &str = "203.0.113.7";

    fn service(
        counter: MockCounterRepository,
        mappings: MockMappingRepository,
        collision_retries: u32,
    ) -> ShortenerService {
        let retry = RetryPolicy::from_millis(3, 0);
        ShortenerService::new(
            CounterClient::new(Arc::new(counter), retry),
            MappingClient::new(Arc::new(mappings), retry),
            CodeGenerator::default(),
            collision_retries,
        )
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut counter = MockCounterRepository::new();
        counter
            .expect_increment()
            .times(1)
            .returning(|| Ok(CounterRecord::new("counter", 42)));

        let mut mappings = MockMappingRepository::new();
        mappings
            .expect_put()
            .withf(|m| m.short_code == "7a895df74ca2b36e" && m.long_url == URL)
            .times(1)
            .returning(|_| Ok(PutOutcome::Created));

        let result = service(counter, mappings, 3)
            .shorten(URL, "https://d111111abcdef8.cloudfront.net", CLIENT)
            .await
            .unwrap();

        assert_eq!(result.short_code, "7a895df74ca2b36e");
        assert_eq!(
            result.short_url,
            "https://d111111abcdef8.cloudfront.net/7a895df74ca2b36e"
        );
        assert_eq!(result.long_url, URL);
        assert_eq!(result.counter_value, 42);
    }

    #[tokio::test]
    async fn test_counter_failure_skips_mapping_write() {
        let mut counter = MockCounterRepository::new();
        counter
            .expect_increment()
            .times(3)
            .returning(|| Err(StoreError::backend("unavailable")));

        let mut mappings = MockMappingRepository::new();
        mappings.expect_put().times(0);

        let result = service(counter, mappings, 3)
            .shorten(URL, "https://cdn.example", CLIENT)
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::StoreUnavailable {
                operation: "counter.increment",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_mapping_failure_is_store_unavailable() {
        let mut counter = MockCounterRepository::new();
        counter
            .expect_increment()
            .times(1)
            .returning(|| Ok(CounterRecord::new("counter", 1)));

        let mut mappings = MockMappingRepository::new();
        mappings
            .expect_put()
            .times(3)
            .returning(|_| Err(StoreError::backend("throughput exceeded")));

        let result = service(counter, mappings, 3)
            .shorten(URL, "https://cdn.example", CLIENT)
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::StoreUnavailable {
                operation: "mapping.put",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_collision_draws_new_counter_value() {
        let mut counter = MockCounterRepository::new();
        let mut seq = Sequence::new();
        counter
            .expect_increment()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(CounterRecord::new("counter", 42)));
        counter
            .expect_increment()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(CounterRecord::new("counter", 43)));

        let mut mappings = MockMappingRepository::new();
        mappings
            .expect_put()
            .withf(|m| m.short_code == "7a895df74ca2b36e")
            .times(1)
            .returning(|_| Ok(PutOutcome::AlreadyExists));
        mappings
            .expect_put()
            .withf(|m| m.short_code == "6050e93ac2f918a7")
            .times(1)
            .returning(|_| Ok(PutOutcome::Created));

        let result = service(counter, mappings, 3)
            .shorten(URL, "https://cdn.example", CLIENT)
            .await
            .unwrap();

        assert_eq!(result.short_code, "6050e93ac2f918a7");
        assert_eq!(result.counter_value, 43);
    }

    #[tokio::test]
    async fn test_collision_exhaustion() {
        let mut counter = MockCounterRepository::new();
        let mut next = 0u64;
        counter.expect_increment().times(2).returning(move || {
            next += 1;
            Ok(CounterRecord::new("counter", next))
        });

        let mut mappings = MockMappingRepository::new();
        mappings
            .expect_put()
            .times(2)
            .returning(|_| Ok(PutOutcome::AlreadyExists));

        let result = service(counter, mappings, 2)
            .shorten(URL, "https://cdn.example", CLIENT)
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::CollisionExhausted { attempts: 2 })
        ));
    }

    #[tokio::test]
    async fn test_resolve_found_and_missing() {
        let counter = MockCounterRepository::new();
        let mut mappings = MockMappingRepository::new();
        mappings.expect_get().returning(|code| {
            Ok((code == "abc12345").then(|| UrlMapping::new(code, "https://example.com")))
        });

        let service = service(counter, mappings, 3);

        let found = service.resolve("abc12345").await.unwrap();
        assert_eq!(found.unwrap().long_url, "https://example.com");

        let missing = service.resolve("zzzz0000").await.unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_short_url_is_plain_concatenation() {
        assert_eq!(
            ShortenerService::short_url("https://cdn.example", "abc"),
            "https://cdn.example/abc"
        );
        assert_eq!(
            ShortenerService::short_url("https://cdn.example/", "abc"),
            "https://cdn.example//abc"
        );
    }
}
