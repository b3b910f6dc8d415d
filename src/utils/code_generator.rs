//! Short code derivation.
//!
//! A short code is the hex-encoded BLAKE2b digest of the counter value, keyed
//! by request context:
//!
//! - **salt**: the first 16 bytes of the long URL
//! - **personalization**: the caller's network identity, at most 16 bytes
//! - **payload**: the counter value as decimal ASCII
//!
//! Inputs shorter than 16 bytes are zero-padded by BLAKE2b itself; longer
//! inputs are truncated. The counter never repeats a value, which is the only
//! uniqueness guard: the digest offers no collision-freedom at short lengths.

use blake2b_simd::{OUTBYTES, PERSONALBYTES, Params, SALTBYTES};

/// Default digest length in bytes (16 hex characters).
pub const DEFAULT_DIGEST_SIZE: usize = 8;

/// Digest size outside `1..=64` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("digest size must be between 1 and 64 bytes, got {0}")]
pub struct InvalidDigestSize(pub usize);

/// Derives fixed-length short codes from counter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeGenerator {
    digest_size: usize,
}

impl CodeGenerator {
    /// Creates a generator producing `digest_size`-byte digests.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDigestSize`] unless `1 <= digest_size <= 64`.
    pub fn new(digest_size: usize) -> Result<Self, InvalidDigestSize> {
        if digest_size == 0 || digest_size > OUTBYTES {
            return Err(InvalidDigestSize(digest_size));
        }

        Ok(Self { digest_size })
    }

    pub fn digest_size(&self) -> usize {
        self.digest_size
    }

    /// Length of every code this generator produces.
    pub fn code_len(&self) -> usize {
        self.digest_size * 2
    }

    /// Generates the short code for one counter value.
    ///
    /// Deterministic: the same inputs always produce the same code.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_shortener_core::utils::code_generator::CodeGenerator;
    ///
    /// let generator = CodeGenerator::new(8).unwrap();
    /// let code = generator.generate(42, "https://example.com/some/long/path", "203.0.113.7");
    /// assert_eq!(code, "7a895df74ca2b36e");
    /// ```
    pub fn generate(&self, counter_value: u64, long_url: &str, client_identity: &str) -> String {
        let salt = truncate(long_url.as_bytes(), SALTBYTES);
        let personal = truncate(client_identity.as_bytes(), PERSONALBYTES);

        let hash = Params::new()
            .hash_length(self.digest_size)
            .salt(salt)
            .personal(personal)
            .hash(counter_value.to_string().as_bytes());

        hex::encode(hash.as_bytes())
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            digest_size: DEFAULT_DIGEST_SIZE,
        }
    }
}

fn truncate(bytes: &[u8], max: usize) -> &[u8] {
    &bytes[..bytes.len().min(max)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const URL: &str = "https://example.com/some/long/path";
    const CLIENT: &str = "203.0.113.7";

    #[test]
    fn test_known_digests() {
        let generator = CodeGenerator::new(8).unwrap();

        assert_eq!(generator.generate(42, URL, CLIENT), "7a895df74ca2b36e");
        assert_eq!(generator.generate(43, URL, CLIENT), "6050e93ac2f918a7");
        assert_eq!(
            generator.generate(1, "https://example.com", "10.0.0.1"),
            "d021178ad11e8326"
        );
    }

    #[test]
    fn test_custom_digest_size() {
        let generator = CodeGenerator::new(4).unwrap();

        let code = generator.generate(1, "https://example.com", "10.0.0.1");
        assert_eq!(code, "cf41a500");
        assert_eq!(code.len(), generator.code_len());
    }

    #[test]
    fn test_empty_identity() {
        let generator = CodeGenerator::default();
        assert_eq!(
            generator.generate(7, "https://rust-lang.org/", ""),
            "fff0abaec7f18af8"
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = CodeGenerator::default();
        assert_eq!(
            generator.generate(99, URL, CLIENT),
            generator.generate(99, URL, CLIENT)
        );
    }

    #[test]
    fn test_distinct_counters_give_distinct_codes() {
        let generator = CodeGenerator::default();
        let codes: HashSet<String> = (1..=10_000)
            .map(|n| generator.generate(n, URL, CLIENT))
            .collect();

        assert_eq!(codes.len(), 10_000);
    }

    #[test]
    fn test_only_url_prefix_is_used_as_salt() {
        let generator = CodeGenerator::default();

        // Both URLs share the 16-byte prefix "https://example."
        assert_eq!(
            generator.generate(42, URL, CLIENT),
            generator.generate(42, "https://example.com/other", CLIENT)
        );
        assert_ne!(
            generator.generate(42, URL, CLIENT),
            generator.generate(42, "https://example.org/some/long/path", "203.0.113.8")
        );
    }

    #[test]
    fn test_long_identity_is_truncated() {
        let generator = CodeGenerator::default();
        let ipv6 = "2001:0db8:85a3:0000:0000:8a2e:0370:7334";

        let code = generator.generate(1, URL, ipv6);
        assert_eq!(code, generator.generate(1, URL, &ipv6[..16]));
        assert_eq!(code.len(), 16);
    }

    #[test]
    fn test_code_is_lowercase_hex() {
        let code = CodeGenerator::default().generate(12345, URL, CLIENT);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_invalid_digest_sizes() {
        assert_eq!(CodeGenerator::new(0), Err(InvalidDigestSize(0)));
        assert_eq!(CodeGenerator::new(65), Err(InvalidDigestSize(65)));
        assert!(CodeGenerator::new(64).is_ok());
        assert!(CodeGenerator::new(1).is_ok());
    }

    #[test]
    fn test_multibyte_url_prefix_does_not_panic() {
        let generator = CodeGenerator::default();
        let code = generator.generate(1, "https://пример.рф/путь", CLIENT);
        assert_eq!(code.len(), 16);
    }
}
