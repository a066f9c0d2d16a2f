//! Affiliate link generation.

use std::time::Duration;

use rand::Rng;

use affiliate_crm_core::Platform;

/// Base of every generated link.
pub const LINK_BASE: &str = "https://aff.link";

const SUFFIX_LEN: usize = 6;

/// Generates tracking links for product URLs.
///
/// Links take the form `https://aff.link/{platform code}/{6 base-36 chars}`.
#[derive(Debug, Clone)]
pub struct AffiliateLinkService {
    latency: Duration,
}

impl AffiliateLinkService {
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }

    /// Generate a link for `product_url` on `platform`.
    pub async fn generate(&self, platform: Platform, product_url: &str) -> String {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let link = format!("{LINK_BASE}/{}/{}", platform.code(), random_suffix());
        tracing::info!(%platform, product_url, %link, "Affiliate link generated");
        link
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SUFFIX_LEN)
        .filter_map(|_| char::from_digit(rng.random_range(0..36), 36))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_link_shape() {
        let service = AffiliateLinkService::new(Duration::ZERO);
        for platform in [Platform::Amazon, Platform::HAndM, Platform::Lowes] {
            let link = service.generate(platform, "https://example.com/p/1").await;
            let rest = link
                .strip_prefix(&format!("{LINK_BASE}/{}/", platform.code()))
                .unwrap_or_else(|| panic!("unexpected link {link}"));
            assert_eq!(rest.len(), SUFFIX_LEN);
            assert!(
                rest.chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn test_suffixes_vary() {
        let suffixes: std::collections::HashSet<String> = (0..20).map(|_| random_suffix()).collect();
        assert!(suffixes.len() > 1);
    }
}
