//! Email address to avatar URL.
//!
//! The digest that ends up in the URL is chosen by [`DigestSource`], kept apart
//! from the pure hash so a pinned digest can be embedded without touching
//! normalization or hashing.

use crate::domain::{
    email_digest, normalize_email, AvatarOptions, AvatarUrl, BaseUrl, HashDigest,
    NormalizedEmail,
};
use crate::error::CoreError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigestSource {
    /// Embed the digest of the normalized address.
    #[default]
    Computed,
    /// Embed this digest for every input.
    Pinned(HashDigest),
}

impl DigestSource {
    pub fn placeholder() -> Self {
        DigestSource::Pinned(HashDigest::placeholder())
    }

    pub fn select(&self, computed: HashDigest) -> HashDigest {
        match self {
            DigestSource::Computed => computed,
            DigestSource::Pinned(digest) => *digest,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DigestSource::Computed => "computed",
            DigestSource::Pinned(_) => "pinned",
        }
    }
}

/// Both digests for one input. `embedded` differs from `computed` only when
/// the source is pinned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestOutcome {
    pub normalized: NormalizedEmail,
    pub computed: HashDigest,
    pub embedded: HashDigest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarResolver {
    base_url: BaseUrl,
    source: DigestSource,
    options: AvatarOptions,
}

impl AvatarResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_base_url_str(self, raw: &str) -> Result<Self, CoreError> {
        Ok(self.with_base_url(BaseUrl::new(raw)?))
    }

    pub fn with_source(mut self, source: DigestSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_options(mut self, options: AvatarOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn source(&self) -> DigestSource {
        self.source
    }

    pub fn options(&self) -> &AvatarOptions {
        &self.options
    }

    pub fn digest_for(&self, email: &str) -> DigestOutcome {
        let normalized = normalize_email(email);
        let computed = email_digest(&normalized);
        let embedded = self.source.select(computed);
        DigestOutcome {
            normalized,
            computed,
            embedded,
        }
    }

    pub fn resolve(&self, email: &str) -> AvatarUrl {
        let outcome = self.digest_for(email);
        self.compose(&outcome.embedded)
    }

    pub fn compose(&self, digest: &HashDigest) -> AvatarUrl {
        AvatarUrl::compose(&self.base_url, digest, &self.options)
    }
}

/// Resolves with the default resolver: Gravatar base URL, computed digest.
pub fn resolve(email: &str) -> AvatarUrl {
    AvatarResolver::default().resolve(email)
}

/// String-to-string form registered as the `gravatar` template filter.
pub fn gravatar(input: &str) -> String {
    resolve(input).into_string()
}

#[cfg(test)]
mod tests {
    use super::{gravatar, resolve, AvatarResolver, DigestSource};
    use crate::domain::{AvatarOptions, HashDigest, DEFAULT_BASE_URL, PLACEHOLDER_DIGEST};

    #[test]
    fn resolve_uses_base_url_prefix() {
        for raw in ["user@example.com", "", "  ", "not an email", "ÄÖÜ@例え.jp"] {
            assert!(resolve(raw).as_str().starts_with(DEFAULT_BASE_URL));
        }
    }

    #[test]
    fn resolve_is_deterministic() {
        assert_eq!(resolve("Ada@Example.com"), resolve("Ada@Example.com"));
    }

    #[test]
    fn resolve_ignores_case_and_outer_whitespace() {
        assert_eq!(resolve("USER@EXAMPLE.COM"), resolve(" user@example.com "));
        assert_eq!(
            resolve(" User@Example.com ").as_str(),
            "https://www.gravatar.com/avatar/b58996c504c5638798eb6b511e6f49af"
        );
    }

    #[test]
    fn resolve_empty_input() {
        assert_eq!(
            gravatar(""),
            "https://www.gravatar.com/avatar/d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn pinned_source_embeds_placeholder_for_every_input() {
        let resolver = AvatarResolver::new().with_source(DigestSource::placeholder());
        let expected = format!("{DEFAULT_BASE_URL}{PLACEHOLDER_DIGEST}");
        assert_eq!(resolver.resolve("user@example.com").as_str(), expected);
        assert_eq!(resolver.resolve("someone.else@example.org").as_str(), expected);
    }

    #[test]
    fn digest_for_reports_both_digests() {
        let resolver = AvatarResolver::new().with_source(DigestSource::placeholder());
        let outcome = resolver.digest_for(" USER@example.com");
        assert_eq!(outcome.normalized.as_str(), "user@example.com");
        assert_eq!(outcome.computed.as_str(), "b58996c504c5638798eb6b511e6f49af");
        assert_eq!(outcome.embedded, HashDigest::placeholder());

        let computed = AvatarResolver::new().digest_for(" USER@example.com");
        assert_eq!(computed.embedded, computed.computed);
    }

    #[test]
    fn resolver_applies_base_url_and_options() {
        let options = AvatarOptions::default().with_size(64).unwrap();
        let resolver = AvatarResolver::new()
            .with_base_url_str("https://seccdn.libravatar.org/avatar/")
            .unwrap()
            .with_options(options);
        assert_eq!(
            resolver.resolve("user@example.com").as_str(),
            "https://seccdn.libravatar.org/avatar/b58996c504c5638798eb6b511e6f49af?s=64"
        );
    }

    #[test]
    fn resolver_is_shareable_across_threads() {
        let resolver = std::sync::Arc::new(AvatarResolver::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let resolver = resolver.clone();
                std::thread::spawn(move || resolver.resolve("user@example.com"))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), resolve("user@example.com"));
        }
    }
}
