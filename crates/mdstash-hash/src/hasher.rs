use mdstash_types::ContentDigest;

/// Domain-separated BLAKE3 content hasher.
///
/// Each hasher carries a domain tag that is prepended to every hash
/// computation, so an image payload and a document that happen to share
/// bytes never collide across uses.
pub struct ContentHasher {
    domain: &'static str,
}

impl ContentHasher {
    /// Hasher for image payloads (filename derivation and deduplication).
    pub const IMAGE: Self = Self {
        domain: "mdstash-image-v1",
    };
    /// Hasher for document text (change detection between render cycles).
    pub const DOCUMENT: Self = Self {
        domain: "mdstash-doc-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation. Pure, no side effects.
    pub fn hash(&self, data: &[u8]) -> ContentDigest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ContentDigest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash UTF-8 text. Used for document change detection.
    pub fn hash_text(&self, text: &str) -> ContentDigest {
        self.hash(text.as_bytes())
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &ContentDigest) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}
