use crate::domain::email::NormalizedEmail;
use crate::error::CoreError;
use md5::{Digest, Md5};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DIGEST_LEN: usize = 32;

/// The digest the legacy site plugin embedded in every URL.
pub const PLACEHOLDER_DIGEST: &str = "243a658fd5860f7cc2b21e501b21472a";

/// 128-bit digest rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashDigest([u8; DIGEST_LEN]);

impl HashDigest {
    pub const fn placeholder() -> Self {
        Self(*b"243a658fd5860f7cc2b21e501b21472a")
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII hex digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(hex::encode(bytes).as_bytes());
        Self(out)
    }
}

impl FromStr for HashDigest {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.len() != DIGEST_LEN || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidDigest(raw.to_string()));
        }
        let mut out = [0u8; DIGEST_LEN];
        for (slot, byte) in out.iter_mut().zip(trimmed.bytes()) {
            *slot = byte.to_ascii_lowercase();
        }
        Ok(Self(out))
    }
}

impl fmt::Display for HashDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HashDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// MD5 of the normalized address's UTF-8 bytes.
pub fn email_digest(email: &NormalizedEmail) -> HashDigest {
    let hash = Md5::digest(email.as_bytes());
    HashDigest::from_bytes(&hash)
}
