pub mod digest;
pub mod email;
pub mod avatar_url;

pub use self::digest::{email_digest, HashDigest, PLACEHOLDER_DIGEST};
pub use self::email::{normalize_email, NormalizedEmail};
pub use self::avatar_url::{
    AvatarOptions, AvatarUrl, BaseUrl, DefaultImage, Rating, DEFAULT_BASE_URL, MAX_SIZE,
};
