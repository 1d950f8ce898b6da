use crate::domain::digest::{HashDigest, DIGEST_LEN};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::{form_urlencoded, Url};

pub const DEFAULT_BASE_URL: &str = "https://www.gravatar.com/avatar/";
pub const MAX_SIZE: u32 = 2048;

/// Absolute http(s) URL ending in `/`; the digest is appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let invalid = || CoreError::InvalidBaseUrl(raw.to_string());
        let parsed = Url::parse(raw.trim()).map_err(|_| invalid())?;
        if !matches!(parsed.scheme(), "http" | "https")
            || parsed.cannot_be_a_base()
            || parsed.query().is_some()
            || parsed.fragment().is_some()
            || !parsed.path().ends_with('/')
        {
            return Err(invalid());
        }
        Ok(Self(parsed.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(DEFAULT_BASE_URL.to_string())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fallback image served when no avatar exists for the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DefaultImage {
    #[serde(rename = "404")]
    NotFound,
    #[serde(rename = "mp")]
    MysteryPerson,
    #[serde(rename = "identicon")]
    Identicon,
    #[serde(rename = "monsterid")]
    MonsterId,
    #[serde(rename = "wavatar")]
    Wavatar,
    #[serde(rename = "retro")]
    Retro,
    #[serde(rename = "robohash")]
    Robohash,
    #[serde(rename = "blank")]
    Blank,
}

impl DefaultImage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultImage::NotFound => "404",
            DefaultImage::MysteryPerson => "mp",
            DefaultImage::Identicon => "identicon",
            DefaultImage::MonsterId => "monsterid",
            DefaultImage::Wavatar => "wavatar",
            DefaultImage::Retro => "retro",
            DefaultImage::Robohash => "robohash",
            DefaultImage::Blank => "blank",
        }
    }
}

impl FromStr for DefaultImage {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "404" => Ok(DefaultImage::NotFound),
            "mp" => Ok(DefaultImage::MysteryPerson),
            "identicon" => Ok(DefaultImage::Identicon),
            "monsterid" => Ok(DefaultImage::MonsterId),
            "wavatar" => Ok(DefaultImage::Wavatar),
            "retro" => Ok(DefaultImage::Retro),
            "robohash" => Ok(DefaultImage::Robohash),
            "blank" => Ok(DefaultImage::Blank),
            _ => Err(CoreError::InvalidDefaultImage(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    G,
    Pg,
    R,
    X,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::G => "g",
            Rating::Pg => "pg",
            Rating::R => "r",
            Rating::X => "x",
        }
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "g" => Ok(Rating::G),
            "pg" => Ok(Rating::Pg),
            "r" => Ok(Rating::R),
            "x" => Ok(Rating::X),
            _ => Err(CoreError::InvalidRating(raw.to_string())),
        }
    }
}

/// Optional query parameters. Empty options add no query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvatarOptions {
    size: Option<u32>,
    default_image: Option<DefaultImage>,
    rating: Option<Rating>,
}

impl AvatarOptions {
    pub fn with_size(mut self, size: u32) -> Result<Self, CoreError> {
        if size == 0 || size > MAX_SIZE {
            return Err(CoreError::InvalidSize(size));
        }
        self.size = Some(size);
        Ok(self)
    }

    pub fn with_default_image(mut self, image: DefaultImage) -> Self {
        self.default_image = Some(image);
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn size(&self) -> Option<u32> {
        self.size
    }

    pub fn default_image(&self) -> Option<DefaultImage> {
        self.default_image
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.default_image.is_none() && self.rating.is_none()
    }

    fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(size) = self.size {
            query.append_pair("s", &size.to_string());
        }
        if let Some(image) = self.default_image {
            query.append_pair("d", image.as_str());
        }
        if let Some(rating) = self.rating {
            query.append_pair("r", rating.as_str());
        }
        query.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    pub fn compose(base: &BaseUrl, digest: &HashDigest, options: &AvatarOptions) -> Self {
        let mut out = String::with_capacity(base.as_str().len() + DIGEST_LEN);
        out.push_str(base.as_str());
        out.push_str(digest.as_str());
        if !options.is_empty() {
            out.push('?');
            out.push_str(&options.query());
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AvatarUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AvatarUrl> for String {
    fn from(value: AvatarUrl) -> Self {
        value.0
    }
}
