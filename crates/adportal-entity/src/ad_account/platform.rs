//! Advertising platform enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// External advertising platform an organization can connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ad_platform", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdPlatform {
    /// Meta (Facebook / Instagram) Ads.
    Meta,
    /// Google Ads.
    GoogleAds,
    /// Google Analytics 4.
    Ga4,
    /// TikTok Ads.
    Tiktok,
}

impl AdPlatform {
    /// Return the platform as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::GoogleAds => "google_ads",
            Self::Ga4 => "ga4",
            Self::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for AdPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AdPlatform {
    type Err = adportal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "meta" => Ok(Self::Meta),
            "google_ads" => Ok(Self::GoogleAds),
            "ga4" => Ok(Self::Ga4),
            "tiktok" => Ok(Self::Tiktok),
            _ => Err(adportal_core::AppError::validation(format!(
                "Invalid platform: '{s}'. Expected one of: meta, google_ads, ga4, tiktok"
            ))),
        }
    }
}
