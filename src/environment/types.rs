use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Domain Types

pub type OfferId = String;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct City {
    pub name: String,
    pub location: Location,
}

impl City {
    /// The known city for this entry, if the server sent one of ours
    pub fn city_name(&self) -> Option<CityName> {
        CityName::from_str(&self.name).ok()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub name: String,
    pub avatar_url: String,
    pub is_pro: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: u32,
    pub rating: f32,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub city: City,
    pub location: Option<Location>,
    #[serde(default)]
    pub preview_image: Option<String>,
    // The list endpoints only send a preview, the rest
    // is filled in by the single offer endpoint
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub host: Host,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub goods: Vec<String>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub max_adults: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUser {
    pub name: String,
    pub avatar_url: String,
    #[serde(default)]
    pub is_pro: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    /// The offer this review belongs to. Not part of the server payload,
    /// filled in from the request
    #[serde(default, rename = "offerId")]
    pub offer_id: OfferId,
    pub date: DateTime<Utc>,
    pub user: ReviewUser,
    pub comment: String,
    pub rating: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub token: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_pro: bool,
}

// Request payloads

#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct AuthData {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AuthData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthData")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl AuthData {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Mirrors the sign-in form: a plausible email and a password
    /// with at least one letter and one digit
    pub fn validate(&self) -> Result<(), String> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(crate::loc!("Please enter a valid email").to_string());
        }
        let has_letter = self.password.chars().any(|c| c.is_alphabetic());
        let has_digit = self.password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(
                crate::loc!("The password needs at least one letter and one digit").to_string(),
            );
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoriteData {
    pub offer_id: OfferId,
    pub status: bool,
}

impl FavoriteData {
    pub fn new(offer_id: impl Into<OfferId>, status: bool) -> Self {
        Self {
            offer_id: offer_id.into(),
            status,
        }
    }

    pub fn status_segment(&self) -> &'static str {
        if self.status {
            "1"
        } else {
            "0"
        }
    }
}

pub const COMMENT_MIN_LENGTH: usize = 50;
pub const COMMENT_MAX_LENGTH: usize = 300;
pub const RATING_MAX: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommentData {
    pub offer_id: OfferId,
    pub comment: String,
    pub rating: u8,
}

/// The body for `POST /comments/{offerId}`
#[derive(Serialize, Debug)]
pub struct CommentBody<'a> {
    pub comment: &'a str,
    pub rating: u8,
}

impl CommentData {
    pub fn new(offer_id: impl Into<OfferId>, comment: impl Into<String>, rating: u8) -> Self {
        Self {
            offer_id: offer_id.into(),
            comment: comment.into(),
            rating,
        }
    }

    pub fn body(&self) -> CommentBody<'_> {
        CommentBody {
            comment: &self.comment,
            rating: self.rating,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rating == 0 || self.rating > RATING_MAX {
            return Err(format!("Rating must be between 1 and {RATING_MAX}"));
        }
        let length = self.comment.trim().chars().count();
        if !(COMMENT_MIN_LENGTH..=COMMENT_MAX_LENGTH).contains(&length) {
            return Err(format!(
                "Reviews need between {COMMENT_MIN_LENGTH} and {COMMENT_MAX_LENGTH} characters"
            ));
        }
        Ok(())
    }
}

// Cities

use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::EnumString;
use strum_macros::IntoStaticStr;

#[derive(
    IntoStaticStr, EnumIter, EnumString, Display, Debug, Clone, Copy, Eq, PartialEq, Hash, Default,
)]
pub enum CityName {
    #[default]
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl CityName {
    /// Resolve a raw city name, falling back to the default city for
    /// anything outside of the supported set
    pub fn resolve(name: &str) -> Self {
        match Self::from_str(name.trim()) {
            Ok(city) => city,
            Err(_) => {
                log::warn!("Unknown city {name:?}, falling back to {}", Self::default());
                Self::default()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Where the map is centered if no offer for the city is loaded
    pub fn fallback_location(&self) -> Location {
        let (latitude, longitude) = match self {
            CityName::Paris => (48.85661, 2.351499),
            CityName::Cologne => (50.938361, 6.959974),
            CityName::Brussels => (50.846557, 4.351697),
            CityName::Amsterdam => (52.37454, 4.897976),
            CityName::Hamburg => (53.550341, 10.000654),
            CityName::Dusseldorf => (51.225402, 6.776314),
        };
        Location {
            latitude,
            longitude,
            zoom: 12,
        }
    }

    pub fn fallback_city(&self) -> City {
        City {
            name: self.name().to_string(),
            location: self.fallback_location(),
        }
    }
}

// Status Types

#[derive(Display, Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum AuthorizationStatus {
    #[default]
    Unknown,
    Auth,
    NoAuth,
}

impl AuthorizationStatus {
    pub fn is_auth(&self) -> bool {
        matches!(self, AuthorizationStatus::Auth)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AuthorizationStatus::Unknown)
    }
}

#[derive(Display, Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum LoadingStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl LoadingStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingStatus::Loading)
    }
}

// Routes

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Root,
    Login,
    Favorites,
    Offer(OfferId),
    NotFound,
}

impl std::fmt::Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppRoute::Root => f.write_str("/"),
            AppRoute::Login => f.write_str("/login"),
            AppRoute::Favorites => f.write_str("/favorites"),
            AppRoute::Offer(id) => f.write_fmt(format_args!("/offer/{id}")),
            AppRoute::NotFound => f.write_str("/404"),
        }
    }
}
