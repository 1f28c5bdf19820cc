use chrono::{DateTime, Utc};
use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::components::data::{selectors, DataState};
use crate::components::user::{selectors as user_selectors, UserState};
use crate::environment::types::{CityName, City, Offer, Review};
use crate::helper::{format_month_year, pluralize, rating_width};

pub const MAX_GALLERY_IMAGES: usize = 6;
pub const MAX_NEAR_OFFERS: usize = 3;
pub const MAX_REVIEWS: usize = 10;

#[derive(
    IntoStaticStr, EnumIter, EnumString, Display, Debug, Clone, Copy, Eq, PartialEq, Default,
)]
pub enum SortOption {
    #[default]
    #[strum(to_string = "Popular")]
    Popular,
    #[strum(to_string = "Price: low to high")]
    PriceLowToHigh,
    #[strum(to_string = "Price: high to low")]
    PriceHighToLow,
    #[strum(to_string = "Top rated first")]
    TopRatedFirst,
}

/// A sorted copy of `offers`. The sort is stable and the input is left
/// alone, `Popular` is the server order.
pub fn sort_offers<'a>(offers: impl IntoIterator<Item = &'a Offer>, sort: SortOption) -> Vec<Offer> {
    let offers = offers.into_iter().cloned();
    match sort {
        SortOption::Popular => offers.collect(),
        SortOption::PriceLowToHigh => offers.sorted_by(|a, b| a.price.cmp(&b.price)).collect(),
        SortOption::PriceHighToLow => offers.sorted_by(|a, b| b.price.cmp(&a.price)).collect(),
        SortOption::TopRatedFirst => offers
            .sorted_by(|a, b| b.rating.total_cmp(&a.rating))
            .collect(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OfferCardViewModel {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub price: String,
    pub rating_width: String,
    pub is_premium: bool,
    pub is_favorite: bool,
    pub image: Option<String>,
}

impl OfferCardViewModel {
    pub fn new(offer: &Offer) -> Self {
        Self {
            id: offer.id.clone(),
            title: offer.title.clone(),
            kind: capitalize(&offer.kind),
            price: format!("€{}", offer.price),
            rating_width: rating_width(offer.rating),
            is_premium: offer.is_premium,
            is_favorite: offer.is_favorite,
            image: offer
                .preview_image
                .clone()
                .or_else(|| offer.images.first().cloned()),
        }
    }
}

/// Everything the main page renders
#[derive(Clone, Debug, PartialEq)]
pub struct MainPageViewModel {
    pub city: CityName,
    pub sort: SortOption,
    pub offers: Vec<Offer>,
    pub places_found: String,
    pub is_empty: bool,
    pub server_error: bool,
    pub is_loading: bool,
    /// Where the map is centered
    pub map_city: City,
    /// The tabs above the list, the selected one included
    pub cities: Vec<CityName>,
    /// Entries of the sort dropdown
    pub sort_options: Vec<SortOption>,
}

impl MainPageViewModel {
    pub fn new(state: &DataState, sort: SortOption) -> Self {
        let city_offers = selectors::current_city_offers(state);
        Self::with_offers(state, &city_offers, sort)
    }

    /// Same as `new`, with offers that were already selected (e.g. through
    /// the memoized selector)
    pub fn with_offers(state: &DataState, city_offers: &im::Vector<Offer>, sort: SortOption) -> Self {
        let city = state.current_city;
        let offers = sort_offers(city_offers.iter(), sort);
        let places_found = format!(
            "{} {} to stay in {}",
            offers.len(),
            pluralize(offers.len(), "place", "places"),
            city
        );
        let map_city = city_offers
            .front()
            .map(|o| o.city.clone())
            .unwrap_or_else(|| city.fallback_city());
        Self {
            city,
            sort,
            is_empty: state.offers_error || offers.is_empty(),
            server_error: state.offers_error,
            is_loading: state.loading_status.is_loading(),
            places_found,
            offers,
            map_city,
            cities: CityName::iter().collect(),
            sort_options: SortOption::iter().collect(),
        }
    }

    pub fn cards(&self) -> Vec<OfferCardViewModel> {
        self.offers.iter().map(OfferCardViewModel::new).collect()
    }

    pub fn empty_description(&self) -> String {
        format!(
            "We could not find any property available at the moment in {}",
            self.city
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OfferPageViewModel {
    pub offer: Offer,
    pub gallery: Vec<String>,
    pub rating_width: String,
    pub bedrooms: String,
    pub max_adults: String,
    pub price: String,
    pub near_offers: Vec<Offer>,
    /// The offer itself plus its neighbours
    pub map_offers: Vec<Offer>,
    pub reviews: Vec<ReviewViewModel>,
    pub review_count: usize,
    pub can_review: bool,
}

impl OfferPageViewModel {
    /// `None` if the offer is unknown, the page then renders the
    /// not-found view
    pub fn new(id: &str, data: &DataState, user: &UserState) -> Option<Self> {
        let offer = data
            .offer
            .as_ref()
            .filter(|o| o.id == id)
            .or_else(|| data.offers.iter().find(|o| o.id == id))?
            .clone();

        let near_offers: Vec<Offer> = if data.near_offers.is_empty() {
            data.offers
                .iter()
                .filter(|o| o.id != offer.id && o.city.name == offer.city.name)
                .take(MAX_NEAR_OFFERS)
                .cloned()
                .collect()
        } else {
            data.near_offers
                .iter()
                .filter(|o| o.id != offer.id)
                .take(MAX_NEAR_OFFERS)
                .cloned()
                .collect()
        };

        let map_offers = std::iter::once(offer.clone())
            .chain(near_offers.iter().cloned())
            .collect();

        Some(Self {
            gallery: offer
                .images
                .iter()
                .take(MAX_GALLERY_IMAGES)
                .cloned()
                .collect(),
            rating_width: rating_width(offer.rating),
            bedrooms: format!(
                "{} {}",
                offer.bedrooms,
                pluralize(offer.bedrooms as usize, "Bedroom", "Bedrooms")
            ),
            max_adults: format!(
                "Max {} {}",
                offer.max_adults,
                pluralize(offer.max_adults as usize, "adult", "adults")
            ),
            price: format!("€{}", offer.price),
            reviews: ReviewViewModel::list(data.reviews.iter()),
            review_count: data.reviews.len(),
            can_review: user_selectors::is_authorized(user),
            near_offers,
            map_offers,
            offer,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewViewModel {
    pub id: String,
    pub user_name: String,
    pub avatar_url: String,
    pub comment: String,
    pub rating_width: String,
    /// e.g. "April 2019"
    pub date_human: String,
    /// The machine readable date for the `datetime` attribute
    pub date_full: String,
    pub date: DateTime<Utc>,
}

impl ReviewViewModel {
    pub fn new(review: &Review) -> Self {
        Self {
            id: review.id.clone(),
            user_name: review.user.name.clone(),
            avatar_url: review.user.avatar_url.clone(),
            comment: review.comment.clone(),
            rating_width: rating_width(review.rating),
            date_human: format_month_year(&review.date),
            date_full: review.date.format("%Y-%m-%d").to_string(),
            date: review.date,
        }
    }

    /// Newest first, at most `MAX_REVIEWS`
    pub fn list<'a>(reviews: impl Iterator<Item = &'a Review>) -> Vec<Self> {
        reviews
            .sorted_by(|a, b| b.date.cmp(&a.date))
            .take(MAX_REVIEWS)
            .map(Self::new)
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderViewModel {
    pub signed_in: bool,
    pub email: String,
    pub avatar_url: Option<String>,
    pub favorite_count: usize,
}

impl HeaderViewModel {
    pub fn new(data: &DataState, user: &UserState) -> Self {
        let Some(user_data) = user_selectors::user_data(user) else {
            return Self::default();
        };
        Self {
            signed_in: true,
            email: user_data.email.clone(),
            avatar_url: Some(user_data.avatar_url.clone()).filter(|a| !a.is_empty()),
            favorite_count: selectors::favorite_count(data),
        }
    }
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
