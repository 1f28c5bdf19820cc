use crate::effect::Effect;
use crate::environment::types::{
    CityName, CommentData, FavoriteData, LoadingStatus, Offer, OfferId, Review,
};
use crate::environment::{ApiError, Environment};
use crate::loc;

pub const OFFERS_ERROR: &str = "Failed to load offers. Please try again later.";
pub const OFFER_ERROR: &str = "Failed to load offer details. Please try again later.";
pub const NEAR_OFFERS_ERROR: &str = "Failed to load nearby offers. Please try again later.";
pub const FAVORITES_ERROR: &str = "Failed to load favorite offers";
pub const FAVORITE_STATUS_ERROR: &str = "Failed to update favorite status";
pub const COMMENTS_ERROR: &str = "Failed to load reviews. Please try again later.";
pub const POST_COMMENT_ERROR: &str = "Failed to post review. Please try again.";

#[derive(Debug, Clone)]
pub enum DataAction {
    ChangeCity(CityName),
    /// A raw city name coming from a view, corrected to a supported city
    SelectCity(String),
    ResetOffersError,
    /// Reset the error and load again
    RetryOffers,

    FetchOffers,
    OffersLoaded(Result<Vec<Offer>, ApiError>),
    FetchOffer(OfferId),
    OfferLoaded(OfferId, Result<Offer, ApiError>),
    FetchNearOffers(OfferId),
    NearOffersLoaded(OfferId, Result<Vec<Offer>, ApiError>),
    FetchFavoriteOffers,
    FavoriteOffersLoaded(Result<Vec<Offer>, ApiError>),
    ChangeFavoriteStatus(FavoriteData),
    FavoriteStatusChanged(Result<Offer, ApiError>),
    ClearFavorites,
    FetchComments(OfferId),
    CommentsLoaded(OfferId, Result<Vec<Review>, ApiError>),
    PostComment(CommentData),
    CommentPosted(Result<Review, ApiError>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataState {
    pub offers: im::Vector<Offer>,
    pub current_city: CityName,
    pub favorite_offers: im::Vector<Offer>,
    pub offers_error: bool,
    pub loading_status: LoadingStatus,

    /// The id the detail page was opened for
    pub offer_id: Option<OfferId>,
    /// The offer on the detail page
    pub offer: Option<Offer>,
    pub offer_status: LoadingStatus,
    pub near_offers: im::Vector<Offer>,
    pub reviews: im::Vector<Review>,
    /// State of the last review submission
    pub review_status: LoadingStatus,
}

impl Default for DataState {
    fn default() -> Self {
        Self {
            offers: Default::default(),
            current_city: CityName::default(),
            favorite_offers: Default::default(),
            offers_error: false,
            loading_status: LoadingStatus::Idle,
            offer_id: None,
            offer: None,
            offer_status: LoadingStatus::Idle,
            near_offers: Default::default(),
            reviews: Default::default(),
            review_status: LoadingStatus::Idle,
        }
    }
}

impl DataState {
    /// Apply a favorite toggle response. Entries are only ever matched by
    /// id, the lists themselves are never merged.
    pub fn apply_favorite(&mut self, offer: &Offer) {
        let mut found = false;
        for entry in self.favorite_offers.iter_mut() {
            if entry.id == offer.id {
                *entry = offer.clone();
                found = true;
            }
        }
        if !found && offer.is_favorite {
            self.favorite_offers.push_back(offer.clone());
        }

        for entry in self
            .offers
            .iter_mut()
            .chain(self.near_offers.iter_mut())
        {
            if entry.id == offer.id {
                entry.is_favorite = offer.is_favorite;
            }
        }

        if let Some(current) = self.offer.as_mut() {
            if current.id == offer.id {
                current.is_favorite = offer.is_favorite;
            }
        }
    }

    /// Point the detail page at `id`. Everything loaded for another
    /// offer is dropped, a reload of the same offer keeps it.
    fn open_offer(&mut self, id: &OfferId) {
        if self.offer_id.as_ref() == Some(id) {
            return;
        }
        self.offer_id = Some(id.clone());
        self.offer = None;
        self.near_offers.clear();
        self.reviews.clear();
    }
}

fn notify_failure(environment: &Environment, error: &ApiError, message: &str) {
    // the client already sent the user to the login view
    if error.is_unauthorized() {
        return;
    }
    environment.notifications.error(loc!(message));
}

pub fn reduce(
    action: DataAction,
    state: &mut DataState,
    environment: &Environment,
) -> Effect<DataAction> {
    log::trace!("{action:?}");
    let model = environment.model.clone();
    match action {
        DataAction::ChangeCity(city) => {
            state.current_city = city;
            Effect::NONE
        }
        DataAction::SelectCity(name) => {
            state.current_city = CityName::resolve(&name);
            Effect::NONE
        }
        DataAction::ResetOffersError => {
            state.offers_error = false;
            Effect::NONE
        }
        DataAction::RetryOffers => {
            state.offers_error = false;
            Effect::action(DataAction::FetchOffers)
        }
        DataAction::FetchOffers => {
            state.loading_status = LoadingStatus::Loading;
            Effect::future(async move { model.offers().await }, DataAction::OffersLoaded)
        }
        DataAction::OffersLoaded(result) => {
            match result {
                Ok(offers) => {
                    log::debug!("{} offers loaded", offers.len());
                    state.offers = offers.into_iter().collect();
                    state.offers_error = false;
                    state.loading_status = LoadingStatus::Succeeded;
                }
                Err(e) => {
                    state.offers_error = true;
                    state.loading_status = LoadingStatus::Failed;
                    notify_failure(environment, &e, OFFERS_ERROR);
                }
            }
            Effect::NONE
        }
        DataAction::FetchOffer(id) => {
            state.offer_status = LoadingStatus::Loading;
            state.open_offer(&id);
            let cloned = id.clone();
            Effect::future(async move { model.offer(&id).await }, move |result| {
                DataAction::OfferLoaded(cloned, result)
            })
        }
        DataAction::OfferLoaded(id, result) => {
            match result {
                Ok(offer) => {
                    state.offer = Some(offer);
                    state.offer_status = LoadingStatus::Succeeded;
                }
                Err(e) => {
                    log::debug!("Offer {id} failed: {e}");
                    state.offer_status = LoadingStatus::Failed;
                    notify_failure(environment, &e, OFFER_ERROR);
                }
            }
            Effect::NONE
        }
        DataAction::FetchNearOffers(id) => {
            state.open_offer(&id);
            let cloned = id.clone();
            Effect::future(async move { model.near_offers(&id).await }, move |result| {
                DataAction::NearOffersLoaded(cloned, result)
            })
        }
        DataAction::NearOffersLoaded(id, result) => {
            match result {
                Ok(offers) => {
                    log::debug!("{} offers near {id}", offers.len());
                    state.near_offers = offers.into_iter().collect();
                }
                Err(e) => notify_failure(environment, &e, NEAR_OFFERS_ERROR),
            }
            Effect::NONE
        }
        DataAction::FetchFavoriteOffers => Effect::future(
            async move { model.favorites().await },
            DataAction::FavoriteOffersLoaded,
        ),
        DataAction::FavoriteOffersLoaded(result) => {
            match result {
                Ok(offers) => state.favorite_offers = offers.into_iter().collect(),
                Err(e) => notify_failure(environment, &e, FAVORITES_ERROR),
            }
            Effect::NONE
        }
        DataAction::ChangeFavoriteStatus(data) => Effect::future(
            async move { model.set_favorite(&data).await },
            DataAction::FavoriteStatusChanged,
        ),
        DataAction::FavoriteStatusChanged(result) => {
            match result {
                Ok(offer) => state.apply_favorite(&offer),
                Err(e) => notify_failure(environment, &e, FAVORITE_STATUS_ERROR),
            }
            Effect::NONE
        }
        DataAction::ClearFavorites => {
            state.favorite_offers.clear();
            for entry in state.offers.iter_mut().chain(state.near_offers.iter_mut()) {
                entry.is_favorite = false;
            }
            if let Some(offer) = state.offer.as_mut() {
                offer.is_favorite = false;
            }
            Effect::NONE
        }
        DataAction::FetchComments(id) => {
            state.open_offer(&id);
            let cloned = id.clone();
            Effect::future(async move { model.comments(&id).await }, move |result| {
                DataAction::CommentsLoaded(cloned, result)
            })
        }
        DataAction::CommentsLoaded(id, result) => {
            match result {
                Ok(reviews) => {
                    log::debug!("{} reviews for {id}", reviews.len());
                    state.reviews = reviews.into_iter().collect();
                }
                Err(e) => notify_failure(environment, &e, COMMENTS_ERROR),
            }
            Effect::NONE
        }
        DataAction::PostComment(data) => {
            state.review_status = LoadingStatus::Loading;
            Effect::future(
                async move { model.post_comment(&data).await },
                DataAction::CommentPosted,
            )
        }
        DataAction::CommentPosted(result) => {
            match result {
                Ok(review) => {
                    state.reviews.push_back(review);
                    state.review_status = LoadingStatus::Succeeded;
                }
                Err(ApiError::Invalid(message)) => {
                    state.review_status = LoadingStatus::Failed;
                    environment.notifications.error(message);
                }
                Err(e) => {
                    state.review_status = LoadingStatus::Failed;
                    notify_failure(environment, &e, POST_COMMENT_ERROR);
                }
            }
            Effect::NONE
        }
    }
}
