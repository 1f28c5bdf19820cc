use reqwest::header::HeaderValue;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::AppConfig;
use super::error::{ApiError, ResultExt};
use super::repository::Repository;
use super::router::Router;
use super::types::{
    AppRoute, AuthData, CommentData, FavoriteData, Offer, OfferId, Review, UserData,
};

/// The header the session token travels in
pub const TOKEN_HEADER: &str = "X-Token";

pub mod api_route {
    pub const OFFERS: &str = "offers";
    pub const FAVORITE: &str = "favorite";
    pub const COMMENTS: &str = "comments";
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
}

/// The one configured HTTP client. Every call attaches the current
/// session token and a 401 sends the app to the login view before the
/// error reaches the caller.
#[derive(Clone)]
pub struct Model {
    pub config: AppConfig,
    client: reqwest::Client,
    repository: Repository,
    router: Router,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("url", &self.config.base_url)
            .finish()
    }
}

impl Model {
    pub fn new(config: AppConfig, repository: Repository, router: Router) -> Result<Self, String> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| format!("Could not create http client: {e:?}"))?;
        Ok(Self {
            config,
            client,
            repository,
            router,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub async fn offers(&self) -> Result<Vec<Offer>, ApiError> {
        log::debug!("Offers");
        self.fetch(Method::GET, api_route::OFFERS, "offers").await
    }

    pub async fn offer(&self, id: &OfferId) -> Result<Offer, ApiError> {
        log::debug!("Offer {id}");
        let path = format!("{}/{}", api_route::OFFERS, segment(id));
        self.fetch(Method::GET, &path, "offer").await
    }

    pub async fn near_offers(&self, id: &OfferId) -> Result<Vec<Offer>, ApiError> {
        log::debug!("Nearby offers for {id}");
        let path = format!("{}/{}/nearby", api_route::OFFERS, segment(id));
        self.fetch(Method::GET, &path, "near_offers").await
    }

    pub async fn favorites(&self) -> Result<Vec<Offer>, ApiError> {
        log::debug!("Favorites");
        self.fetch(Method::GET, api_route::FAVORITE, "favorites")
            .await
    }

    pub async fn set_favorite(&self, data: &FavoriteData) -> Result<Offer, ApiError> {
        log::debug!("Set favorite {} to {}", data.offer_id, data.status);
        let path = format!(
            "{}/{}/{}",
            api_route::FAVORITE,
            segment(&data.offer_id),
            data.status_segment()
        );
        self.fetch(Method::POST, &path, "set_favorite").await
    }

    pub async fn comments(&self, id: &OfferId) -> Result<Vec<Review>, ApiError> {
        log::debug!("Comments for {id}");
        let path = format!("{}/{}", api_route::COMMENTS, segment(id));
        let mut reviews: Vec<Review> = self.fetch(Method::GET, &path, "comments").await?;
        for review in reviews.iter_mut() {
            review.offer_id = id.clone();
        }
        Ok(reviews)
    }

    pub async fn post_comment(&self, data: &CommentData) -> Result<Review, ApiError> {
        log::debug!("Post comment for {}", data.offer_id);
        data.validate().map_err(ApiError::Invalid)?;
        let path = format!("{}/{}", api_route::COMMENTS, segment(&data.offer_id));
        let mut review: Review = self
            .submit(Method::POST, &path, &data.body(), "post_comment")
            .await?;
        review.offer_id = data.offer_id.clone();
        Ok(review)
    }

    /// Verifies the stored token. Does not hit the network without one
    pub async fn check_auth(&self) -> Result<UserData, ApiError> {
        log::debug!("Check auth");
        if !self.repository.has_token() {
            return Err(ApiError::NoToken);
        }
        self.fetch(Method::GET, api_route::LOGIN, "check_auth").await
    }

    pub async fn login(&self, data: &AuthData) -> Result<UserData, ApiError> {
        log::debug!("Login {}", data.email);
        data.validate().map_err(ApiError::Invalid)?;
        self.submit(Method::POST, api_route::LOGIN, data, "login")
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        log::debug!("Logout");
        let request = self.request(Method::DELETE, api_route::LOGOUT);
        self.execute(request, "logout").await.map(|_| ())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        call: &'static str,
    ) -> Result<T, ApiError> {
        let request = self.request(method, path);
        let response = self.execute(request, call).await?;
        response.json::<T>().await.api_error(call)
    }

    async fn submit<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        call: &'static str,
    ) -> Result<T, ApiError> {
        let request = self.request(method, path).json(body);
        let response = self.execute(request, call).await?;
        response.json::<T>().await.api_error(call)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.config.endpoint(path));
        let token = self.repository.token();
        if token.is_empty() {
            return builder;
        }
        match HeaderValue::from_str(&token) {
            Ok(value) => builder.header(TOKEN_HEADER, value),
            Err(e) => {
                log::error!("Stored token is not a valid header value: {e:?}");
                builder
            }
        }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        call: &'static str,
    ) -> Result<Response, ApiError> {
        let response = request.send().await.api_error(call)?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            log::debug!("{call} is unauthorized");
            self.router.redirect(AppRoute::Login);
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16())).api_error(call);
        }
        Ok(response)
    }
}

fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
