//! REST client for the hospital backend.

use futures::join;
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use shared_types::{
    link_all, ApiConfig, AppError, Credentials, Employee, LinksTo, ListEnvelope, LoginResponse,
    Mutation, Resource, Statistics, Transition, UserProfile,
};

use crate::session::SessionHolder;

/// Cheap to clone; clones share the HTTP connection pool and the session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionHolder,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.session == other.session
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionHolder) -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(config.timeout_secs.max(1)));
        let http = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to a default HTTP client");
            reqwest::Client::new()
        });
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ── Transport ──

    #[tracing::instrument(skip(self, body, token))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<String, AppError> {
        let mut request = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!("sending request");
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, path, "request failed");
            AppError::network(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        if status.is_success() {
            return Ok(text);
        }
        tracing::warn!(status = status.as_u16(), path, "request rejected");
        Err(AppError::from_response(status.as_u16(), &text))
    }

    /// Send with the session token. A missing token or an HTTP 401 ends
    /// the session.
    async fn authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<String, AppError> {
        let Some(token) = self.session.token() else {
            self.session.end_session();
            return Err(AppError::unauthorized("You are not signed in"));
        };
        let result = self.send(method, path, body, Some(&token)).await;
        if let Err(err) = &result {
            if err.is_unauthorized() {
                self.session.end_session();
            }
        }
        result
    }

    // ── Reads ──

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let text = self.authorized(Method::GET, path, None).await?;
        decode(&text)
    }

    /// A collection at `path`, bare or wrapped in `data`.
    pub async fn list_path<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let envelope: ListEnvelope<T> = self.get_json(path).await?;
        Ok(envelope.into_vec())
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, AppError> {
        self.list_path(R::PATH).await
    }

    /// Fetch a resource and a lookup collection together and link the
    /// records to it. Settles once both requests have; either failing
    /// fails the whole load.
    pub async fn list_joined<R, L>(&self, lookup_path: &str) -> Result<(Vec<R>, Vec<L>), AppError>
    where
        R: Resource + LinksTo<L>,
        L: DeserializeOwned,
    {
        let (records, lookup) = join!(self.list::<R>(), self.list_path::<L>(lookup_path));
        let mut records = records?;
        let lookup = lookup?;
        link_all(&mut records, &lookup);
        Ok((records, lookup))
    }

    /// [`Self::list_joined`] where the lookup is itself a resource.
    pub async fn list_linked<R, L>(&self) -> Result<(Vec<R>, Vec<L>), AppError>
    where
        R: Resource + LinksTo<L>,
        L: Resource,
    {
        self.list_joined::<R, L>(L::PATH).await
    }

    pub async fn statistics(&self) -> Result<Statistics, AppError> {
        self.get_json("statistiques").await
    }

    /// Staff who can take leave.
    pub async fn employees(&self) -> Result<Vec<Employee>, AppError> {
        self.list_path("users/conge").await
    }

    // ── Writes ──

    pub async fn create<R: Resource>(&self, form: &R::Form) -> Result<(), AppError> {
        self.authorized(Method::POST, R::PATH, Some(to_body(form)?))
            .await
            .map(drop)
    }

    pub async fn update<R: Resource>(&self, id: i64, form: &R::Form) -> Result<(), AppError> {
        let path = format!("{}/{id}", R::PATH);
        self.authorized(Method::PUT, &path, Some(to_body(form)?))
            .await
            .map(drop)
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), AppError> {
        let path = format!("{}/{id}", R::PATH);
        self.authorized(Method::DELETE, &path, None).await.map(drop)
    }

    pub async fn transition<R: Resource>(&self, id: i64, transition: Transition) -> Result<(), AppError> {
        let path = format!("{}/{id}/{}", R::PATH, transition.segment());
        self.authorized(Method::PUT, &path, Some(Value::Object(Default::default())))
            .await
            .map(drop)
    }

    /// Run a mutation produced by a `CrudView`.
    pub async fn execute<R: Resource>(&self, mutation: &Mutation<R::Form>) -> Result<(), AppError> {
        match mutation {
            Mutation::Create(form) => self.create::<R>(form).await,
            Mutation::Update { id, form } => self.update::<R>(*id, form).await,
            Mutation::Delete { id } => self.delete::<R>(*id).await,
            Mutation::Transition { id, transition } => self.transition::<R>(*id, *transition).await,
        }
    }

    // ── Authentication ──

    /// `POST /login`; returns the issued token without storing it.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, AppError> {
        let text = self
            .send(Method::POST, "login", Some(to_body(credentials)?), None)
            .await?;
        let response: LoginResponse = decode(&text)?;
        Ok(response.token)
    }

    /// `GET /user` with an explicit token.
    pub async fn fetch_current_user(&self, token: &str) -> Result<UserProfile, AppError> {
        let text = self.send(Method::GET, "user", None, Some(token)).await?;
        decode(&text)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    serde_json::from_str(text).map_err(|e| {
        tracing::error!(error = %e, "undecodable response body");
        AppError::internal(format!("Unexpected response from the server: {e}"))
    })
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::internal(e.to_string()))
}
