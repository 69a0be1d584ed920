//! Fixture bootstrap: the shared baseline every test depends on.
//!
//! Discovery runs exactly once, before any test, and produces an
//! immutable [`Harness`] value that is passed by reference into tests.
//! Ordering dependencies are explicit constructor arguments: a max-id
//! discovery takes the previously discovered count as the page size, and
//! the real-user selection takes the user count. Any network or decode
//! failure here is fatal for the whole run; no test can produce a
//! meaningful result without the baseline.

use rand::Rng;
use tracing::info;

use crate::auth::Session;
use crate::client::ApiClient;
use crate::config::{endpoints, HarnessConfig};
use crate::core::error::fatal_during;
use crate::core::{HarnessError, Result};
use crate::schema::{decode_page, decode_user, Page, User};

/// A listable resource kind of the service under test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Products,
    Carts,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Users => endpoints::USERS,
            Resource::Products => endpoints::PRODUCTS,
            Resource::Carts => endpoints::CARTS,
        }
    }

    /// Identifiers of this resource's array inside a listing page
    fn ids(self, page: &Page) -> Result<Vec<i64>> {
        let ids = match self {
            Resource::Users => page
                .users
                .as_ref()
                .map(|users| users.iter().map(|u| u.id).collect()),
            Resource::Products => page
                .products
                .as_ref()
                .map(|products| products.iter().map(|p| p.id).collect()),
            Resource::Carts => page
                .carts
                .as_ref()
                .map(|carts| carts.iter().map(|c| c.id).collect()),
        };
        ids.ok_or_else(|| {
            HarnessError::bootstrap(format!(
                "{path} listing carried no {path} array",
                path = self.path()
            ))
        })
    }
}

/// Issue an unauthenticated, parameterless list request and return the
/// page's `total`.
pub async fn discover_cardinality(client: &ApiClient, resource: Resource) -> Result<i64> {
    let response = client.get(resource.path(), None).await?;
    let page = decode_page(&response.json()?)?;
    info!(resource = resource.path(), count = page.total, "discovered cardinality");
    Ok(page.total)
}

/// Re-issue the list request with `limit = count` so the full set comes
/// back in one page, and return the maximum identifier. Requires the
/// resource's cardinality to have been discovered first; the count is an
/// explicit argument precisely because of that ordering dependency.
pub async fn discover_max_id(client: &ApiClient, resource: Resource, count: i64) -> Result<i64> {
    let path = format!("{}?limit={}", resource.path(), count);
    let response = client.get(&path, None).await?;
    let page = decode_page(&response.json()?)?;
    let max_id = resource
        .ids(&page)?
        .into_iter()
        .max()
        .ok_or_else(|| HarnessError::bootstrap(format!("{} listing is empty", resource.path())))?;
    info!(resource = resource.path(), max_id, "discovered maximum id");
    Ok(max_id)
}

/// Pick an arbitrary existing user as the canonical test identity and
/// resolve its complete profile. The last index is excluded to stay away
/// from edge-of-range identifiers. The profile carries no token yet; the
/// session fills that in lazily on first authenticated use.
pub async fn select_real_user(client: &ApiClient, user_count: i64) -> Result<User> {
    if user_count < 2 {
        return Err(HarnessError::bootstrap(format!(
            "cannot select a fixture user from {user_count} users"
        )));
    }
    let index = rand::thread_rng().gen_range(1..user_count);

    let path = format!("{}?limit={}", endpoints::USERS, user_count);
    let response = client.get(&path, None).await?;
    let page = decode_page(&response.json()?)?;
    let ids = Resource::Users.ids(&page)?;
    let user_id = *ids.get((index - 1) as usize).ok_or_else(|| {
        HarnessError::bootstrap("user listing is shorter than its reported total")
    })?;

    let response = client
        .get(&format!("{}/{}", endpoints::USERS, user_id), None)
        .await?;
    let user = decode_user(&response.json()?)?;
    info!(
        user_id = user.id,
        username = user.username.as_deref().unwrap_or(""),
        "selected fixture user for authenticated requests"
    );
    Ok(user)
}

/// Count and maximum identifier of one resource kind
#[derive(Debug, Clone, Copy)]
pub struct ResourceStats {
    pub count: i64,
    pub max_id: i64,
}

impl ResourceStats {
    /// Count first, then max id with the count as the page size
    pub async fn discover(client: &ApiClient, resource: Resource) -> Result<Self> {
        let count = discover_cardinality(client, resource)
            .await
            .map_err(fatal_during(format!("{} cardinality", resource.path())))?;
        let max_id = discover_max_id(client, resource, count)
            .await
            .map_err(fatal_during(format!("{} max id", resource.path())))?;
        Ok(Self { count, max_id })
    }
}

/// System cardinalities discovered at bootstrap, read-only afterwards
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub users: ResourceStats,
    pub products: ResourceStats,
    pub carts: ResourceStats,
}

/// The bootstrapped, immutable shared state of a whole test run
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    fixture: Fixture,
    session: Session,
}

impl Harness {
    /// Run the one-shot bootstrap. The three resources are disjoint, so
    /// their discoveries fan out concurrently; within one resource the
    /// count is always discovered before the max id.
    pub async fn bootstrap(config: HarnessConfig) -> Result<Self> {
        config.validate()?;
        let client = ApiClient::new(&config)?;

        let (users, products, carts) = tokio::try_join!(
            ResourceStats::discover(&client, Resource::Users),
            ResourceStats::discover(&client, Resource::Products),
            ResourceStats::discover(&client, Resource::Carts),
        )?;

        let real_user = select_real_user(&client, users.count)
            .await
            .map_err(fatal_during("real user selection"))?;

        Ok(Self {
            config,
            fixture: Fixture {
                users,
                products,
                carts,
            },
            session: Session::new(real_user),
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The cached real user
    pub fn real_user(&self) -> &User {
        self.session.user()
    }

    /// A fresh gateway over the configured base URL. Connection pooling
    /// stays local to the caller, which keeps the harness shareable
    /// across test runtimes.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config)
    }
}
