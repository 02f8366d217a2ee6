//! In-memory stand-ins for the database and object store, and a
//! `TestServer` over the real router.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::config::{AppConfig, DashboardConfig, FeedConfig};
use crate::core::error::{AppError, Result};
use crate::core::router::{api_routes, with_layers, AppServices};
use crate::features::auth::models::UserIdentity;
use crate::features::auth::{AuthService, UserRepository};
use crate::features::dashboard::models::{ActivityCounts, DailyActivity};
use crate::features::dashboard::{ActivityRepository, DashboardService};
use crate::features::images::ImageService;
use crate::features::products::models::{FeedQuery, Product};
use crate::features::products::{ProductRepository, ProductService};
use crate::features::reviews::models::{InsertOutcome, NewReview, Review};
use crate::features::reviews::{ReviewRepository, ReviewService};
use crate::modules::storage::ObjectStore;

pub const TEST_IMAGE_PREFIX: &str = "scraped-assets/v3";
pub const TEST_URL_EXPIRY_SECS: u32 = 604_800;

pub fn fake_email() -> String {
    SafeEmail().fake()
}

/// Seed one reviewer and one product straight into Postgres
pub async fn seed_pg(pool: &sqlx::PgPool, email: &str, scrape_id: &str, batch: i32) {
    sqlx::query("INSERT INTO user_identities (email, password, batch_number) VALUES ($1, 'pw', $2)")
        .bind(email)
        .bind(batch)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO input_products (scrape_id, assigned_batch, product_name) VALUES ($1, $2, $3)",
    )
    .bind(scrape_id)
    .bind(batch)
    .bind(format!("Product {}", scrape_id))
    .execute(pool)
    .await
    .unwrap();
}

struct StoredUser {
    email: String,
    password: String,
    batch_number: i32,
}

#[derive(Default)]
struct StoreState {
    users: Vec<StoredUser>,
    products: Vec<Product>,
    reviews: Vec<Review>,
    fail_next: bool,
}

/// Implements every repository trait over shared in-memory tables.
/// Clones share state, so a test can seed and inspect the same store the
/// server uses.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    /// Fail the next repository call, then behave normally
    pub fn fail_next_query(&self) {
        self.lock().fail_next = true;
    }

    fn check_failure(state: &mut StoreState) -> Result<()> {
        if std::mem::take(&mut state.fail_next) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub fn add_user(&self, email: &str, password: &str, batch_number: i32) {
        self.lock().users.push(StoredUser {
            email: email.to_string(),
            password: password.to_string(),
            batch_number,
        });
    }

    pub fn add_product(&self, scrape_id: &str, assigned_batch: i32) {
        self.lock().products.push(Product {
            scrape_id: scrape_id.to_string(),
            assigned_batch,
            brand_name: Some(CompanyName().fake()),
            product_name: format!("Product {}", scrape_id),
            product_primary_image_url: None,
            selling_price: Some(Decimal::new(49_900, 2)),
            price_category: Some("mid".to_string()),
            review_count: 0,
        });
    }

    pub fn add_review(&self, scrape_id: &str, reviewer_email: &str, score: i16) {
        self.add_review_at(scrape_id, reviewer_email, score, Utc::now());
    }

    /// Seed a review without foreign-key checks
    pub fn add_review_at(
        &self,
        scrape_id: &str,
        reviewer_email: &str,
        score: i16,
        created_at: DateTime<Utc>,
    ) {
        self.lock().reviews.push(Review {
            id: Uuid::now_v7(),
            scrape_id: scrape_id.to_string(),
            reviewer_email: reviewer_email.to_string(),
            review_score: score,
            created_at,
        });
    }

    pub fn review_count(&self) -> usize {
        self.lock().reviews.len()
    }
}

fn local_date(at: DateTime<Utc>, utc_offset_minutes: i32) -> NaiveDate {
    (at + Duration::minutes(i64::from(utc_offset_minutes))).date_naive()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserIdentity>> {
        let mut state = self.lock();
        Self::check_failure(&mut state)?;
        Ok(state
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| UserIdentity {
                email: u.email.clone(),
                batch_number: u.batch_number,
            }))
    }

    async fn find_batch_number(&self, email: &str) -> Result<Option<i32>> {
        let mut state = self.lock();
        Self::check_failure(&mut state)?;
        Ok(state
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.batch_number))
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list_unreviewed(&self, query: &FeedQuery) -> Result<Vec<Product>> {
        let mut state = self.lock();
        Self::check_failure(&mut state)?;

        let mut feed: Vec<Product> = state
            .products
            .iter()
            .filter(|p| p.assigned_batch == query.batch_number)
            .filter(|p| {
                !state.reviews.iter().any(|r| {
                    r.scrape_id == p.scrape_id && r.reviewer_email == query.reviewer_email
                })
            })
            .map(|p| {
                let review_count = state
                    .reviews
                    .iter()
                    .filter(|r| r.scrape_id == p.scrape_id)
                    .count() as i64;
                Product {
                    review_count,
                    ..p.clone()
                }
            })
            .filter(|p| {
                query
                    .max_reviews_per_product
                    .map_or(true, |cap| p.review_count < cap)
            })
            .collect();

        feed.sort_by(|a, b| a.scrape_id.cmp(&b.scrape_id));
        feed.truncate(usize::try_from(query.limit).unwrap_or(0));
        Ok(feed)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn insert(&self, review: &NewReview) -> Result<InsertOutcome> {
        let mut state = self.lock();
        Self::check_failure(&mut state)?;

        let known_product = state.products.iter().any(|p| p.scrape_id == review.scrape_id);
        let known_user = state.users.iter().any(|u| u.email == review.reviewer_email);
        if !known_product || !known_user {
            return Ok(InsertOutcome::UnknownReference);
        }

        let duplicate = state.reviews.iter().any(|r| {
            r.scrape_id == review.scrape_id && r.reviewer_email == review.reviewer_email
        });
        if duplicate {
            return Ok(InsertOutcome::Duplicate);
        }

        let row = Review {
            id: review.id,
            scrape_id: review.scrape_id.clone(),
            reviewer_email: review.reviewer_email.clone(),
            review_score: review.score.as_i16(),
            created_at: Utc::now(),
        };
        state.reviews.push(row.clone());
        Ok(InsertOutcome::Inserted(row))
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn activity_on(
        &self,
        email: &str,
        day: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<ActivityCounts> {
        let mut state = self.lock();
        Self::check_failure(&mut state)?;

        Ok(state
            .reviews
            .iter()
            .filter(|r| r.reviewer_email == email)
            .filter(|r| local_date(r.created_at, utc_offset_minutes) == day)
            .fold(ActivityCounts::default(), |acc, r| ActivityCounts {
                reviews: acc.reviews + 1,
                likes: acc.likes + i64::from(r.review_score),
            }))
    }

    async fn daily_activity_since(
        &self,
        email: &str,
        from: NaiveDate,
        utc_offset_minutes: i32,
    ) -> Result<Vec<DailyActivity>> {
        let mut state = self.lock();
        Self::check_failure(&mut state)?;

        let mut days: Vec<DailyActivity> = Vec::new();
        for review in state.reviews.iter().filter(|r| r.reviewer_email == email) {
            let date = local_date(review.created_at, utc_offset_minutes);
            if date < from {
                continue;
            }
            match days.iter_mut().find(|d| d.date == date) {
                Some(day) => {
                    day.reviews += 1;
                    day.likes += i64::from(review.review_score);
                }
                None => days.push(DailyActivity {
                    date,
                    reviews: 1,
                    likes: i64::from(review.review_score),
                }),
            }
        }

        days.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(days)
    }
}

#[derive(Default)]
struct ObjectState {
    keys: HashSet<String>,
    last_expiry: Option<u32>,
    failing: bool,
}

/// Object store backed by a key set. Presigned URLs are
/// `https://objects.test/<key>`.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    state: Arc<Mutex<ObjectState>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(self, key: &str) -> Self {
        self.state.lock().unwrap().keys.insert(key.to_string());
        self
    }

    /// Every call fails as if the endpoint were unreachable
    pub fn failing(self) -> Self {
        self.state.lock().unwrap().failing = true;
        self
    }

    pub fn last_expiry(&self) -> Option<u32> {
        self.state.lock().unwrap().last_expiry
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn exists(&self, key: &str) -> std::result::Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        if state.failing {
            return Err(AppError::Storage("connection refused".to_string()));
        }
        Ok(state.keys.contains(key))
    }

    async fn presigned_get_url(
        &self,
        key: &str,
        expiry_secs: u32,
    ) -> std::result::Result<String, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.failing {
            return Err(AppError::Storage("connection refused".to_string()));
        }
        state.last_expiry = Some(expiry_secs);
        Ok(format!("https://objects.test/{}", key))
    }

    fn bucket_name(&self) -> String {
        "test-bucket".to_string()
    }
}

/// Services wired to the given stores with default feed/dashboard settings
pub fn test_services(store: MemoryStore, objects: MemoryObjectStore) -> AppServices {
    let store = Arc::new(store);
    AppServices {
        auth: Arc::new(AuthService::new(store.clone())),
        products: Arc::new(ProductService::new(
            store.clone(),
            store.clone(),
            FeedConfig::default(),
        )),
        reviews: Arc::new(ReviewService::new(store.clone())),
        dashboard: Arc::new(DashboardService::new(store, DashboardConfig::default())),
        images: Arc::new(ImageService::new(
            Arc::new(objects),
            TEST_IMAGE_PREFIX.to_string(),
            TEST_URL_EXPIRY_SECS,
        )),
    }
}

pub fn test_app_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allowed_origins: vec!["*".to_string()],
        max_request_body_size: 1024 * 1024,
    }
}

/// Full API router, layers included
pub fn test_server(store: MemoryStore, objects: MemoryObjectStore) -> TestServer {
    let app = with_layers(api_routes(test_services(store, objects)), &test_app_config());
    TestServer::new(app).unwrap()
}
