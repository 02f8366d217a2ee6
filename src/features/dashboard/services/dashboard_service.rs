use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

use crate::core::config::DashboardConfig;
use crate::core::error::{AppError, Result};
use crate::features::dashboard::dtos::{DashboardDto, DayStatsDto, HistoricalDayDto};
use crate::features::dashboard::repositories::ActivityRepository;

/// Service for per-reviewer activity summaries
pub struct DashboardService {
    activity: Arc<dyn ActivityRepository>,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(activity: Arc<dyn ActivityRepository>, config: DashboardConfig) -> Self {
        Self { activity, config }
    }

    pub async fn summary(&self, email: &str) -> Result<DashboardDto> {
        self.summary_at(email, Utc::now()).await
    }

    /// Summary as seen at `now`. The history window covers
    /// `history_days` local days ending with today.
    pub async fn summary_at(&self, email: &str, now: DateTime<Utc>) -> Result<DashboardDto> {
        let offset = self.config.utc_offset_minutes;
        let today = self.local_date(now)?;
        let from = self.window_start(today)?;

        let today_counts = self.activity.activity_on(email, today, offset).await?;
        let history = self
            .activity
            .daily_activity_since(email, from, offset)
            .await?;

        tracing::debug!(
            "Dashboard resolved: email={}, today={}, reviews_today={}, days={}",
            email,
            today,
            today_counts.reviews,
            history.len()
        );

        Ok(DashboardDto {
            today: DayStatsDto::from(today_counts),
            historical: history.into_iter().map(HistoricalDayDto::from).collect(),
        })
    }

    fn window_start(&self, today: NaiveDate) -> Result<NaiveDate> {
        let days = (self.config.history_days - 1).max(0);
        Duration::try_days(days)
            .and_then(|span| today.checked_sub_signed(span))
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Dashboard history window out of range: {} days",
                    self.config.history_days
                ))
            })
    }

    fn local_date(&self, now: DateTime<Utc>) -> Result<NaiveDate> {
        let offset = FixedOffset::east_opt(self.config.utc_offset_minutes * 60).ok_or_else(|| {
            AppError::Internal(format!(
                "Invalid dashboard UTC offset: {} minutes",
                self.config.utc_offset_minutes
            ))
        })?;
        Ok(now.with_timezone(&offset).date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::shared::test_helpers::MemoryStore;

    fn service(store: &MemoryStore) -> DashboardService {
        DashboardService::new(Arc::new(store.clone()), DashboardConfig::default())
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[tokio::test]
    async fn test_today_and_yesterday_buckets() {
        let store = MemoryStore::new();
        let now = at(2024, 3, 10, 12, 0);
        for (id, score) in [("a", 1), ("b", 1), ("c", 0)] {
            store.add_review_at(id, "r@x.com", score, now - Duration::hours(2));
        }
        for (id, score) in [("d", 0), ("e", 1)] {
            store.add_review_at(id, "r@x.com", score, now - Duration::days(1));
        }

        let dashboard = service(&store).summary_at("r@x.com", now).await.unwrap();

        assert_eq!(dashboard.today, DayStatsDto { reviews: 3, likes: 2 });
        let yesterday = dashboard
            .historical
            .iter()
            .find(|d| d.date == NaiveDate::from_ymd_opt(2024, 3, 9).unwrap())
            .unwrap();
        assert_eq!((yesterday.reviews, yesterday.likes), (2, 1));
        assert_eq!(
            dashboard.historical[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[tokio::test]
    async fn test_day_boundary_follows_offset() {
        let store = MemoryStore::new();
        // 19:00 UTC is 00:30 the next day at +05:30
        store.add_review_at("a", "r@x.com", 1, at(2024, 3, 9, 19, 0));

        let dashboard = service(&store)
            .summary_at("r@x.com", at(2024, 3, 10, 1, 0))
            .await
            .unwrap();

        assert_eq!(dashboard.today, DayStatsDto { reviews: 1, likes: 1 });
    }

    #[tokio::test]
    async fn test_history_window_excludes_old_days() {
        let store = MemoryStore::new();
        let now = at(2024, 3, 20, 6, 0);
        store.add_review_at("a", "r@x.com", 1, now - Duration::days(9));
        store.add_review_at("b", "r@x.com", 1, now - Duration::days(10));
        store.add_review_at("c", "other@x.com", 1, now);

        let dashboard = service(&store).summary_at("r@x.com", now).await.unwrap();

        assert_eq!(dashboard.today, DayStatsDto::default());
        assert_eq!(dashboard.historical.len(), 1);
        assert_eq!(
            dashboard.historical[0].date,
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
        );
    }

    #[tokio::test]
    async fn test_oversized_history_window_is_an_error() {
        let store = MemoryStore::new();
        let config = DashboardConfig {
            history_days: 1_000_000_000_000_000,
            ..DashboardConfig::default()
        };
        let service = DashboardService::new(Arc::new(store.clone()), config);

        let result = service.summary_at("r@x.com", at(2024, 3, 20, 6, 0)).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
