use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::dashboard::models::{ActivityCounts, DailyActivity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayStatsDto {
    pub reviews: i64,
    /// Sum of scores, i.e. the number of likes
    pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoricalDayDto {
    /// Local calendar day, `YYYY-MM-DD`
    pub date: NaiveDate,
    pub reviews: i64,
    pub likes: i64,
}

/// Response DTO for `GET /api/dashboard`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardDto {
    pub today: DayStatsDto,
    /// Newest first
    pub historical: Vec<HistoricalDayDto>,
}

impl From<ActivityCounts> for DayStatsDto {
    fn from(c: ActivityCounts) -> Self {
        Self {
            reviews: c.reviews,
            likes: c.likes,
        }
    }
}

impl From<DailyActivity> for HistoricalDayDto {
    fn from(d: DailyActivity) -> Self {
        Self {
            date: d.date,
            reviews: d.reviews,
            likes: d.likes,
        }
    }
}
