use chrono::NaiveDate;
use sqlx::FromRow;

/// Review and like totals for one reviewer over one local day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct ActivityCounts {
    pub reviews: i64,
    pub likes: i64,
}

/// Totals for one local day
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub reviews: i64,
    pub likes: i64,
}
