// =============================================================================
// FEED
// =============================================================================

/// Products handed to a reviewer per feed request
pub const DEFAULT_FEED_PAGE_SIZE: i64 = 300;

/// Upper bound accepted for FEED_PAGE_SIZE
pub const MAX_FEED_PAGE_SIZE: i64 = 1000;

// =============================================================================
// DASHBOARD
// =============================================================================

/// Asia/Kolkata (+05:30)
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Trailing window of the historical table, today included
pub const DEFAULT_HISTORY_DAYS: i64 = 10;

/// Upper bound accepted for DASHBOARD_HISTORY_DAYS
pub const MAX_HISTORY_DAYS: i64 = 366;

// =============================================================================
// PRODUCT IMAGES
// =============================================================================

/// Rendition stored for every scraped product (`<id>_1000.<ext>`)
pub const IMAGE_VARIANT: &str = "1000";

/// Probe order when looking up a product image
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpeg", ".jpg", ".webp", ".png"];
