use std::time::Duration;

pub const BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const SEARCH_PATH: &str = "search";
pub const REVERSE_PATH: &str = "reverse";

pub const USER_AGENT: &str = concat!(
    "geocoder/",
    env!("CARGO_PKG_VERSION"),
    " (urban planning dashboard location search)"
);

pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const CACHE_MAX_SIZE: usize = 100;

pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(1000);
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(8000);
pub const MAX_RETRIES: u32 = 2;
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(1000);

pub const SEARCH_LIMIT: u32 = 5;
pub const REVERSE_ZOOM: u8 = 18;

pub const MIN_QUERY_CHARS: usize = 2;
pub const COORDINATE_DECIMALS: i32 = 4;
