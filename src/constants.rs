pub mod provider {
    use std::time::Duration;

    pub const DEFAULT_BASE_URL: &str = "https://districts.ecourts.gov.in";

    pub const DEFAULT_COURT_CODE: &str = "DL01";

    pub const DEFAULT_COURT_NAME: &str = "Delhi District Court";

    pub const SEARCH_PATH: &str = "/services/ecourts_services/ecourtindia_v6/";

    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);
}

pub mod store {
    /// Text form shared with SQLite's `CURRENT_TIMESTAMP`.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub const MOCK_RAW_RESPONSE: &str = "Mock response";

    pub const EMPTY_PARSED_DATA: &str = "{}";
}

pub mod limits {

    pub const DEFAULT_RECENT_LIMIT: u64 = 10;

    pub const MAX_LIST_LIMIT: u64 = 100;
}

pub mod session {
    use std::time::Duration;

    pub const LAST_SEARCH_KEY: &str = "last_search";

    pub const KEY_SALT: &[u8] = b"courtcase-session-signing";

    pub const INACTIVITY_MINUTES: i64 = 60;

    pub const PURGE_INTERVAL: Duration = Duration::from_secs(600);
}
