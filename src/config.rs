use std::path::PathBuf;

use chrono::Duration;

/// Environment variable holding the public origin used to build share links.
pub const ORIGIN_ENV: &str = "CHOREPACK_ORIGIN";
/// Environment variable holding the DuckDB database file path.
pub const DATABASE_ENV: &str = "CHOREPACK_DATABASE";

/// Path segment between the origin and the pack token in a share link.
pub const OPEN_PATH: &str = "/open/";

/// Random bytes per pack token (96 bits, rendered as 24 hex characters).
pub const TOKEN_BYTES: usize = 12;

pub const DATABASE_FILE: &str = "chorepack.duckdb";

/// How long a pack stays openable after it is created.
pub fn pack_ttl() -> Duration {
    Duration::days(7)
}

/// Build the shareable link for a pack token.
///
/// Trailing slashes on `origin` are ignored, so `https://a.b/` and
/// `https://a.b` produce the same link.
pub fn share_link(origin: &str, token: &str) -> String {
    format!("{}{}{}", origin.trim_end_matches('/'), OPEN_PATH, token)
}

pub fn default_database_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("chorepack").join(DATABASE_FILE)
    } else {
        PathBuf::from(".chorepack").join(DATABASE_FILE)
    }
}

pub(crate) fn schema_sql() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS cards (
        id            VARCHAR PRIMARY KEY,
        title         VARCHAR NOT NULL,
        rarity        VARCHAR NOT NULL,
        flavour_text  VARCHAR NOT NULL DEFAULT '',
        time_estimate VARCHAR,
        frequency     VARCHAR,
        image_url     VARCHAR,
        created_at    BIGINT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS packs (
        token      VARCHAR PRIMARY KEY,
        card_ids   VARCHAR NOT NULL,
        created_at BIGINT NOT NULL,
        expires_at BIGINT NOT NULL
    );
    "#
}
