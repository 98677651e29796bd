//! Byte-level JSON response cache for the provider API.
//!
//! This is transport plumbing, not caching policy: responses younger than the
//! freshness window are served directly, older entries are revalidated with a
//! conditional GET so the provider's rate budget is spent on changed data.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, ETAG, IF_NONE_MATCH};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "fixturedesk";
const CACHE_FILE: &str = "provider_cache.json";
const DEFAULT_FRESH_SECS: u64 = 300;

static CACHE: Mutex<Option<CacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheFile {
    version: u32,
    entries: HashMap<String, CachedResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedResponse {
    body: String,
    etag: Option<String>,
    fetched_at: u64,
}

/// Fetch `url`, serving a fresh cached body when available. `auth` is sent as
/// a bearer token and never becomes part of the cache key.
pub fn fetch_json_cached(client: &Client, url: &str, auth: Option<&str>) -> Result<String> {
    let cached = {
        let mut guard = CACHE.lock().expect("provider cache lock poisoned");
        let cache = guard.get_or_insert_with(load_cache_file);
        cache.entries.get(url).cloned()
    };

    if let Some(entry) = cached.as_ref() {
        if now_secs().saturating_sub(entry.fetched_at) < fresh_window_secs() {
            return Ok(entry.body.clone());
        }
    }

    let mut req = client.get(url);
    if let Some(token) = auth {
        req = req.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(etag) = cached.as_ref().and_then(|entry| entry.etag.as_deref()) {
        req = req.header(IF_NONE_MATCH, etag);
    }

    let resp = req.send().context("request failed")?;
    let status = resp.status();

    if status == StatusCode::NOT_MODIFIED {
        if let Some(mut entry) = cached {
            entry.fetched_at = now_secs();
            let body = entry.body.clone();
            store_entry(url, entry);
            return Ok(body);
        }
        return Err(anyhow::anyhow!("received 304 without a cached body"));
    }

    let etag = resp
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let snippet: String = body.trim().chars().take(200).collect();
        return Err(anyhow::anyhow!("http {status}: {snippet}"));
    }

    store_entry(
        url,
        CachedResponse {
            body: body.clone(),
            etag,
            fetched_at: now_secs(),
        },
    );
    Ok(body)
}

fn store_entry(url: &str, entry: CachedResponse) {
    let mut guard = CACHE.lock().expect("provider cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache_file);
    cache.version = CACHE_VERSION;
    cache.entries.insert(url.to_string(), entry);
    let _ = save_cache_file(cache);
}

fn fresh_window_secs() -> u64 {
    std::env::var("PROVIDER_CACHE_TTL_SECS")
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRESH_SECS)
}

fn load_cache_file() -> CacheFile {
    let Some(path) = cache_path() else {
        return CacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return CacheFile::default();
    };
    let cache = serde_json::from_str::<CacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return CacheFile::default();
    }
    cache
}

fn save_cache_file(cache: &CacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize provider cache")?;
    fs::write(&tmp, json).context("write provider cache")?;
    fs::rename(&tmp, &path).context("swap provider cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
