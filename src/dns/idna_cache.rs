//! Short-hostname extraction, with a bounded LRU cache for the IDNA decode
//! step — the same Punycode label recurs across many hosts on a LAN scan.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use once_cell::sync::Lazy;

use crate::config::MAX_ADDRESSES;
use crate::dns::message::Reply;

static IDNA_CACHE: Lazy<Mutex<LruCache<String, String>>> =
    Lazy::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(MAX_ADDRESSES).expect("nonzero"))));

/// First answer label of a PTR reply, IDNA-decoded if it's a Punycode
/// (`xn--`) label. Decode failures silently fall back to the raw label, per
/// `SPEC_FULL.md` §4.1.
pub fn short_hostname(reply: &Reply) -> String {
    let first_label = reply.target.split('.').next().unwrap_or("");
    if !first_label.starts_with("xn--") {
        return first_label.to_string();
    }
    decode_idna_label(first_label)
}

fn decode_idna_label(label: &str) -> String {
    if let Some(cached) = IDNA_CACHE.lock().expect("idna cache poisoned").get(label) {
        return cached.clone();
    }
    let decoded = idna::punycode::decode_to_string(&label[4..]).unwrap_or_else(|| label.to_string());
    IDNA_CACHE
        .lock()
        .expect("idna cache poisoned")
        .put(label.to_string(), decoded.clone());
    decoded
}
