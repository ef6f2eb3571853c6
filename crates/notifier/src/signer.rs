use followsync_common::crypto::sign_data;
use url::form_urlencoded::byte_serialize;

/// Appends `timestamp` and `sign` query parameters to `base_url` using the
/// current time. An empty secret leaves the URL unsigned.
pub fn build_signed_url(base_url: &str, secret: &str) -> String {
    if secret.is_empty() {
        return base_url.to_string();
    }
    build_signed_url_at(base_url, secret, now_ms())
}

/// Signature is `urlencode(base64(HMAC-SHA256(key = secret, "{ts}\n{secret}")))`.
pub fn build_signed_url_at(base_url: &str, secret: &str, timestamp_ms: u64) -> String {
    if secret.is_empty() {
        return base_url.to_string();
    }
    let string_to_sign = format!("{timestamp_ms}\n{secret}");
    let sign = sign_data(secret.as_bytes(), string_to_sign.as_bytes());
    let encoded: String = byte_serialize(sign.as_bytes()).collect();

    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{sep}timestamp={timestamp_ms}&sign={encoded}")
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
