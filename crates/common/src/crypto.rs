use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Raw HMAC-SHA256 digest of `data` keyed by `secret`.
pub fn hmac_sha256(secret: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(data);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// HMAC-SHA256 of `data`, encoded as padded standard base64.
pub fn sign_data(secret: &[u8], data: &[u8]) -> String {
    STANDARD.encode(hmac_sha256(secret, data))
}

pub fn verify_signature(secret: &[u8], data: &[u8], signature_b64: &str) -> bool {
    let Ok(sig_bytes) = STANDARD.decode(signature_b64) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(data);
    mac.verify_slice(&sig_bytes).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_sign_verify() {
        let secret = b"SECtest";
        let data = b"1600000000000\nSECtest";
        let sig = sign_data(secret, data);
        assert!(verify_signature(secret, data, &sig));
    }

    #[test]
    fn wrong_signature_rejected() {
        assert!(!verify_signature(b"secret", b"data", "bad-base64!"));
        assert!(!verify_signature(
            b"secret",
            b"data",
            &STANDARD.encode(b"wrong")
        ));
    }

    #[test]
    fn known_vector() {
        let sig = sign_data(b"key", b"The quick brown fox jumps over the lazy dog");
        assert_eq!(sig, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
    }

    #[test]
    fn timestamp_secret_vector() {
        let sig = sign_data(b"S", b"1700000000000\nS");
        assert_eq!(sig, "1MQOO0c3gn9bi6PFoJOVxNJxZSKlorSUJa0EKM6BEbs=");
    }

    #[test]
    fn digest_is_32_bytes() {
        assert_eq!(hmac_sha256(b"k", b"").len(), 32);
    }
}
