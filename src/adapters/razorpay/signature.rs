//! Razorpay checkout signatures.
//!
//! Checkout returns `hex(HMAC-SHA256(key_secret, "{order_id}|{payment_id}"))`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex signature for an order/payment pair.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time comparison of `provided` against the expected signature.
pub fn signature_matches(secret: &str, order_id: &str, payment_id: &str, provided: &str) -> bool {
    let Some(expected) = payment_signature(secret, order_id, payment_id) else {
        return false;
    };
    let provided = provided.trim().to_ascii_lowercase();
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_lowercase_hex_sha256() {
        let sig = payment_signature("secret", "order_1", "pay_1").unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn matching_signature_is_accepted() {
        let sig = payment_signature("secret", "order_1", "pay_1").unwrap();
        assert!(signature_matches("secret", "order_1", "pay_1", &sig));
        assert!(signature_matches("secret", "order_1", "pay_1", &sig.to_uppercase()));
    }

    #[test]
    fn signature_binds_both_ids() {
        let sig = payment_signature("secret", "order_1", "pay_1").unwrap();
        assert!(!signature_matches("secret", "order_2", "pay_1", &sig));
        assert!(!signature_matches("secret", "order_1", "pay_2", &sig));
        assert!(!signature_matches("other", "order_1", "pay_1", &sig));
    }

    #[test]
    fn separator_is_part_of_the_message() {
        let joined = payment_signature("secret", "order_1", "pay_1").unwrap();
        let shifted = payment_signature("secret", "order_1|", "pay_1").unwrap();
        assert_ne!(joined, shifted);
    }

    #[test]
    fn garbage_signature_is_rejected() {
        assert!(!signature_matches("secret", "order_1", "pay_1", "not-hex"));
        assert!(!signature_matches("secret", "order_1", "pay_1", ""));
    }
}
