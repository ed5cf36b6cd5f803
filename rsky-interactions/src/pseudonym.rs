use sha2::{Digest, Sha256};

/// Maps raw user identifiers to stable opaque aliases.
///
/// The alias is the lowercase hex SHA-256 of the identifier followed by the
/// configured salt, so the same salt yields the same alias across restarts.
#[derive(Clone)]
pub struct Pseudonymizer {
    salt: String,
}

impl Pseudonymizer {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    pub fn alias(&self, raw_user_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw_user_id.as_bytes());
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl std::fmt::Debug for Pseudonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pseudonymizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_HASH_SALT;

    #[test]
    fn alias_is_salted_sha256_hex() {
        let pseudonymizer = Pseudonymizer::new(DEFAULT_USER_HASH_SALT);
        assert_eq!(
            pseudonymizer.alias("alice"),
            "ca73e0bcecb5a8af49937469741568dc43a6dd419f0010396722da2331955ab6"
        );
        assert_eq!(
            pseudonymizer.alias("bob"),
            "ea5bc2d355019a4ce3a981831563d742cb914e856f9c51681d41612af0d19e60"
        );
    }

    #[test]
    fn alias_is_deterministic() {
        let first = Pseudonymizer::new("pepper");
        let second = Pseudonymizer::new("pepper");
        assert_eq!(first.alias("alice"), first.alias("alice"));
        assert_eq!(first.alias("alice"), second.alias("alice"));
        assert_eq!(first.alias("alice").len(), 64);
    }

    #[test]
    fn alias_depends_on_identifier_and_salt() {
        let pepper = Pseudonymizer::new("pepper");
        let default = Pseudonymizer::new(DEFAULT_USER_HASH_SALT);
        assert_ne!(pepper.alias("alice"), pepper.alias("bob"));
        assert_ne!(pepper.alias("alice"), default.alias("alice"));
        assert_eq!(
            pepper.alias("alice"),
            "ce463bda1f16f7677143cb3f780c961ffd9d5c1546de788e0047e17e4d6adc45"
        );
    }

    #[test]
    fn debug_hides_salt() {
        let rendered = format!("{:?}", Pseudonymizer::new("very-secret-salt"));
        assert!(!rendered.contains("very-secret-salt"));
    }
}
