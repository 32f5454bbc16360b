use crate::CONFIG;
use std::env::var;

#[derive(Debug, Clone)]
pub struct Secrets {
    /// PEM text of the application private key, or a path to a PEM file
    pub nexmo_private_key: Option<String>,
    pub nexmo_app_id: Option<String>,
    pub nexmo_app_user_name: String,
    pub nexmo_from_number: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Builds the secrets from any key lookup. Empty values count as unset,
    /// and nothing here is fatal: handlers that need a missing secret
    /// answer with an error instead.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            nexmo_private_key: get("NEXMO_PRIVATE_KEY"),
            nexmo_app_id: get("NEXMO_APP_ID"),
            nexmo_app_user_name: get("NEXMO_APP_USER_NAME")
                .unwrap_or_else(|| CONFIG.settings.default_user_name.to_string()),
            nexmo_from_number: get("NEXMO_FROM_NUMBER"),
        }
    }

    /// Logs a warning for every secret that is not configured.
    pub fn warn_missing(&self) {
        if self.nexmo_private_key.is_none() {
            log::warn!("NEXMO_PRIVATE_KEY is not set, /no-auth will fail");
        }
        if self.nexmo_app_id.is_none() {
            log::warn!("NEXMO_APP_ID is not set, /no-auth will fail");
        }
        if self.nexmo_from_number.is_none() {
            log::warn!("NEXMO_FROM_NUMBER is not set, /answer will omit the caller id");
        }
    }
}

#[cfg(test)]
impl Secrets {
    pub fn fixture() -> Self {
        Self {
            nexmo_private_key: Some(include_str!("../testdata/private.pem").to_string()),
            nexmo_app_id: Some("aaaaaaaa-bbbb-cccc-dddd-0123456789ab".to_string()),
            nexmo_app_user_name: "jamie".to_string(),
            nexmo_from_number: Some("447520631555".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_secrets() {
        let secrets = Secrets::from_lookup(lookup(&[
            ("NEXMO_PRIVATE_KEY", "./private.key"),
            ("NEXMO_APP_ID", "app-123"),
            ("NEXMO_APP_USER_NAME", "alice"),
            ("NEXMO_FROM_NUMBER", "15550001111"),
        ]));

        assert_eq!(secrets.nexmo_private_key.as_deref(), Some("./private.key"));
        assert_eq!(secrets.nexmo_app_id.as_deref(), Some("app-123"));
        assert_eq!(secrets.nexmo_app_user_name, "alice");
        assert_eq!(secrets.nexmo_from_number.as_deref(), Some("15550001111"));
    }

    #[test]
    fn missing_secrets_are_not_fatal() {
        let secrets = Secrets::from_lookup(lookup(&[]));

        assert!(secrets.nexmo_private_key.is_none());
        assert!(secrets.nexmo_app_id.is_none());
        assert!(secrets.nexmo_from_number.is_none());
        assert_eq!(
            secrets.nexmo_app_user_name,
            CONFIG.settings.default_user_name
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let secrets = Secrets::from_lookup(lookup(&[
            ("NEXMO_APP_ID", ""),
            ("NEXMO_FROM_NUMBER", "   "),
        ]));

        assert!(secrets.nexmo_app_id.is_none());
        assert!(secrets.nexmo_from_number.is_none());
    }
}
