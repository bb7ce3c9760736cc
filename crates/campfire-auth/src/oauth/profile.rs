//! Provider-neutral profile types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use campfire_core::result::AppResult;

/// The subset of a provider profile used to link or provision a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Provider subject identifier.
    pub external_id: String,
    /// Full display name.
    pub display_name: String,
    /// Given name, when the provider supplies it.
    pub given_name: Option<String>,
    /// Family name, when the provider supplies it.
    pub family_name: Option<String>,
}

impl ProviderProfile {
    /// Given and family name, falling back to splitting the display name at
    /// the first run of whitespace.
    pub fn names(&self) -> (Option<String>, Option<String>) {
        if self.given_name.is_some() || self.family_name.is_some() {
            return (self.given_name.clone(), self.family_name.clone());
        }
        let display = self.display_name.trim();
        match display.split_once(char::is_whitespace) {
            Some((given, family)) => (
                Some(given.to_string()),
                Some(family.trim_start().to_string()).filter(|s| !s.is_empty()),
            ),
            None if display.is_empty() => (None, None),
            None => (Some(display.to_string()), None),
        }
    }
}

/// Resolves a provider access token to the profile it belongs to.
#[async_trait]
pub trait ProfileProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Provider name for logs.
    fn name(&self) -> &'static str;

    /// Validates `access_token` with the provider and returns its profile.
    ///
    /// A token the provider refuses is an authentication error; an
    /// unreachable provider is an external-service error.
    async fn fetch_profile(&self, access_token: &str) -> AppResult<ProviderProfile>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(display: &str, given: Option<&str>, family: Option<&str>) -> ProviderProfile {
        ProviderProfile {
            external_id: "fb-1".into(),
            display_name: display.into(),
            given_name: given.map(Into::into),
            family_name: family.map(Into::into),
        }
    }

    #[test]
    fn test_supplied_names_win() {
        let p = profile("Robert Jones", Some("Bob"), Some("Jones"));
        assert_eq!(p.names(), (Some("Bob".into()), Some("Jones".into())));
    }

    #[test]
    fn test_names_split_from_display_name() {
        assert_eq!(
            profile("Bob Jones", None, None).names(),
            (Some("Bob".into()), Some("Jones".into()))
        );
        assert_eq!(
            profile("Mary Ann  van Dyke", None, None).names(),
            (Some("Mary".into()), Some("Ann  van Dyke".into()))
        );
        assert_eq!(profile("Cher", None, None).names(), (Some("Cher".into()), None));
        assert_eq!(profile("  ", None, None).names(), (None, None));
    }
}
