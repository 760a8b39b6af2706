//! Footer newsletter sign-up. Unrelated to the booking flow apart from
//! sharing the email rule.

use crate::config::ValidationConfig;
use crate::effects::actions;
use crate::effects::NewsletterEndpoint;
use crate::error::ProviderError;
use crate::validation::{rules, Collector, Field, FieldErrors};
use stillwater::effect::Effect;
use stillwater::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NewsletterError {
    #[error("Newsletter form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),

    #[error("Subscription failed: {0}")]
    Provider(#[from] ProviderError),
}

/// Check the sign-up form, returning the normalised address.
pub fn validate_signup(
    email: &str,
    consent: bool,
    limits: &ValidationConfig,
) -> Result<String, FieldErrors> {
    let mut collector = Collector::default();
    let email = collector.take(Field::Email, rules::required_email(email, limits));
    collector.take(
        Field::NewsletterConsent,
        if consent {
            Ok(())
        } else {
            Err("Please agree to receive our newsletter".to_string())
        },
    );
    match (collector.finish(), email) {
        (Ok(()), Some(email)) => Ok(email),
        (verdict, _) => Err(verdict.err().unwrap_or_default()),
    }
}

/// Validate and send a newsletter sign-up. One attempt, no retry.
pub async fn subscribe<Env>(
    env: &Env,
    email: &str,
    consent: bool,
    limits: &ValidationConfig,
) -> Result<(), NewsletterError>
where
    Env: NewsletterEndpoint + Clone + Send + Sync + 'static,
{
    let email = validate_signup(email, consent, limits).map_err(NewsletterError::Invalid)?;
    match actions::subscribe_newsletter::<Env>(email, consent)
        .run(env)
        .await
    {
        Ok(()) => {
            info!("newsletter subscription accepted");
            Ok(())
        }
        Err(error) => {
            warn!(error = %error, "newsletter subscription failed");
            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::mock::MockEnv;

    #[test]
    fn signup_requires_email_and_consent() {
        let errors = validate_signup("", false, &ValidationConfig::default()).unwrap_err();

        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(
            errors.get(Field::NewsletterConsent),
            Some("Please agree to receive our newsletter")
        );
    }

    #[test]
    fn signup_normalises_email() {
        let email = validate_signup(" News@Example.org ", true, &ValidationConfig::default());
        assert_eq!(email, Ok("news@example.org".to_string()));
    }

    #[tokio::test]
    async fn subscribe_reaches_endpoint() {
        let env = MockEnv::new();

        subscribe(&env, "News@Example.org", true, &ValidationConfig::default())
            .await
            .unwrap();

        assert_eq!(env.subscribers(), vec!["news@example.org".to_string()]);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_endpoint() {
        let env = MockEnv::new();

        let err = subscribe(&env, "not-an-email", true, &ValidationConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, NewsletterError::Invalid(_)));
        assert!(env.subscribers().is_empty());
    }

    #[tokio::test]
    async fn duplicate_subscription_surfaces_provider_error() {
        let env = MockEnv::new();
        let limits = ValidationConfig::default();
        subscribe(&env, "a@b.co", true, &limits).await.unwrap();

        let err = subscribe(&env, "a@b.co", true, &limits).await.unwrap_err();
        assert_eq!(
            err,
            NewsletterError::Provider(ProviderError::new("This email is already subscribed"))
        );
    }
}
