use crate::GlobalArgs;
use anyhow::{Context, Result};
use dojo_application::{TrainingClient, TrainingServices};
use dojo_core::identity::Identity;
use dojo_infrastructure::{ClientConfig, ConfigService, HttpTrainingService};
use std::sync::Arc;

/// Everything a command needs: loaded config and a ready client.
pub struct CommandContext {
    pub config_service: ConfigService,
    pub config: ClientConfig,
    pub client: TrainingClient,
}

impl CommandContext {
    /// Loads the config, applies command-line overrides and builds the client.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let config_service = ConfigService::new_default().context("Failed to locate config directory")?;
        let mut config = config_service
            .get_config()
            .with_context(|| format!("Failed to load {}", config_service.path().display()))?;
        if let Some(url) = &global.backend_url {
            config.backend_url = url.trim().to_string();
        }

        let identity = resolve_identity(&config, global.email.as_deref());
        let backend = HttpTrainingService::from_config(&config)
            .with_context(|| format!("Cannot use backend '{}'", config.backend_url))?;
        tracing::debug!(backend = %backend.base_url(), email = %identity.email, "Client configured");

        let client = TrainingClient::new(
            TrainingServices::from_shared(Arc::new(backend)),
            identity,
            config.leaderboard_period,
        );
        Ok(Self {
            config_service,
            config,
            client,
        })
    }

    /// Fails with a hint when no identity is configured.
    pub async fn require_identity(&self) -> Result<Identity> {
        let identity = self.client.identity().await;
        if identity.email.trim().is_empty() {
            anyhow::bail!(
                "No profile configured. Run `dojo profile --email <EMAIL> --name <NAME>` or pass --email."
            );
        }
        Ok(identity)
    }
}

/// Identity from the `[profile]` section, with `--email` taking precedence.
fn resolve_identity(config: &ClientConfig, email: Option<&str>) -> Identity {
    let configured = config.identity();
    match (configured, email.map(str::trim).filter(|e| !e.is_empty())) {
        (Some(identity), Some(email)) if identity.email == email => identity,
        (_, Some(email)) => Identity::seller(email, email),
        (Some(identity), None) => identity,
        (None, None) => Identity::seller("", ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_core::identity::Role;
    use dojo_infrastructure::ProfileConfig;

    fn config_with_profile() -> ClientConfig {
        ClientConfig {
            profile: Some(ProfileConfig {
                email: "boss@x.com".to_string(),
                display_name: "Bia".to_string(),
                team: Some("south".to_string()),
                role: Role::Manager,
            }),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn configured_profile_is_used_by_default() {
        let identity = resolve_identity(&config_with_profile(), None);
        assert_eq!(identity.email, "boss@x.com");
        assert!(identity.is_manager());
    }

    #[test]
    fn email_flag_overrides_profile() {
        let identity = resolve_identity(&config_with_profile(), Some("a@x.com"));
        assert_eq!(identity.email, "a@x.com");
        assert_eq!(identity.role, Role::Seller);
        assert_eq!(identity.team(), None);

        let same = resolve_identity(&config_with_profile(), Some("boss@x.com"));
        assert_eq!(same.display_name, "Bia");
    }

    #[test]
    fn no_profile_yields_blank_identity() {
        let identity = resolve_identity(&ClientConfig::default(), None);
        assert!(identity.email.is_empty());
    }
}
