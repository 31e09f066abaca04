use zenoh::Session;

use crate::config::BrokerConfig;
use crate::error::{Error, Result};

/// Connect to the message broker using the provided configuration.
///
/// The session runs in client mode against a single connect endpoint.
/// Credentials, when present, are passed as user/password transport auth.
pub async fn connect(config: &BrokerConfig) -> Result<Session> {
    let mut zenoh_config = zenoh::Config::default();

    zenoh_config
        .insert_json5("mode", "\"client\"")
        .map_err(|e| Error::Config(format!("Failed to set mode: {}", e)))?;

    let endpoints_json = serde_json::to_string(&[config.endpoint()])
        .map_err(|e| Error::Config(format!("Failed to serialize connect endpoint: {}", e)))?;

    zenoh_config
        .insert_json5("connect/endpoints", &endpoints_json)
        .map_err(|e| Error::Config(format!("Failed to set connect endpoint: {}", e)))?;

    if let Some(credentials) = &config.credentials {
        let user_json = serde_json::to_string(&credentials.user)
            .map_err(|e| Error::Config(format!("Failed to serialize user: {}", e)))?;
        let password_json = serde_json::to_string(&credentials.password)
            .map_err(|e| Error::Config(format!("Failed to serialize password: {}", e)))?;

        zenoh_config
            .insert_json5("transport/auth/usrpwd/user", &user_json)
            .map_err(|e| Error::Config(format!("Failed to set auth user: {}", e)))?;
        zenoh_config
            .insert_json5("transport/auth/usrpwd/password", &password_json)
            .map_err(|e| Error::Config(format!("Failed to set auth password: {}", e)))?;
    }

    tracing::info!(
        endpoint = %config.endpoint(),
        vhost = %config.vhost,
        authenticated = config.credentials.is_some(),
        "Connecting to broker"
    );

    let session = zenoh::open(zenoh_config).await?;

    tracing::info!(zid = %session.zid(), "Connected to broker");

    Ok(session)
}
