use std::str::FromStr;

use crate::error::Error;

/// Default port for broker endpoints given as a bare host name.
pub const DEFAULT_BROKER_PORT: u16 = 7447;

/// Validated broker connection settings shared by both binaries.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Broker host name, `host:port` pair, or full endpoint.
    pub host: String,

    /// Virtual host, `/` by default.
    pub vhost: String,

    /// Optional login credentials.
    pub credentials: Option<Credentials>,
}

impl BrokerConfig {
    /// Normalize the broker address into a connect endpoint.
    ///
    /// A value already carrying a transport scheme (`tcp/host:port`) is used
    /// as-is; a bare `host:port` gets the `tcp/` scheme; a bare host also
    /// gets the default port.
    pub fn endpoint(&self) -> String {
        if self.host.contains('/') {
            self.host.clone()
        } else if self.host.contains(':') {
            format!("tcp/{}", self.host)
        } else {
            format!("tcp/{}:{}", self.host, DEFAULT_BROKER_PORT)
        }
    }
}

/// Broker login credentials in `user:password` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl FromStr for Credentials {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((user, password)) if !user.is_empty() && !password.contains(':') => {
                Ok(Credentials {
                    user: user.to_string(),
                    password: password.to_string(),
                })
            }
            _ => Err(Error::Config(
                "credentials must be given as 'user:password'".to_string(),
            )),
        }
    }
}
