//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, rpc::RpcConfig, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub rpc: RpcConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let rpc = RpcConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            postgres,
            server,
            rpc,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_port_and_database_url() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/catalog")),
                ("PORT", None),
            ],
            || assert!(Config::from_env().is_err()),
        );

        temp_env::with_vars(
            [
                ("DATABASE_URL", None),
                ("PORT", Some("3000")),
            ],
            || assert!(Config::from_env().is_err()),
        );
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/catalog")),
                ("PORT", Some("3003")),
                ("RPC_SUBJECT_PREFIX", Some("catalog")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 3003);
                assert_eq!(config.postgres.url(), "postgresql://localhost/catalog");
                assert_eq!(config.rpc.subject_prefix, "catalog");
                assert_eq!(config.app.name, "products_api");
            },
        );
    }
}
