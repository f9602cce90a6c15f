mod chain;
pub use chain::ProvideCredentialChain;

mod config;
pub use config::ConfigCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod r#static;
pub use r#static::StaticCredentialProvider;
