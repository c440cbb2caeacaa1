use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingEnvVar(String),

    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidEnvVar { name: String, value: String },
}
