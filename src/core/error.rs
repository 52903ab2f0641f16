use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("{unit} cannot use {weapon} for {capability} combat")]
    MissingCapability {
        unit: String,
        weapon: String,
        capability: &'static str,
    },

    #[error("{unit} has no ammunition left")]
    OutOfAmmunition { unit: String },

    #[error("Template has no weapons: {0}")]
    EmptyLoadout(String),

    #[error("Unknown unit template: {0}")]
    UnknownTemplate(String),

    #[error("Battle still undecided after {rounds} rounds")]
    RoundLimitExceeded { rounds: u32 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
