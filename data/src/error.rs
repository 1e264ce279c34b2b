use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// The single error kind the data layer produces.
///
/// There is no validation and no conflict detection, so every failure is an
/// absence, keyed by the entity name ("Bill not found", "Doctor not found").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
}

impl ServiceError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}
