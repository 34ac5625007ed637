use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate {kind} plugin \"{name}\"")]
    DuplicateName { kind: &'static str, name: String },
}

impl Error {
    #[must_use]
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
