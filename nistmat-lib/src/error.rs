use std::fmt;

#[derive(Debug)]
pub enum NistMatError {
    UnknownElement(String),
    IsotopeDataUnavailable(String),
    MissingBaseSubstance(String),
    DuplicateMaterialName(String),
    UnexportedMaterial(String),
    InvalidComposition { material: String, reason: String },
    InvalidFormula(String),
    DataError(String),
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, NistMatError>;

impl fmt::Display for NistMatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement(e) => write!(f, "unknown element: {e}"),
            Self::IsotopeDataUnavailable(e) => {
                write!(f, "no isotope data available for element '{e}'")
            }
            Self::MissingBaseSubstance(name) => write!(f, "missing base substance: {name}"),
            Self::DuplicateMaterialName(name) => write!(f, "duplicate material name: {name}"),
            Self::UnexportedMaterial(name) => {
                write!(f, "registered material '{name}' is missing from the export list")
            }
            Self::InvalidComposition { material, reason } => {
                write!(f, "invalid composition for '{material}': {reason}")
            }
            Self::InvalidFormula(formula) => write!(f, "invalid chemical formula: {formula}"),
            Self::DataError(msg) => write!(f, "data error: {msg}"),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for NistMatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NistMatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
