use core::fmt;

/// Plot and capture information encoded in a photo's file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoMetadata {
    pub plot: String,
    pub subplot: String,
    pub date: String,
    pub exposure: String,
    /// Manual or auto focus; absent on older naming schemes.
    pub focus: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    TooFewFields { found: usize },
    TooManyFields { found: usize },
    EmptyField { field: &'static str },
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found } => {
                write!(f, "expected at least 5 dot-separated fields, found {found}")
            }
            Self::TooManyFields { found } => {
                write!(f, "expected at most 6 dot-separated fields, found {found}")
            }
            Self::EmptyField { field } => write!(f, "{field} field is empty"),
        }
    }
}

impl std::error::Error for MetadataError {}

const FIELD_NAMES: [&str; 5] = ["plot", "subplot", "date", "exposure", "focus"];

impl PhotoMetadata {
    /// Parses `Plot.Subplot.Date.Exposure[.Focus].ext`.
    ///
    /// The last component is always the extension. Any directory prefix is
    /// ignored.
    pub fn parse(file_name: &str) -> Result<Self, MetadataError> {
        let base = file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(file_name);
        let parts: Vec<&str> = base.split('.').collect();

        if parts.len() < 5 {
            return Err(MetadataError::TooFewFields { found: parts.len() });
        }
        if parts.len() > 6 {
            return Err(MetadataError::TooManyFields { found: parts.len() });
        }

        let fields = &parts[..parts.len() - 1];
        for (value, field) in fields.iter().zip(FIELD_NAMES) {
            if value.is_empty() {
                return Err(MetadataError::EmptyField { field });
            }
        }

        Ok(Self {
            plot: fields[0].to_owned(),
            subplot: fields[1].to_owned(),
            date: fields[2].to_owned(),
            exposure: fields[3].to_owned(),
            focus: fields.get(4).map(|s| (*s).to_owned()),
        })
    }
}
