use core::fmt;

/// Invalid fisheye geometry for a given image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    EmptyImage {
        width: usize,
        height: usize,
    },
    NonPositiveRadius {
        radius: f64,
    },
    CenterOutOfBounds {
        center_x: f64,
        center_y: f64,
        width: usize,
        height: usize,
    },
    /// Every sample of `ring` fell outside the image under a skipping border policy.
    RingOutsideImage {
        ring: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage { width, height } => {
                write!(f, "image has no pixels ({width}x{height})")
            }
            Self::NonPositiveRadius { radius } => {
                write!(f, "fisheye radius must be positive, got {radius}")
            }
            Self::CenterOutOfBounds {
                center_x,
                center_y,
                width,
                height,
            } => write!(
                f,
                "fisheye center ({center_x}, {center_y}) lies outside the {width}x{height} image"
            ),
            Self::RingOutsideImage { ring } => {
                write!(f, "ring {ring} has no samples inside the image")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Malformed gap-fraction profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileError {
    WrongLength { expected: usize, actual: usize },
    OutOfRange { ring: usize, value: f64 },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { expected, actual } => {
                write!(f, "profile length mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfRange { ring, value } => {
                write!(f, "gap fraction {value} on ring {ring} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ProfileError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    Geometry(GeometryError),
    Profile(ProfileError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(e) => write!(f, "geometry error: {e}"),
            Self::Profile(e) => write!(f, "degenerate profile: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::Profile(e) => Some(e),
        }
    }
}

impl From<GeometryError> for Error {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

impl From<ProfileError> for Error {
    fn from(e: ProfileError) -> Self {
        Self::Profile(e)
    }
}
