use tessel_world::RegionError;

/// Why a path request produced no path. Only `OutOfBounds` marks a caller
/// bug; the others are ordinary negative answers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathError {
    OutOfBounds(RegionError),
    Unreachable,
    SearchLimit { visited: usize },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::OutOfBounds(e) => write!(f, "path endpoint rejected: {}", e),
            PathError::Unreachable => write!(f, "goal is unreachable"),
            PathError::SearchLimit { visited } => {
                write!(f, "search abandoned after {} nodes", visited)
            }
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::OutOfBounds(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegionError> for PathError {
    fn from(e: RegionError) -> Self {
        PathError::OutOfBounds(e)
    }
}
