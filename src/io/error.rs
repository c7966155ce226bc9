use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse DSSP data: {details} (at line ~{line})")]
    Parse { line: usize, details: String },

    #[error("no residue table header ('  #  RESIDUE') found in DSSP input")]
    MissingHeader,
}

impl Error {
    pub fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display_carries_line() {
        let e = Error::parse(42, "invalid x coordinate");
        assert_eq!(
            e.to_string(),
            "failed to parse DSSP data: invalid x coordinate (at line ~42)"
        );
    }

    #[test]
    fn io_errors_convert() {
        let e: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(e, Error::Io { .. }));
    }
}
