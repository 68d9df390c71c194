use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read templates file '{path}'")]
    ReadTemplates {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse templates file '{path}'")]
    ParseTemplates {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read text from stdin")]
    ReadStdin(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_read_templates_names_path_and_keeps_source() {
        let err = Error::ReadTemplates {
            path: PathBuf::from("plans/templates.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to read templates file 'plans/templates.json'"
        );
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }

    #[test]
    fn test_parse_templates_keeps_json_source() {
        let source = serde_json::from_str::<Vec<u32>>("[").unwrap_err();
        let err = Error::ParseTemplates {
            path: PathBuf::from("t.json"),
            source,
        };
        assert!(err.to_string().contains("t.json"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_read_stdin_keeps_source() {
        let err = Error::ReadStdin(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.to_string(), "Failed to read text from stdin");
        assert_eq!(err.source().unwrap().to_string(), "closed");
    }
}
