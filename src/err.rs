use std::{
    path::PathBuf,
    process::{ExitCode, Termination},
};

/// Errors that abort payload generation.
///
/// Processing is all-or-nothing, so every variant is fatal for the invocation and names
/// the input that triggered it.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid analysis record {path:?}: {message}")]
    Configuration { path: PathBuf, message: String },
    #[error("file name of {path:?} violates naming convention: {reason}")]
    NamingConvention { path: PathBuf, reason: String },
    #[error("unknown variant type {0:?}")]
    UnknownVariantType(String),
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("staging entry {link:?} already exists and does not point to {target:?}")]
    StagingCollision { link: PathBuf, target: PathBuf },
}

impl Error {
    /// Shortcut for wrapping an `std::io::Error` together with the offending path.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code for this kind of error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Configuration { .. } => 2,
            Error::NamingConvention { .. } | Error::UnknownVariantType(_) => 3,
            Error::Io { .. } | Error::StagingCollision { .. } => 4,
        }
    }
}

impl Termination for Error {
    fn report(self) -> ExitCode {
        ExitCode::from(self.exit_code())
    }
}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display_names_offending_input() {
        let err = Error::NamingConvention {
            path: "DO1.SP1.vcf.gz".into(),
            reason: "expected at least 8 dot-delimited fields, found 3".into(),
        };

        insta::assert_snapshot!(
            err.to_string(),
            @r###"file name of "DO1.SP1.vcf.gz" violates naming convention: expected at least 8 dot-delimited fields, found 3"###
        );
    }

    #[test]
    fn exit_codes_by_kind() {
        let config = Error::Configuration {
            path: "analysis.json".into(),
            message: "missing field `studyId`".into(),
        };
        let naming = Error::UnknownVariantType("cnv".into());
        let io = Error::io("missing.vcf.gz", std::io::ErrorKind::NotFound.into());

        assert_eq!(config.exit_code(), 2);
        assert_eq!(naming.exit_code(), 3);
        assert_eq!(io.exit_code(), 4);
    }
}
