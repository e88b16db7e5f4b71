use percent_encoding::percent_decode_str;
use std::fmt;
use std::path::PathBuf;
use url::Url;

use crate::constants;
use crate::errors::{Result, SnapshotError};

/// Where a snapshot is read from or written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Plain path on the local filesystem (no scheme)
    LocalFile(PathBuf),
    /// `s3://bucket/key`
    RemoteObject { bucket: String, key: String },
}

impl Destination {
    /// Resolve a CLI location. Anything that is not an absolute URL is a path.
    pub fn parse(location: &str) -> Result<Self> {
        if location.trim().is_empty() {
            return Err(SnapshotError::InvalidLocation {
                location: location.to_string(),
                reason: "location is empty".to_string(),
            });
        }

        let url = match Url::parse(location) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Ok(Destination::LocalFile(PathBuf::from(location)));
            }
            Err(e) => {
                return Err(SnapshotError::InvalidLocation {
                    location: location.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        match url.scheme() {
            constants::s3::SCHEME => Self::remote_from_url(location, &url),
            other => Err(SnapshotError::UnsupportedScheme {
                scheme: other.to_string(),
            }),
        }
    }

    fn remote_from_url(location: &str, url: &Url) -> Result<Self> {
        let invalid = |reason: &str| SnapshotError::InvalidLocation {
            location: location.to_string(),
            reason: reason.to_string(),
        };

        let bucket = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| invalid("missing bucket name"))?;

        let key = percent_decode_str(url.path())
            .decode_utf8()
            .map_err(|_| invalid("object path is not valid UTF-8"))?;
        let key = key.trim_start_matches('/');
        if key.is_empty() {
            return Err(invalid("missing object path"));
        }

        Ok(Destination::RemoteObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::LocalFile(path) => write!(f, "{}", path.display()),
            Destination::RemoteObject { bucket, key } => {
                write!(f, "{}://{}/{}", constants::s3::SCHEME, bucket, key)
            }
        }
    }
}
