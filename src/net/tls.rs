//! TLS policy mapping.

use crate::config::TlsVersion;

/// Minimum TLS version as understood by the HTTP client.
pub fn min_version(version: TlsVersion) -> reqwest::tls::Version {
    match version {
        TlsVersion::Tls12 => reqwest::tls::Version::TLS_1_2,
        TlsVersion::Tls13 => reqwest::tls::Version::TLS_1_3,
    }
}
