use std::collections::HashMap;

use aws_sdk_dynamodb::config::Builder;
use serde::{Deserialize, Serialize};

/// The service identifier used to look up the DynamoDB override.
pub const DYNAMODB_SERVICE_ID: &str = "DynamoDB";

/// A resolved service endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// The URL requests are sent to.
    pub url: String,
    /// The AWS partition of the endpoint. Always `aws`.
    pub partition_id: String,
    /// The service name used when signing requests.
    pub signing_name: String,
    /// The region used when signing requests.
    pub signing_region: String,
}

/// No override exists for `service`. The client should fall back to its
/// default endpoint resolution.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("no endpoint override for service {service}")]
pub struct EndpointNotFound {
    /// The service that was looked up.
    pub service: String,
}

/// A client configuration builder that endpoint overrides can be applied to.
pub trait EndpointConfig: Sized {
    /// Returns this builder with requests sent to `url`.
    #[must_use]
    fn with_endpoint_url(self, url: String) -> Self;
}

impl EndpointConfig for Builder {
    fn with_endpoint_url(self, url: String) -> Self {
        self.endpoint_url(url)
    }
}

/// Endpoint URLs to use in place of the default AWS endpoints, keyed by
/// service identifier.
///
/// This is primarily useful for pointing a client at a local emulator such as
/// DynamoDB Local:
///
/// ```rust
/// use sortstamp_dynamodb::endpoint::{EndpointOverrides, DYNAMODB_SERVICE_ID};
///
/// let overrides =
///     EndpointOverrides::default().with_override(DYNAMODB_SERVICE_ID, "http://localhost:8000");
/// let endpoint = overrides
///     .resolve(DYNAMODB_SERVICE_ID, "ap-southeast-2")
///     .unwrap();
/// assert_eq!(endpoint.url, "http://localhost:8000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use]
pub struct EndpointOverrides {
    overrides: HashMap<String, String>,
}

impl EndpointOverrides {
    /// Overrides the endpoint of `service` with `url`, and returns self.
    pub fn with_override(mut self, service: impl Into<String>, url: impl Into<String>) -> Self {
        self.overrides.insert(service.into(), url.into());
        self
    }

    /// Returns the configured override for `service`.
    ///
    /// Overrides that are empty or contain only whitespace are treated as
    /// absent.
    #[cfg_attr(feature = "tracing", tracing::instrument)]
    pub fn resolve(&self, service: &str, region: &str) -> Result<Endpoint, EndpointNotFound> {
        match self.overrides.get(service).map(|url| url.trim()) {
            Some(url) if !url.is_empty() => Ok(Endpoint {
                url: url.to_string(),
                partition_id: String::from("aws"),
                signing_name: service.to_string(),
                signing_region: region.to_string(),
            }),
            _ => Err(EndpointNotFound {
                service: service.to_string(),
            }),
        }
    }

    /// Applies the DynamoDB override, if any, to `builder`, usually an
    /// `aws_sdk_dynamodb::config::Builder`. Without an override, `builder` is
    /// returned unchanged.
    pub fn configure<B: EndpointConfig>(&self, builder: B, region: &str) -> B {
        match self.resolve(DYNAMODB_SERVICE_ID, region) {
            Ok(endpoint) => {
                log::debug!(
                    "overriding {DYNAMODB_SERVICE_ID} endpoint in {region}: {}",
                    endpoint.url
                );
                builder.with_endpoint_url(endpoint.url)
            }
            Err(err) => {
                log::debug!("{err}, using default resolution");
                builder
            }
        }
    }
}

impl<S, U> FromIterator<(S, U)> for EndpointOverrides
where
    S: Into<String>,
    U: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (S, U)>>(iter: T) -> Self {
        Self {
            overrides: iter
                .into_iter()
                .map(|(service, url)| (service.into(), url.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for EndpointOverrides {
    fn from(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_overridden_endpoint() {
        let overrides =
            EndpointOverrides::from_iter([(DYNAMODB_SERVICE_ID, "http://localhost:8000")]);
        assert_eq!(
            overrides.resolve(DYNAMODB_SERVICE_ID, "ap-southeast-2"),
            Ok(Endpoint {
                url: String::from("http://localhost:8000"),
                partition_id: String::from("aws"),
                signing_name: String::from(DYNAMODB_SERVICE_ID),
                signing_region: String::from("ap-southeast-2"),
            })
        );
    }

    #[test]
    fn missing_override_is_not_found() {
        let overrides = EndpointOverrides::default();
        assert_eq!(
            overrides.resolve(DYNAMODB_SERVICE_ID, "ap-southeast-2"),
            Err(EndpointNotFound {
                service: String::from(DYNAMODB_SERVICE_ID)
            })
        );
    }

    #[test]
    fn whitespace_is_trimmed() {
        let overrides = EndpointOverrides::default()
            .with_override(DYNAMODB_SERVICE_ID, "  http://localhost:8000\n")
            .with_override("S3", " \t ");
        let endpoint = overrides
            .resolve(DYNAMODB_SERVICE_ID, "us-east-1")
            .unwrap();
        assert_eq!(endpoint.url, "http://localhost:8000");
        assert!(overrides.resolve("S3", "us-east-1").is_err());
    }

    #[test]
    fn other_services_are_independent() {
        let overrides = EndpointOverrides::from(HashMap::from([(
            String::from("S3"),
            String::from("http://localhost:9000"),
        )]));
        assert!(overrides.resolve(DYNAMODB_SERVICE_ID, "us-east-1").is_err());
        assert_eq!(
            overrides.resolve("S3", "us-east-1").unwrap().signing_name,
            "S3"
        );
    }

    #[derive(Debug, Default, PartialEq)]
    struct RecordingConfig {
        endpoint_url: Option<String>,
    }

    impl EndpointConfig for RecordingConfig {
        fn with_endpoint_url(self, url: String) -> Self {
            Self {
                endpoint_url: Some(url),
            }
        }
    }

    #[test]
    fn configure_applies_override() {
        let overrides = EndpointOverrides::default()
            .with_override(DYNAMODB_SERVICE_ID, " http://localhost:8000 ")
            .with_override("S3", "http://localhost:9000");
        let config = overrides.configure(RecordingConfig::default(), "us-east-1");
        assert_eq!(
            config.endpoint_url.as_deref(),
            Some("http://localhost:8000")
        );
    }

    #[test]
    fn configure_without_override_is_unchanged() {
        let overrides = EndpointOverrides::default().with_override("S3", "http://localhost:9000");
        let config = overrides.configure(RecordingConfig::default(), "us-east-1");
        assert_eq!(config, RecordingConfig::default());

        let blank = EndpointOverrides::default().with_override(DYNAMODB_SERVICE_ID, "  ");
        let config = blank.configure(RecordingConfig::default(), "us-east-1");
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn configure_accepts_sdk_builder() {
        let overrides =
            EndpointOverrides::default().with_override(DYNAMODB_SERVICE_ID, "http://localhost:8000");
        let _config: aws_sdk_dynamodb::Config =
            overrides.configure(Builder::new(), "us-east-1").build();
    }
}
