// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

//! # Configuration
//!
//! Parsing of the managed application credential configuration file.

use chrono::TimeDelta;
use config::{File, FileFormat};
use eyre::{Report, WrapErr};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The renew threshold leaves no usable credential lifetime.
    #[error(
        "renew threshold ({renew_threshold}s) must be shorter than the openstack expiration period ({expiration_period}s)"
    )]
    RenewThresholdTooLong {
        /// Configured renew threshold in seconds.
        renew_threshold: u64,
        /// Configured expiration period in seconds.
        expiration_period: u64,
    },
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Managed application credential options.
    #[serde(default)]
    pub application_credential: ApplicationCredentialSection,

    /// Feature gates.
    #[serde(default)]
    pub feature_gates: FeatureGatesSection,
}

/// The configuration options for managed application credentials.
#[derive(Clone, Debug, Deserialize)]
pub struct ApplicationCredentialSection {
    /// The amount of time (in seconds) an application credential is used
    /// before it is renewed locally, independent of the expiration date
    /// announced to the identity service.
    #[serde(default = "default_lifetime")]
    pub lifetime: u64,

    /// The expiration time (in seconds, relative to creation) sent to the
    /// identity service when an application credential is created. The
    /// identity service refuses authentication with the credential beyond
    /// this point regardless of the local lifetime.
    #[serde(default = "default_expiration_period")]
    pub openstack_expiration_period: u64,

    /// When set, an application credential is renewed as soon as the
    /// current time passes its identity-service expiration date minus this
    /// threshold (in seconds). Must be shorter than
    /// `openstack_expiration_period`.
    #[serde(default)]
    pub renew_threshold: Option<u64>,
}

impl ApplicationCredentialSection {
    /// Check the invariants between the configured durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(renew_threshold) = self.renew_threshold
            && renew_threshold >= self.openstack_expiration_period
        {
            return Err(ConfigError::RenewThresholdTooLong {
                renew_threshold,
                expiration_period: self.openstack_expiration_period,
            });
        }
        Ok(())
    }

    pub fn lifetime(&self) -> TimeDelta {
        TimeDelta::seconds(self.lifetime as i64)
    }

    pub fn openstack_expiration_period(&self) -> TimeDelta {
        TimeDelta::seconds(self.openstack_expiration_period as i64)
    }

    pub fn renew_threshold(&self) -> Option<TimeDelta> {
        self.renew_threshold
            .map(|seconds| TimeDelta::seconds(seconds as i64))
    }
}

impl Default for ApplicationCredentialSection {
    fn default() -> Self {
        Self {
            lifetime: default_lifetime(),
            openstack_expiration_period: default_expiration_period(),
            renew_threshold: None,
        }
    }
}

/// Feature gates of the credential manager.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeatureGatesSection {
    /// Master switch for managing application credentials on behalf of the
    /// parent OpenStack user. When disabled the manager tears down any
    /// previously managed credential state and the caller keeps using its
    /// own credentials directly.
    #[serde(default)]
    pub managed_application_credential: bool,
}

fn default_lifetime() -> u64 {
    // 24h
    86400
}

fn default_expiration_period() -> u64 {
    // 48h
    172800
}

impl Config {
    pub fn new(path: PathBuf) -> Result<Self, Report> {
        let mut builder = config::Config::builder();

        if std::path::Path::new(&path).is_file() {
            builder = builder.add_source(File::from(path).format(FileFormat::Ini));
        }

        builder
            .build()
            .wrap_err("Failed to read configuration file")?
            .try_deserialize()
            .wrap_err("Failed to parse configuration file")
    }
}
