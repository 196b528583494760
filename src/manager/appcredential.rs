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
//! # Managed application credential
use chrono::{DateTime, Utc};
use rand::{Rng, rng};
use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::common::clock::Clock;
use crate::common::types::Credentials;
use crate::config::ApplicationCredentialSection;
use crate::identity::error::IdentityClientError;
use crate::identity::types::ApplicationCredentialCreateBuilder;
use crate::manager::parent::Parent;

const NAME_SUFFIX_LENGTH: usize = 8;

/// A managed application credential: the one credential this crate mints,
/// tracks and rotates for a tenant namespace.
#[derive(Clone, Debug)]
pub struct ApplicationCredential {
    id: String,
    name: String,
    secret: SecretString,
    creation_time: DateTime<Utc>,
}

impl ApplicationCredential {
    /// Mint a new application credential owned by the given parent.
    ///
    /// The credential is named `<shoot_name>-<name_suffix>` so garbage
    /// collection can recognize it later, and the identity service is told
    /// to expire it `openstack_expiration_period` after now. The same
    /// instant is recorded as the creation time that all expiration
    /// decisions are derived from.
    pub async fn new(
        parent: &Parent,
        shoot_name: &str,
        name_suffix: &str,
        clock: &dyn Clock,
        config: &ApplicationCredentialSection,
    ) -> Result<Self, IdentityClientError> {
        let creation_time = clock.now();

        let rec = ApplicationCredentialCreateBuilder::default()
            .name(format!("{shoot_name}-{name_suffix}"))
            .description(format!(
                "Gardener managed application credential, shoot={shoot_name}"
            ))
            .expires_at(creation_time + config.openstack_expiration_period())
            .build()?;
        rec.validate()?;

        let response = parent
            .client()
            .create_application_credential(parent.id(), rec)
            .await?;

        Ok(Self {
            id: response.id,
            name: response.name,
            secret: response.secret,
            creation_time,
        })
    }

    /// Reconstruct the credential from persisted parts.
    pub(crate) fn from_parts(
        id: String,
        name: String,
        secret: SecretString,
        creation_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            secret,
            creation_time,
        }
    }

    /// The ID of the application credential.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The name of the application credential.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The secret of the application credential.
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// The creation time of the application credential.
    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// Whether the credential is due for renewal.
    ///
    /// True once the local lifetime has passed, or once now reaches the
    /// identity-service expiration minus the renew threshold — whichever
    /// fires first. The second bound guards against handing out a
    /// credential that the identity service will reject mid-use.
    pub fn is_expired(&self, clock: &dyn Clock, config: &ApplicationCredentialSection) -> bool {
        let now = clock.now();

        if now >= self.creation_time + config.lifetime() {
            return true;
        }

        if let Some(renew_threshold) = config.renew_threshold() {
            let openstack_expiration_time =
                self.creation_time + config.openstack_expiration_period();
            if now >= openstack_expiration_time - renew_threshold {
                return true;
            }
        }

        false
    }

    /// The credential bundle consumers authenticate with: application
    /// credential fields from self, auth context inherited from the
    /// parent.
    pub fn credentials(&self, parent: &Parent) -> Credentials {
        let parent_credentials = parent.credentials();
        Credentials {
            application_credential_id: self.id.clone(),
            application_credential_name: self.name.clone(),
            application_credential_secret: self.secret.expose_secret().into(),

            auth_url: parent_credentials.auth_url.clone(),
            domain_name: parent_credentials.domain_name.clone(),
            tenant_name: parent_credentials.tenant_name.clone(),
            ..Credentials::default()
        }
    }
}

/// Generate the random alphanumeric suffix that makes a fresh credential
/// name unique under the shoot prefix.
pub fn generate_name_suffix() -> String {
    rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(NAME_SUFFIX_LENGTH)
        .map(char::from)
        .collect()
}
