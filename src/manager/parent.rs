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
//! # Parent principal
use secrecy::ExposeSecret;
use std::sync::Arc;

use crate::common::types::Credentials;
use crate::identity::{IdentityApi, IdentityClientError, IdentityClientFactory};
use crate::store::{Record, keys};

/// The OpenStack principal owning a managed application credential.
///
/// A parent is either the desired one, built from the caller's credential
/// bundle, or the stored one, reconstructed from the persisted record (and
/// therefore possibly stale). [`init`](Parent::init) resolves and caches
/// the principal's id; reading [`id`](Parent::id) or
/// [`client`](Parent::client) before that is a programmer error and
/// panics, so stale-data paths can never silently act on a zero id.
pub struct Parent {
    credentials: Credentials,
    id: Option<String>,
    identity_client: Option<Arc<dyn IdentityApi>>,
}

impl Parent {
    /// A parent denoted by the given credential bundle. The principal id
    /// is unresolved until [`init`](Parent::init).
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            credentials: credentials.clone(),
            id: None,
            identity_client: None,
        }
    }

    /// The parent recorded at the moment the in-use credential was minted.
    ///
    /// Records written before the parent fields were introduced yield
    /// empty strings for the missing keys.
    pub fn from_record(record: &Record) -> Self {
        let credentials = Credentials {
            username: record.read_key(keys::PARENT_NAME),
            password: record.read_key(keys::PARENT_SECRET).into(),
            domain_name: record.read_key(keys::DOMAIN_NAME),
            tenant_name: record.read_key(keys::TENANT_NAME),
            auth_url: record.read_key(keys::AUTH_URL),
            ..Credentials::default()
        };

        Self {
            credentials,
            id: Some(record.read_key(keys::PARENT_ID)),
            identity_client: None,
        }
    }

    /// Resolve the principal by constructing an identity client for the
    /// credentials and asking the identity service who the caller is.
    ///
    /// Calling `init` again on an initialized parent re-resolves to the
    /// same principal and is therefore idempotent.
    pub async fn init(
        &mut self,
        factory: &dyn IdentityClientFactory,
    ) -> Result<(), IdentityClientError> {
        let identity_client = factory.new_identity_client(&self.credentials).await?;
        let caller = identity_client.get_caller_user().await?;

        self.id = Some(caller.id);
        self.identity_client = Some(identity_client);
        Ok(())
    }

    /// The resolved principal id.
    ///
    /// # Panics
    ///
    /// Panics if the parent has not been initialized.
    pub fn id(&self) -> &str {
        self.id.as_deref().expect("parent user is not initialized")
    }

    /// The identity client of the principal.
    ///
    /// # Panics
    ///
    /// Panics if the parent has not been initialized.
    pub fn client(&self) -> Arc<dyn IdentityApi> {
        self.identity_client
            .clone()
            .expect("parent user is not initialized")
    }

    /// The credential bundle the parent was built from.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether both parents denote the same principal. The password is
    /// excluded: a password rotation does not change the principal.
    pub fn is_equal(&self, other: &Parent) -> bool {
        self.credentials.auth_url == other.credentials.auth_url
            && self.credentials.domain_name == other.credentials.domain_name
            && self.credentials.tenant_name == other.credentials.tenant_name
            && self.credentials.username == other.credentials.username
            && self.credentials.application_credential_id
                == other.credentials.application_credential_id
            && self.credentials.application_credential_name
                == other.credentials.application_credential_name
    }

    /// Whether both parents carry the same password.
    pub fn have_equal_secrets(&self, other: &Parent) -> bool {
        self.credentials.password.expose_secret()
            == other.credentials.password.expose_secret()
    }

    /// Whether the parent is itself an application credential. Such a
    /// principal cannot own further application credentials.
    pub fn is_application_credential(&self) -> bool {
        self.credentials.is_application_credential()
    }
}
