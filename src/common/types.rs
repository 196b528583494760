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

//! # Common types
use derive_builder::Builder;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use validator::Validate;

use crate::error::BuilderError;

/// An OpenStack credential bundle.
///
/// Carries the auth context (`auth_url`, `domain_name`, `tenant_name`) and
/// either a user principal (`username` + `password`) or an
/// application-credential principal (`application_credential_id`,
/// `application_credential_name`, `application_credential_secret`). The two
/// principal shapes are mutually exclusive on input.
#[derive(Builder, Clone, Debug, Deserialize, Validate)]
#[builder(setter(into), default)]
#[builder(build_fn(error = "BuilderError"))]
pub struct Credentials {
    /// Keystone endpoint the principal authenticates against.
    pub auth_url: String,

    /// Name of the domain the principal belongs to.
    #[validate(length(max = 64))]
    pub domain_name: String,

    /// Name of the project (tenant) the principal is scoped to.
    #[validate(length(max = 64))]
    pub tenant_name: String,

    /// Username of a user principal. Empty for an application-credential
    /// principal.
    #[validate(length(max = 255))]
    pub username: String,

    /// Password of a user principal.
    pub password: SecretString,

    /// ID of an application-credential principal.
    #[validate(length(max = 64))]
    pub application_credential_id: String,

    /// Name of an application-credential principal.
    #[validate(length(max = 255))]
    pub application_credential_name: String,

    /// Secret of an application-credential principal.
    pub application_credential_secret: SecretString,
}

impl Credentials {
    /// Whether the bundle denotes an application-credential principal.
    pub fn is_application_credential(&self) -> bool {
        !self.application_credential_id.is_empty()
            || !self.application_credential_name.is_empty()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            auth_url: String::new(),
            domain_name: String::new(),
            tenant_name: String::new(),
            username: String::new(),
            password: SecretString::from(String::new()),
            application_credential_id: String::new(),
            application_credential_name: String::new(),
            application_credential_secret: SecretString::from(String::new()),
        }
    }
}

impl PartialEq for Credentials {
    fn eq(&self, other: &Self) -> bool {
        self.auth_url == other.auth_url
            && self.domain_name == other.domain_name
            && self.tenant_name == other.tenant_name
            && self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
            && self.application_credential_id == other.application_credential_id
            && self.application_credential_name == other.application_credential_name
            && self.application_credential_secret.expose_secret()
                == other.application_credential_secret.expose_secret()
    }
}

impl Eq for Credentials {}

/// Reference to the persisted record holding the in-use application
/// credential.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordReference {
    /// Well-known name of the record.
    pub name: String,
    /// Tenant namespace the record lives in.
    pub namespace: String,
}

/// Auth information about a managed application credential.
#[derive(Clone, Debug)]
pub struct AppCredentialAuth {
    /// The credential bundle of the managed application credential.
    pub credentials: Credentials,
    /// Reference to the record that holds the credential information.
    pub record_ref: RecordReference,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_application_credential() {
        let sot = Credentials::default();
        assert!(!sot.is_application_credential());

        let sot = CredentialsBuilder::default()
            .username("user")
            .password("secret")
            .build()
            .unwrap();
        assert!(!sot.is_application_credential());

        let sot = CredentialsBuilder::default()
            .application_credential_id("app-id")
            .build()
            .unwrap();
        assert!(sot.is_application_credential());

        let sot = CredentialsBuilder::default()
            .application_credential_name("app-name")
            .build()
            .unwrap();
        assert!(sot.is_application_credential());
    }

    #[test]
    fn test_equality_covers_secrets() {
        let left = CredentialsBuilder::default()
            .username("user")
            .password("secret")
            .build()
            .unwrap();
        let mut right = left.clone();
        assert_eq!(left, right);

        right.password = SecretString::from("other".to_string());
        assert_ne!(left, right);
    }
}
