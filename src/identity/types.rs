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
//! # Identity service port types
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::common::types::Credentials;
use crate::error::BuilderError;
use crate::identity::error::IdentityClientError;

/// The principal resolved for a credential bundle.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CallerUser {
    /// The ID of the principal.
    pub id: String,
}

/// An application credential as reported by the identity service.
///
/// The secret is not part of this representation; the identity service
/// returns it exactly once, in the create response.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize, Validate)]
#[builder(setter(strip_option, into))]
#[builder(build_fn(error = "BuilderError"))]
pub struct ApplicationCredential {
    /// The ID of the application credential.
    #[validate(length(max = 64))]
    pub id: String,

    /// The name of the application credential.
    #[validate(length(max = 255))]
    pub name: String,

    /// The description of the application credential.
    #[builder(default)]
    pub description: Option<String>,

    /// The expiration time of the application credential, if one was
    /// specified at creation.
    #[builder(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// The application credential object to be created.
#[derive(Builder, Clone, Debug, Deserialize, Validate)]
#[builder(setter(strip_option, into))]
#[builder(build_fn(error = "BuilderError"))]
pub struct ApplicationCredentialCreate {
    /// The name of the application credential.
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// The description of the application credential.
    #[builder(default)]
    pub description: Option<String>,

    /// The expiration time of the application credential. Sent to the
    /// identity service as an RFC3339 timestamp.
    pub expires_at: DateTime<Utc>,
}

/// The created application credential object.
#[derive(Builder, Clone, Debug, Deserialize, Validate)]
#[builder(setter(strip_option, into))]
#[builder(build_fn(error = "BuilderError"))]
pub struct ApplicationCredentialCreateResponse {
    /// The ID of the application credential.
    #[validate(length(max = 64))]
    pub id: String,

    /// The name of the application credential.
    #[validate(length(max = 255))]
    pub name: String,

    /// The secret the application credential was created with. This is
    /// only ever shown once, in the response to the create request. If it
    /// is lost, a new application credential must be created.
    pub secret: SecretString,
}

/// Identity service capability scoped to one credential bundle.
///
/// A client is constructed per principal through
/// [`IdentityClientFactory`]; every operation acts with that principal's
/// authorization.
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Resolve the principal the client authenticates as.
    async fn get_caller_user(&self) -> Result<CallerUser, IdentityClientError>;

    /// Create a new application credential owned by the given user.
    ///
    /// Name uniqueness is not enforced by the identity service; the caller
    /// controls naming.
    async fn create_application_credential<'a>(
        &self,
        owner_id: &'a str,
        rec: ApplicationCredentialCreate,
    ) -> Result<ApplicationCredentialCreateResponse, IdentityClientError>;

    /// Get a single application credential owned by the given user.
    async fn get_application_credential<'a>(
        &self,
        owner_id: &'a str,
        id: &'a str,
    ) -> Result<ApplicationCredential, IdentityClientError>;

    /// List the application credentials owned by the given user.
    async fn list_application_credentials<'a>(
        &self,
        owner_id: &'a str,
    ) -> Result<Vec<ApplicationCredential>, IdentityClientError>;

    /// Delete an application credential owned by the given user.
    ///
    /// Deleting an application credential that does not exist is an error
    /// of the [`NotFound`](IdentityClientError::NotFound) kind; callers
    /// that need idempotency treat it as success.
    async fn delete_application_credential<'a>(
        &self,
        owner_id: &'a str,
        id: &'a str,
    ) -> Result<(), IdentityClientError>;
}

/// Constructor capability for [`IdentityApi`] clients.
#[async_trait]
pub trait IdentityClientFactory: Send + Sync {
    /// Build an identity client authenticating with the given credential
    /// bundle.
    async fn new_identity_client<'a>(
        &self,
        credentials: &'a Credentials,
    ) -> Result<Arc<dyn IdentityApi>, IdentityClientError>;
}
