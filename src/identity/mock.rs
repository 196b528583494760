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

use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;

use crate::common::types::Credentials;
use crate::identity::error::IdentityClientError;
use crate::identity::types::{
    ApplicationCredential, ApplicationCredentialCreate, ApplicationCredentialCreateResponse,
    CallerUser, IdentityApi, IdentityClientFactory,
};

mock! {
    pub IdentityClient {}

    #[async_trait]
    impl IdentityApi for IdentityClient {
        async fn get_caller_user(&self) -> Result<CallerUser, IdentityClientError>;

        async fn create_application_credential<'a>(
            &self,
            owner_id: &'a str,
            rec: ApplicationCredentialCreate,
        ) -> Result<ApplicationCredentialCreateResponse, IdentityClientError>;

        async fn get_application_credential<'a>(
            &self,
            owner_id: &'a str,
            id: &'a str,
        ) -> Result<ApplicationCredential, IdentityClientError>;

        async fn list_application_credentials<'a>(
            &self,
            owner_id: &'a str,
        ) -> Result<Vec<ApplicationCredential>, IdentityClientError>;

        async fn delete_application_credential<'a>(
            &self,
            owner_id: &'a str,
            id: &'a str,
        ) -> Result<(), IdentityClientError>;
    }
}

mock! {
    pub IdentityClientFactory {}

    #[async_trait]
    impl IdentityClientFactory for IdentityClientFactory {
        async fn new_identity_client<'a>(
            &self,
            credentials: &'a Credentials,
        ) -> Result<Arc<dyn IdentityApi>, IdentityClientError>;
    }
}
