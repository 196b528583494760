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
//! # Garbage collection
use thiserror::Error;
use tracing::info;

use crate::identity::IdentityClientError;
use crate::manager::parent::Parent;

/// Garbage collection error.
#[derive(Debug, Error)]
pub enum GarbageCollectorError {
    /// Listing the owner's application credentials failed; nothing was
    /// deleted.
    #[error(transparent)]
    List {
        /// The source of the error.
        #[from]
        source: IdentityClientError,
    },

    /// One or more deletions failed. The sweep attempted every candidate;
    /// the survivors are picked up by the next reconcile.
    #[error("could not delete application credentials: {}", .failures.join("; "))]
    Aggregate {
        /// One message per failed deletion.
        failures: Vec<String>,
    },
}

/// Remove managed application credentials belonging to the given parent.
///
/// Only credentials whose name starts with `<shoot_name>-` are candidates;
/// the prefix is what bounds the blast radius to this shoot. The in-use
/// credential is exempted by passing its id as `pinned_id`.
pub async fn run_garbage_collection(
    parent: &Parent,
    pinned_id: Option<&str>,
    shoot_name: &str,
) -> Result<(), GarbageCollectorError> {
    let owner_id = parent.id();
    let client = parent.client();
    let prefix = format!("{shoot_name}-");

    let app_credentials = client.list_application_credentials(owner_id).await?;

    let mut failures = Vec::new();
    for app_credential in app_credentials {
        // Ignore application credentials not belonging to the shoot.
        if !app_credential.name.starts_with(&prefix) {
            continue;
        }

        // Skip the in-use application credential.
        if pinned_id == Some(app_credential.id.as_str()) {
            continue;
        }

        match client
            .delete_application_credential(owner_id, &app_credential.id)
            .await
        {
            Ok(()) => {
                info!(
                    id = %app_credential.id,
                    owner = %owner_id,
                    "deleted orphaned application credential"
                );
            }
            // Someone else already removed it.
            Err(error) if error.is_not_found() => {}
            Err(error) => failures.push(format!(
                "could not delete application credential {:?} owned by user {:?}: {error}",
                app_credential.id, owner_id
            )),
        }
    }

    if !failures.is_empty() {
        return Err(GarbageCollectorError::Aggregate { failures });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::common::types::Credentials;
    use crate::identity::types::{ApplicationCredentialBuilder, CallerUser};
    use crate::identity::{MockIdentityClient, MockIdentityClientFactory};

    const PARENT_ID: &str = "parent-id";
    const SHOOT_NAME: &str = "shoot--it";

    async fn initialized_parent(mut identity_client: MockIdentityClient) -> Parent {
        identity_client.expect_get_caller_user().returning(|| {
            Ok(CallerUser {
                id: PARENT_ID.into(),
            })
        });
        let identity_client: Arc<dyn crate::identity::IdentityApi> = Arc::new(identity_client);

        let mut factory = MockIdentityClientFactory::default();
        factory
            .expect_new_identity_client()
            .returning(move |_| Ok(identity_client.clone()));

        let mut parent = Parent::from_credentials(&Credentials::default());
        parent.init(&factory).await.expect("init should succeed");
        parent
    }

    fn listed(entries: &[(&str, &str)]) -> Vec<crate::identity::types::ApplicationCredential> {
        entries
            .iter()
            .map(|(id, name)| {
                ApplicationCredentialBuilder::default()
                    .id(*id)
                    .name(*name)
                    .build()
                    .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_deletes_matching_credentials() {
        let mut identity_client = MockIdentityClient::default();
        identity_client
            .expect_list_application_credentials()
            .withf(|owner_id: &str| owner_id == PARENT_ID)
            .returning(|_| Ok(listed(&[("app-id-1", "shoot--it-abcd1234")])));
        identity_client
            .expect_delete_application_credential()
            .withf(|owner_id: &str, id: &str| owner_id == PARENT_ID && id == "app-id-1")
            .times(1)
            .returning(|_, _| Ok(()));

        let parent = initialized_parent(identity_client).await;
        run_garbage_collection(&parent, None, SHOOT_NAME)
            .await
            .expect("sweep should succeed");
    }

    #[tokio::test]
    async fn test_skips_pinned_credential() {
        let mut identity_client = MockIdentityClient::default();
        identity_client
            .expect_list_application_credentials()
            .returning(|_| Ok(listed(&[("app-id-1", "shoot--it-abcd1234")])));

        let parent = initialized_parent(identity_client).await;
        run_garbage_collection(&parent, Some("app-id-1"), SHOOT_NAME)
            .await
            .expect("sweep should succeed");
    }

    #[tokio::test]
    async fn test_skips_foreign_names() {
        let mut identity_client = MockIdentityClient::default();
        identity_client.expect_list_application_credentials().returning(|_| {
            Ok(listed(&[
                ("app-id-1", "not-matching-app-1"),
                // The prefix must include the separator: a shoot named
                // "shoot--it" does not own "shoot--it2"'s credentials.
                ("app-id-2", "shoot--it2-abcd1234"),
            ]))
        });

        let parent = initialized_parent(identity_client).await;
        run_garbage_collection(&parent, None, SHOOT_NAME)
            .await
            .expect("sweep should succeed");
    }

    #[tokio::test]
    async fn test_one_failure_does_not_short_circuit() {
        let mut identity_client = MockIdentityClient::default();
        identity_client.expect_list_application_credentials().returning(|_| {
            Ok(listed(&[
                ("app-id-1", "shoot--it-abcd1234"),
                ("app-id-2", "shoot--it-app-2"),
            ]))
        });
        identity_client
            .expect_delete_application_credential()
            .withf(|_, id: &str| id == "app-id-1")
            .times(1)
            .returning(|_, _| Err(IdentityClientError::Transient("boom".into())));
        identity_client
            .expect_delete_application_credential()
            .withf(|_, id: &str| id == "app-id-2")
            .times(1)
            .returning(|_, _| Ok(()));

        let parent = initialized_parent(identity_client).await;
        let error = run_garbage_collection(&parent, None, SHOOT_NAME)
            .await
            .expect_err("sweep should report the failed deletion");
        assert!(matches!(
            error,
            GarbageCollectorError::Aggregate { ref failures } if failures.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_is_success() {
        let mut identity_client = MockIdentityClient::default();
        identity_client
            .expect_list_application_credentials()
            .returning(|_| Ok(listed(&[("app-id-1", "shoot--it-abcd1234")])));
        identity_client
            .expect_delete_application_credential()
            .returning(|_, id| Err(IdentityClientError::NotFound(id.to_string())));

        let parent = initialized_parent(identity_client).await;
        run_garbage_collection(&parent, None, SHOOT_NAME)
            .await
            .expect("sweep should succeed");
    }
}
