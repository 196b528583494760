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
use tracing::warn;

use crate::common::types::{AppCredentialAuth, Credentials};
use crate::manager::appcredential::{ApplicationCredential, generate_name_suffix};
use crate::manager::gc::run_garbage_collection;
use crate::manager::parent::Parent;
use crate::manager::{Manager, ManagerError};

impl Manager {
    /// Ensure the managed application credential of the shoot.
    ///
    /// Returns the credential bundle to authenticate with and a reference
    /// to the persisted record, or `None` when the caller should keep
    /// using its own credentials directly (feature gate disabled, or the
    /// caller's credentials are themselves an application credential).
    #[tracing::instrument(
        level = "info",
        skip(self, credentials),
        fields(namespace = %self.namespace, shoot = %self.shoot_name)
    )]
    pub async fn ensure(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<AppCredentialAuth>, ManagerError> {
        let mut desired = Parent::from_credentials(credentials);
        desired.init(self.factory.as_ref()).await?;

        // The in-use app credential and its parent user, if any.
        let mut in_use = self.store.read().await?;

        let mut app_credential_exists = false;
        let mut parent_changed = false;
        let mut old_parent_usable = false;

        if let Some((app_credential, stored)) = in_use.as_mut() {
            if stored.is_equal(&desired) {
                if !stored.have_equal_secrets(&desired) {
                    self.store.update_parent_secret(&desired).await?;
                }
            } else {
                parent_changed = true;
            }

            match stored.init(self.factory.as_ref()).await {
                Ok(()) => {
                    old_parent_usable = true;

                    match stored
                        .client()
                        .get_application_credential(stored.id(), app_credential.id())
                        .await
                    {
                        Err(error) if error.is_not_found() => {}
                        _ => app_credential_exists = true,
                    }
                }
                Err(error) => {
                    warn!(%error, "stored parent user is not usable, skipping sweep under it");
                }
            }

            if old_parent_usable {
                // A changed parent means the stored credential is about to
                // be replaced and must not be pinned.
                let pinned_id = (!parent_changed).then_some(app_credential.id());
                run_garbage_collection(stored, pinned_id, &self.shoot_name).await?;
            }
        }

        // Abort in case the feature is disabled or the desired parent is
        // itself an application credential.
        if desired.is_application_credential()
            || !self.config.feature_gates.managed_application_credential
        {
            self.store.delete().await?;
            return Ok(None);
        }

        // Keep the in-use credential only while it verifiably exists, its
        // parent is unchanged and it is not due for renewal; mint a new one
        // otherwise.
        let app_credential = match in_use {
            Some((app_credential, _))
                if app_credential_exists
                    && !parent_changed
                    && !app_credential
                        .is_expired(self.clock.as_ref(), &self.config.application_credential) =>
            {
                app_credential
            }
            in_use => {
                let name_suffix = generate_name_suffix();
                let new_app_credential = ApplicationCredential::new(
                    &desired,
                    &self.shoot_name,
                    &name_suffix,
                    self.clock.as_ref(),
                    &self.config.application_credential,
                )
                .await?;

                if parent_changed
                    && old_parent_usable
                    && let Some((old_app_credential, stored)) = in_use.as_ref()
                {
                    run_garbage_collection(
                        stored,
                        Some(old_app_credential.id()),
                        &self.shoot_name,
                    )
                    .await?;
                }

                new_app_credential
            }
        };

        // The pin is known now; everything else under the desired parent
        // carrying the shoot prefix is an orphan.
        run_garbage_collection(&desired, Some(app_credential.id()), &self.shoot_name).await?;

        self.store.store(&app_credential, &desired).await?;

        Ok(Some(AppCredentialAuth {
            credentials: app_credential.credentials(&desired),
            record_ref: self.record_reference(),
        }))
    }
}
