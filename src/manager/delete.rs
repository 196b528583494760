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

use crate::common::types::Credentials;
use crate::manager::gc::run_garbage_collection;
use crate::manager::parent::Parent;
use crate::manager::{Manager, ManagerError};

impl Manager {
    /// Delete the managed application credential of the shoot.
    ///
    /// Sweeps under the desired parent unconditionally — during teardown
    /// nothing is in use — and additionally under the stored parent when
    /// that one is still usable. The stored parent may be gone or re-keyed
    /// on the identity service; failing to reach it does not block the
    /// teardown.
    #[tracing::instrument(
        level = "info",
        skip(self, credentials),
        fields(namespace = %self.namespace, shoot = %self.shoot_name)
    )]
    pub async fn delete(&self, credentials: &Credentials) -> Result<(), ManagerError> {
        let mut desired = Parent::from_credentials(credentials);
        desired.init(self.factory.as_ref()).await?;

        run_garbage_collection(&desired, None, &self.shoot_name).await?;

        let Some((_, mut stored)) = self.store.read().await? else {
            return Ok(self.store.delete().await?);
        };

        // Follow a password rotation so a later read can still reconstruct
        // the effective parent.
        if stored.is_equal(&desired) && !stored.have_equal_secrets(&desired) {
            self.store.update_parent_secret(&desired).await?;
        }

        match stored.init(self.factory.as_ref()).await {
            Ok(()) => run_garbage_collection(&stored, None, &self.shoot_name).await?,
            Err(error) => {
                warn!(
                    %error,
                    "could not clean up application credentials, stored parent user is not usable"
                );
            }
        }

        Ok(self.store.delete().await?)
    }
}
