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

//! # Managed application credential lifecycle
//!
//! The manager owns all decision policy: on every reconcile it compares the
//! desired parent (from the caller's credentials) with the stored one (from
//! the persisted record), probes the identity service for the recorded
//! credential, and decides whether to keep, renew, rotate or tear down.
//! The collaborators it composes — [`Parent`], [`ApplicationCredential`],
//! the [`Store`](crate::store::Store) and the garbage collection sweep —
//! are value objects and capabilities without policy of their own.

pub mod appcredential;
mod delete;
mod ensure;
pub mod error;
pub mod gc;
pub mod parent;

use std::sync::Arc;

pub use appcredential::ApplicationCredential;
pub use error::ManagerError;
pub use gc::{GarbageCollectorError, run_garbage_collection};
pub use parent::Parent;

use crate::common::clock::Clock;
use crate::common::types::{AppCredentialAuth, RecordReference};
use crate::config::Config;
use crate::identity::IdentityClientFactory;
use crate::store::{ObjectStoreApi, RECORD_NAME, Store};

/// Lifecycle manager for the managed application credential of one tenant
/// namespace.
pub struct Manager {
    factory: Arc<dyn IdentityClientFactory>,
    store: Store,
    config: Config,
    namespace: String,
    shoot_name: String,
    clock: Arc<dyn Clock>,
}

impl Manager {
    /// Build a manager for the given namespace and shoot.
    ///
    /// The shoot name prefixes every credential the manager mints and
    /// scopes its garbage collection; the namespace locates the persisted
    /// record.
    pub fn new(
        config: &Config,
        factory: Arc<dyn IdentityClientFactory>,
        backend: Arc<dyn ObjectStoreApi>,
        namespace: &str,
        shoot_name: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ManagerError> {
        config.application_credential.validate()?;

        Ok(Self {
            factory,
            store: Store::new(backend, namespace),
            config: config.clone(),
            namespace: namespace.to_string(),
            shoot_name: shoot_name.to_string(),
            clock,
        })
    }

    fn record_reference(&self) -> RecordReference {
        RecordReference {
            name: RECORD_NAME.to_string(),
            namespace: self.namespace.clone(),
        }
    }
}

/// Return the credentials and the record reference for the in-use
/// application credential without consulting the identity service.
///
/// `None` means no managed application credential exists for the
/// namespace.
pub async fn get_credentials(
    backend: Arc<dyn ObjectStoreApi>,
    namespace: &str,
) -> Result<Option<AppCredentialAuth>, ManagerError> {
    let store = Store::new(backend, namespace);
    let Some((app_credential, parent)) = store.read().await? else {
        return Ok(None);
    };

    Ok(Some(AppCredentialAuth {
        credentials: app_credential.credentials(&parent),
        record_ref: RecordReference {
            name: RECORD_NAME.to_string(),
            namespace: namespace.to_string(),
        },
    }))
}
