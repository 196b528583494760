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

//! # Side-state store
//!
//! One record per tenant namespace holds the identity of the in-use
//! application credential and the identifying fields of its parent at the
//! moment the credential was minted. The record is the manager's only
//! durable state; everything else is re-derived from the identity service
//! on each reconcile.
//!
//! The record layout is part of the external contract — out-of-band
//! consumers (see [`manager::get_credentials`](crate::manager::get_credentials))
//! read it by key.

pub mod backend;
pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

use chrono::{DateTime, SecondsFormat, Utc};
use secrecy::ExposeSecret;
use std::sync::Arc;

pub use backend::ObjectStoreApi;
pub use error::StoreError;
#[cfg(test)]
pub use mock::MockObjectStore;
pub use types::Record;

use crate::manager::{ApplicationCredential, Parent};

/// Name of the record that holds the application credential information.
pub const RECORD_NAME: &str = "cloudprovider-application-credential";

/// Finalizer attached to the record while a managed credential is in use.
pub const FINALIZER: &str = "extensions.gardener.cloud/managed-application-credential";

/// Recognized data keys of the record.
pub mod keys {
    pub const APPLICATION_CREDENTIAL_ID: &str = "applicationCredentialID";
    pub const APPLICATION_CREDENTIAL_NAME: &str = "applicationCredentialName";
    pub const APPLICATION_CREDENTIAL_SECRET: &str = "applicationCredentialSecret";
    pub const CREATION_TIME: &str = "creationTime";
    pub const PARENT_ID: &str = "parentID";
    pub const PARENT_NAME: &str = "parentName";
    pub const PARENT_SECRET: &str = "parentSecret";
    pub const DOMAIN_NAME: &str = "domainName";
    pub const TENANT_NAME: &str = "tenantName";
    pub const AUTH_URL: &str = "authURL";
}

/// Durable side-state for one tenant namespace.
pub struct Store {
    backend: Arc<dyn ObjectStoreApi>,
    namespace: String,
}

impl Store {
    pub fn new(backend: Arc<dyn ObjectStoreApi>, namespace: &str) -> Self {
        Self {
            backend,
            namespace: namespace.to_string(),
        }
    }

    /// Read the in-use application credential and its parent, if a record
    /// exists.
    ///
    /// A record whose creation time does not parse as RFC3339 is a hard
    /// error rather than a silent renewal trigger.
    pub async fn read(
        &self,
    ) -> Result<Option<(ApplicationCredential, Parent)>, StoreError> {
        let record = match self.backend.get(&self.namespace, RECORD_NAME).await {
            Ok(record) => record,
            Err(error) if error.is_not_found() => return Ok(None),
            Err(error) => return Err(error),
        };

        let raw_creation_time = record.read_key(keys::CREATION_TIME);
        let creation_time = DateTime::parse_from_rfc3339(&raw_creation_time)
            .map_err(|source| StoreError::InvalidCreationTime {
                value: raw_creation_time,
                source,
            })?
            .with_timezone(&Utc);

        let app_credential = ApplicationCredential::from_parts(
            record.read_key(keys::APPLICATION_CREDENTIAL_ID),
            record.read_key(keys::APPLICATION_CREDENTIAL_NAME),
            record.read_key(keys::APPLICATION_CREDENTIAL_SECRET).into(),
            creation_time,
        );

        Ok(Some((app_credential, Parent::from_record(&record))))
    }

    /// Persist the application credential information, overwriting any
    /// previous record. Attempts an update first and creates the record
    /// when none exists yet.
    pub async fn store(
        &self,
        app_credential: &ApplicationCredential,
        parent: &Parent,
    ) -> Result<(), StoreError> {
        let credentials = parent.credentials();
        let mut record = Record {
            name: RECORD_NAME.to_string(),
            namespace: self.namespace.clone(),
            finalizers: vec![FINALIZER.to_string()],
            ..Record::default()
        };

        record.set_key(keys::APPLICATION_CREDENTIAL_ID, app_credential.id());
        record.set_key(keys::APPLICATION_CREDENTIAL_NAME, app_credential.name());
        record.set_key(
            keys::APPLICATION_CREDENTIAL_SECRET,
            app_credential.secret().expose_secret(),
        );
        record.set_key(
            keys::CREATION_TIME,
            &app_credential
                .creation_time()
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        // Parent user data.
        record.set_key(keys::PARENT_ID, parent.id());
        record.set_key(keys::PARENT_NAME, &credentials.username);
        record.set_key(keys::PARENT_SECRET, credentials.password.expose_secret());
        record.set_key(keys::DOMAIN_NAME, &credentials.domain_name);
        record.set_key(keys::TENANT_NAME, &credentials.tenant_name);
        record.set_key(keys::AUTH_URL, &credentials.auth_url);

        match self.backend.update(&record).await {
            Err(error) if error.is_not_found() => self.backend.create(&record).await,
            other => other,
        }
    }

    /// Patch the stored parent secret to follow a password rotation of an
    /// unchanged parent without re-minting the credential.
    pub async fn update_parent_secret(&self, parent: &Parent) -> Result<(), StoreError> {
        let mut record = self.backend.get(&self.namespace, RECORD_NAME).await?;
        record.set_key(
            keys::PARENT_SECRET,
            parent.credentials().password.expose_secret(),
        );
        self.backend.patch(&record).await
    }

    /// Delete the record. The finalizer is stripped by a patch before the
    /// delete; a record that is absent at any step counts as deleted.
    pub async fn delete(&self) -> Result<(), StoreError> {
        let mut record = match self.backend.get(&self.namespace, RECORD_NAME).await {
            Ok(record) => record,
            Err(error) if error.is_not_found() => return Ok(()),
            Err(error) => return Err(error),
        };

        record.finalizers.clear();
        match self.backend.patch(&record).await {
            Err(error) if !error.is_not_found() => return Err(error),
            _ => {}
        }

        match self.backend.delete(&self.namespace, RECORD_NAME).await {
            Err(error) if !error.is_not_found() => Err(error),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_with_data(namespace: &str, entries: &[(&str, &str)]) -> Record {
        let mut record = Record {
            name: RECORD_NAME.to_string(),
            namespace: namespace.to_string(),
            ..Record::default()
        };
        for (key, value) in entries {
            record.set_key(key, value);
        }
        record
    }

    #[tokio::test]
    async fn test_read() {
        let namespace = "shoot--it";
        let record = record_with_data(
            namespace,
            &[
                (keys::CREATION_TIME, "2009-11-10T23:00:00Z"),
                (keys::APPLICATION_CREDENTIAL_ID, "app-credential-id"),
                (keys::APPLICATION_CREDENTIAL_NAME, "app-credential-name"),
                (keys::APPLICATION_CREDENTIAL_SECRET, "app-credential-secret"),
                (keys::PARENT_ID, "parent-id"),
            ],
        );

        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .withf(move |ns: &str, name: &str| ns == "shoot--it" && name == RECORD_NAME)
            .returning(move |_, _| Ok(record.clone()));

        let store = Store::new(Arc::new(backend), namespace);
        let (app_credential, parent) = store
            .read()
            .await
            .expect("read should succeed")
            .expect("a record exists");

        assert_eq!("app-credential-id", app_credential.id());
        assert_eq!("app-credential-name", app_credential.name());
        assert_eq!(
            Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap(),
            app_credential.creation_time()
        );
        assert_eq!("parent-id", parent.id());
    }

    #[tokio::test]
    async fn test_read_invalid_creation_time() {
        let namespace = "shoot--it";
        let record =
            record_with_data(namespace, &[(keys::CREATION_TIME, "invalid-date-format")]);

        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .returning(move |_, _| Ok(record.clone()));

        let store = Store::new(Arc::new(backend), namespace);
        assert!(matches!(
            store.read().await,
            Err(StoreError::InvalidCreationTime { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_no_record() {
        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .returning(|_, name| Err(StoreError::NotFound(name.to_string())));

        let store = Store::new(Arc::new(backend), "shoot--it");
        assert!(store.read().await.expect("read should succeed").is_none());
    }

    #[tokio::test]
    async fn test_store_updates_existing_record() {
        let namespace = "shoot--it";
        let parent = Parent::from_record(&record_with_data(
            namespace,
            &[(keys::PARENT_ID, "parent-id")],
        ));
        let app_credential = ApplicationCredential::from_parts(
            "app-id".to_string(),
            "shoot--it-abcd1234".to_string(),
            "app-secret".into(),
            Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap(),
        );

        let mut backend = MockObjectStore::default();
        backend
            .expect_update()
            .withf(|record: &Record| {
                record.finalizers == [FINALIZER.to_string()]
                    && record.read_key(keys::APPLICATION_CREDENTIAL_ID) == "app-id"
                    && record.read_key(keys::PARENT_ID) == "parent-id"
                    && record.read_key(keys::CREATION_TIME) == "2009-11-10T23:00:00Z"
            })
            .returning(|_| Ok(()));

        let store = Store::new(Arc::new(backend), namespace);
        store
            .store(&app_credential, &parent)
            .await
            .expect("store should succeed");
    }

    #[tokio::test]
    async fn test_store_creates_missing_record() {
        let namespace = "shoot--it";
        let parent = Parent::from_record(&record_with_data(
            namespace,
            &[(keys::PARENT_ID, "parent-id")],
        ));
        let app_credential = ApplicationCredential::from_parts(
            "app-id".to_string(),
            "shoot--it-abcd1234".to_string(),
            "app-secret".into(),
            Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap(),
        );

        let mut backend = MockObjectStore::default();
        backend
            .expect_update()
            .returning(|record| Err(StoreError::NotFound(record.name.clone())));
        backend
            .expect_create()
            .withf(|record: &Record| record.read_key(keys::APPLICATION_CREDENTIAL_ID) == "app-id")
            .returning(|_| Ok(()));

        let store = Store::new(Arc::new(backend), namespace);
        store
            .store(&app_credential, &parent)
            .await
            .expect("store should succeed");
    }

    #[tokio::test]
    async fn test_delete() {
        let namespace = "shoot--it";
        let record = Record {
            name: RECORD_NAME.to_string(),
            namespace: namespace.to_string(),
            finalizers: vec![FINALIZER.to_string()],
            ..Record::default()
        };

        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .returning(move |_, _| Ok(record.clone()));
        backend
            .expect_patch()
            .withf(|record: &Record| record.finalizers.is_empty())
            .returning(|_| Ok(()));
        backend.expect_delete().returning(|_, _| Ok(()));

        let store = Store::new(Arc::new(backend), namespace);
        store.delete().await.expect("delete should succeed");
    }

    #[tokio::test]
    async fn test_delete_no_record() {
        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .returning(|_, name| Err(StoreError::NotFound(name.to_string())));

        let store = Store::new(Arc::new(backend), "shoot--it");
        store.delete().await.expect("delete should succeed");
    }

    #[tokio::test]
    async fn test_delete_record_vanishes_mid_flight() {
        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .returning(|_, _| Ok(Record::default()));
        backend
            .expect_patch()
            .returning(|record| Err(StoreError::NotFound(record.name.clone())));
        backend
            .expect_delete()
            .returning(|_, name| Err(StoreError::NotFound(name.to_string())));

        let store = Store::new(Arc::new(backend), "shoot--it");
        store.delete().await.expect("delete should succeed");
    }

    #[tokio::test]
    async fn test_update_parent_secret() {
        let namespace = "shoot--it";
        let parent = Parent::from_record(&record_with_data(
            namespace,
            &[
                (keys::PARENT_ID, "parent-id"),
                (keys::PARENT_SECRET, "rotated-secret"),
            ],
        ));

        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .returning(|_, _| Ok(Record::default()));
        backend
            .expect_patch()
            .withf(|record: &Record| record.read_key(keys::PARENT_SECRET) == "rotated-secret")
            .returning(|_| Ok(()));

        let store = Store::new(Arc::new(backend), namespace);
        store
            .update_parent_secret(&parent)
            .await
            .expect("update should succeed");
    }

    #[tokio::test]
    async fn test_update_parent_secret_no_record() {
        let mut backend = MockObjectStore::default();
        backend
            .expect_get()
            .returning(|_, name| Err(StoreError::NotFound(name.to_string())));

        let store = Store::new(Arc::new(backend), "shoot--it");
        let parent = Parent::from_record(&Record::default());
        assert!(store.update_parent_secret(&parent).await.is_err());
    }
}
