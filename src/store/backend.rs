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
//! # Object store port
//!
//! The key/value object store holding the per-namespace record. The
//! embedding application supplies the implementation; per-key
//! linearizability (via resource versioning) is assumed, so a concurrent
//! writer observes either the pre- or the post-state of a record, never a
//! torn one.
use async_trait::async_trait;

use crate::store::error::StoreError;
use crate::store::types::Record;

/// Object store capability.
#[async_trait]
pub trait ObjectStoreApi: Send + Sync {
    /// Fetch a record by namespace and name.
    async fn get<'a>(&self, namespace: &'a str, name: &'a str) -> Result<Record, StoreError>;

    /// Create a record. Fails with [`StoreError::Conflict`] if it already
    /// exists.
    async fn create(&self, record: &Record) -> Result<(), StoreError>;

    /// Replace an existing record. Fails with [`StoreError::NotFound`] if
    /// it does not exist.
    async fn update(&self, record: &Record) -> Result<(), StoreError>;

    /// Merge the given record state into the stored one. Fails with
    /// [`StoreError::NotFound`] if it does not exist.
    async fn patch(&self, record: &Record) -> Result<(), StoreError>;

    /// Delete a record by namespace and name. Fails with
    /// [`StoreError::NotFound`] if it does not exist.
    async fn delete<'a>(&self, namespace: &'a str, name: &'a str) -> Result<(), StoreError>;
}
