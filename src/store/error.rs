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
//! # Store error.
use thiserror::Error;

/// Side-state store error, shared by the object store port and the
/// [`Store`](crate::store::Store) capability built on top of it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record does not exist.
    #[error("record {0} not found")]
    NotFound(String),

    /// The write lost against a concurrent update (resource versioning).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transient storage failure; the operation may succeed when retried.
    #[error("transient store error: {0}")]
    Transient(String),

    /// Record payload (de)serialization error.
    #[error("data serialization error: {}", source)]
    Serde {
        /// The source of the error.
        #[from]
        source: serde_json::Error,
    },

    /// The record carries a creation time that is not RFC3339. Operators
    /// recover by deleting the record; silently renewing could mask data
    /// corruption.
    #[error("invalid creation time {value:?} in record: {source}")]
    InvalidCreationTime {
        /// The raw value found in the record.
        value: String,
        /// The source of the error.
        source: chrono::ParseError,
    },
}

impl StoreError {
    /// Whether the error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}
