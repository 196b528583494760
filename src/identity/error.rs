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
//! # Identity service port error.
use thiserror::Error;

use crate::error::BuilderError;

/// Identity service port error.
#[derive(Debug, Error)]
pub enum IdentityClientError {
    /// The requested entity does not exist on the identity service.
    #[error("{0} not found")]
    NotFound(String),

    /// The identity service rejected the client's credentials. For a
    /// stored parent this demotes it to unusable; for the desired parent
    /// it is fatal.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Transient transport or service failure; the operation may succeed
    /// when retried.
    #[error("transient identity service error: {0}")]
    Transient(String),

    /// Request validation error.
    #[error("request validation error: {}", source)]
    Validation {
        /// The source of the error.
        #[from]
        source: validator::ValidationErrors,
    },

    /// Structures builder error.
    #[error(transparent)]
    StructBuilder {
        /// The source of the error.
        #[from]
        source: BuilderError,
    },
}

impl IdentityClientError {
    /// Whether the error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }
}
