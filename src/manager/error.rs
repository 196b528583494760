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
//! # Manager error.
use thiserror::Error;

use crate::config::ConfigError;
use crate::identity::IdentityClientError;
use crate::manager::gc::GarbageCollectorError;
use crate::store::StoreError;

/// Manager error.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// Identity service error.
    #[error(transparent)]
    Identity {
        /// The source of the error.
        #[from]
        source: IdentityClientError,
    },

    /// Side-state store error.
    #[error(transparent)]
    Store {
        /// The source of the error.
        #[from]
        source: StoreError,
    },

    /// Garbage collection error.
    #[error(transparent)]
    GarbageCollector {
        /// The source of the error.
        #[from]
        source: GarbageCollectorError,
    },

    /// Configuration error.
    #[error(transparent)]
    Config {
        /// The source of the error.
        #[from]
        source: ConfigError,
    },
}
