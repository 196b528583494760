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

//! # Error
//!
//! Shared error types that do not belong to a single module.
use thiserror::Error;

/// Error during building of complex structures.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BuilderError {
    message: String,
}

impl From<derive_builder::UninitializedFieldError> for BuilderError {
    fn from(source: derive_builder::UninitializedFieldError) -> Self {
        Self {
            message: source.to_string(),
        }
    }
}

impl From<String> for BuilderError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
