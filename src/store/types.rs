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
//! # Object store types
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A persisted object in a tenant namespace.
///
/// Records are identified by `(namespace, name)` and carry an opaque
/// key→bytes payload. Finalizers block deletion by the storage layer until
/// they are removed, which is what gives the manager its two-step
/// patch-then-delete teardown.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    /// Name of the record, unique within the namespace.
    pub name: String,

    /// Tenant namespace the record lives in.
    pub namespace: String,

    /// Finalizers attached to the record.
    #[serde(default)]
    pub finalizers: Vec<String>,

    /// Opaque payload.
    #[serde(default)]
    pub data: HashMap<String, Vec<u8>>,
}

impl Record {
    /// Read a data key as a string; absent keys yield the empty string.
    ///
    /// Records written before a schema enrichment may miss keys that later
    /// versions populate, so absence is not an error.
    pub fn read_key(&self, key: &str) -> String {
        self.data
            .get(key)
            .map(|value| String::from_utf8_lossy(value).into_owned())
            .unwrap_or_default()
    }

    /// Set a data key from a string value.
    pub fn set_key(&mut self, key: &str, value: &str) {
        self.data.insert(key.to_string(), value.as_bytes().to_vec());
    }
}
