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

use async_trait::async_trait;
use mockall::mock;

use crate::store::backend::ObjectStoreApi;
use crate::store::error::StoreError;
use crate::store::types::Record;

mock! {
    pub ObjectStore {}

    #[async_trait]
    impl ObjectStoreApi for ObjectStore {
        async fn get<'a>(&self, namespace: &'a str, name: &'a str) -> Result<Record, StoreError>;

        async fn create(&self, record: &Record) -> Result<(), StoreError>;

        async fn update(&self, record: &Record) -> Result<(), StoreError>;

        async fn patch(&self, record: &Record) -> Result<(), StoreError>;

        async fn delete<'a>(&self, namespace: &'a str, name: &'a str) -> Result<(), StoreError>;
    }
}
