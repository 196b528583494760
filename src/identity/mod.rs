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

//! # Identity service port
//!
//! Application credentials provide a way to delegate a user's authorization
//! to an application without sharing the user's password. A user creates an
//! application credential scoped to their project and the application
//! stores the credential identifier and secret instead of the password.
//! Multiple application credentials may be active at once, which is what
//! makes rotation possible: create a second one, switch the consumer over,
//! delete the first.
//!
//! Application credentials are limited by the lifespan of the user that
//! created them. If the user is deleted, disabled, or loses a role
//! assignment on the project, the application credential dies with it. The
//! manager therefore treats the owning principal — the parent — as part of
//! the credential's identity and rotates when the parent changes.
//!
//! This module defines the capability the manager consumes from the
//! identity service: resolving the caller's principal id and creating,
//! inspecting, listing and deleting application credentials under a given
//! owner. The transport behind [`IdentityApi`] (an OpenStack SDK, an HTTP
//! client) is supplied by the embedding application through
//! [`IdentityClientFactory`]; tests substitute mocks.

pub mod error;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use error::IdentityClientError;
#[cfg(test)]
pub use mock::{MockIdentityClient, MockIdentityClientFactory};
pub use types::{IdentityApi, IdentityClientFactory};
