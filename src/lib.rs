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

//! # Managed OpenStack application credentials
//!
//! Infrastructure-provisioning workloads of a tenant cluster (a "shoot")
//! need OpenStack credentials to drive the cloud layer. Handing them the
//! long-lived password of the parent OpenStack user is undesirable: the
//! password would be copied into every namespace that provisions
//! infrastructure, and rotating it would require touching all of them at
//! once.
//!
//! OpenStack application credentials offer a way out. They are identity
//! service artefacts `{id, name, secret}` owned by a user, usable for token
//! issuance without the user's password and time-bounded by an expiration
//! date. This crate manages the lifecycle of exactly one such credential
//! per tenant namespace on behalf of the parent user:
//!
//! - create the credential on first reconciliation and persist its
//!   identity in a per-namespace record,
//! - renew it before it expires, judged against both a conservative local
//!   lifetime and the expiration date reported to the identity service,
//! - rotate it when the parent user changes, and follow password rotations
//!   of an unchanged parent without re-minting,
//! - garbage-collect orphaned siblings left behind by crashed
//!   reconciliations, scoped by the shoot name prefix so that credentials
//!   of other tenants are never touched,
//! - tear everything down on cluster deletion, tolerating a parent user
//!   that has meanwhile been deleted or re-keyed.
//!
//! The entry point is [`manager::Manager`] with its
//! [`ensure`](manager::Manager::ensure) and
//! [`delete`](manager::Manager::delete) operations. Both are idempotent
//! and may be invoked repeatedly by an enclosing reconciler; the manager
//! makes its decisions from the persisted record and the identity service
//! state observed at each invocation.
//!
//! The crate talks to its surroundings exclusively through ports: the
//! [`identity`] module defines the identity service capability and its
//! factory, the [`store`] module the key/value object store holding the
//! per-namespace record. Both are injected, so tests substitute
//! deterministic fakes.

pub mod common;
pub mod config;
pub mod error;
pub mod identity;
pub mod manager;
pub mod store;

pub use common::types::{AppCredentialAuth, Credentials, RecordReference};
pub use manager::Manager;
