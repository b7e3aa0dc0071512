// stepview - Step-Through Debugger Client
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! stepview Client - Session lifecycle and view synchronization
//!
//! This crate drives a remote step-through debugger: it opens a session for
//! a program, steps it forward, and turns every snapshot the backend sends
//! into a [`View`] of source, stack and heap.
//!
//! The pieces, leaf first:
//! - [`transport`]: HTTP calls to the backend, decoded into [`Envelope`]s
//! - [`session`]: the open session's identifier and source listing
//! - [`dispatcher`]: the Inactive/Active state machine over user commands
//! - [`render`]: the pure projection from a snapshot to a [`View`]
//!
//! [`Envelope`]: stepview_common::types::Envelope

/// Command dispatcher and the frontend contract
pub mod dispatcher;

/// Pure snapshot renderer
pub mod render;

/// Session state owned by the dispatcher
pub mod session;

/// Transport adapter for the backend's HTTP API
pub mod transport;

pub use dispatcher::{Dispatcher, Frontend, Notice, Outcome, Phase};
pub use render::{render, View};
pub use session::Session;
pub use transport::{Endpoint, HttpTransport, Transport, TransportError};
