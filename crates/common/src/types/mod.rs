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

//! Types exchanged with the debugger backend.
//!
//! The backend speaks plain JSON over HTTP POST. Requests are small typed
//! payloads ([`StartRequest`], [`SessionRequest`]); every response is turned
//! into an [`Envelope`] exactly once, at the transport boundary, so nothing
//! downstream ever inspects raw optional fields again.

mod envelope;
mod request;
mod snapshot;

pub use envelope::*;
pub use request::*;
pub use snapshot::*;
