// Copyright 2023 The Weave Developers
//
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

//! The block cache: the in-memory DAG of blocks that have passed
//! proof-of-work validation. Consulted on every gossip event, every
//! validation step and every fork-choice decision; drives pruning and
//! reorg coloring.

#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![warn(missing_docs)]

#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use weave_core as core;

mod cache;
pub mod error;
pub mod types;

// Re-export the base interface

pub use crate::cache::BlockCache;
pub use crate::error::{Error, ErrorKind};
pub use crate::types::{BlockStatus, IgnoreRegistry, NoopRegistry, NotValidatedStatus};
