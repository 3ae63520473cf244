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

//! Core data types: blocks, hashes and difficulties.

pub mod block;
pub mod difficulty;
pub mod hash;

pub use self::block::Block;
pub use self::difficulty::CumulativeDiff;
pub use self::hash::{Hash, IndepHash, ZERO_HASH, ZERO_INDEP_HASH};
