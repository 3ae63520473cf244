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

//! Blocks as the rest of the node consumes them. The block cache treats
//! blocks as opaque data; it reads the identity, parent, solution and
//! weight fields and never validates anything.

use crate::core::difficulty::CumulativeDiff;
use crate::core::hash::{Hash, IndepHash, ZERO_HASH, ZERO_INDEP_HASH};

/// A weave block. Only the header fields consumed by the caching and
/// fork-choice layers are represented here; proofs, wallet data and the
/// transaction bodies live with the validation and storage subsystems.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Block {
	/// The unique block identifier, a hash of the full block content.
	pub indep_hash: IndepHash,
	/// Independent hash of the parent block.
	pub previous_block: IndepHash,
	/// The proof-of-work solution hash. Not unique: two miners may find
	/// the same solution for the same slot.
	pub hash: Hash,
	/// Block height, parent height plus one.
	pub height: u64,
	/// Weight of the chain up to and including this block.
	pub cumulative_diff: CumulativeDiff,
	/// Weight of the chain up to the parent block.
	pub previous_cumulative_diff: CumulativeDiff,
	/// Unix timestamp the miner stamped the block with.
	pub timestamp: i64,
	/// Ids of the transactions included in the block, in order.
	pub txs: Vec<Hash>,
}

/// Default properties for a block, everything zeroed out and empty
/// vectors. Mostly useful to build fixtures.
impl Default for Block {
	fn default() -> Block {
		Block {
			indep_hash: ZERO_INDEP_HASH,
			previous_block: ZERO_INDEP_HASH,
			hash: ZERO_HASH,
			height: 0,
			cumulative_diff: CumulativeDiff::zero(),
			previous_cumulative_diff: CumulativeDiff::zero(),
			timestamp: 0,
			txs: vec![],
		}
	}
}
