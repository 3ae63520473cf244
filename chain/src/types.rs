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

//! Base types the block cache requires.

use crate::core::core::hash::IndepHash;

/// Validation progress of a cached block that has not been fully
/// validated yet. The nonce-limiter steps form a linear progression:
/// awaiting, scheduled, validated. Blocks mined before the 2.6 fork skip
/// the nonce limiter entirely and go straight to `AwaitingValidation`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotValidatedStatus {
	/// Waiting to be scheduled for nonce-limiter (VDF) validation.
	AwaitingNonceLimiterValidation,
	/// Handed to the nonce-limiter validation queue.
	NonceLimiterValidationScheduled,
	/// Nonce-limiter checks passed, eligible for full validation.
	NonceLimiterValidated,
	/// Pre-2.6 block, awaiting full validation directly.
	AwaitingValidation,
}

/// The cache's coloring of a block. Exactly one path of `OnChain` blocks
/// runs from the tip down to the lowest cached block; everything else is
/// `Validated` or `NotValidated`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
	/// Accepted into the cache but not fully validated.
	NotValidated(NotValidatedStatus),
	/// Fully validated, sitting on a fork that is not the current chain.
	Validated,
	/// Part of the current canonical chain.
	OnChain,
}

impl BlockStatus {
	/// Whether the block still awaits full validation.
	pub fn is_not_validated(&self) -> bool {
		match self {
			BlockStatus::NotValidated(_) => true,
			_ => false,
		}
	}
}

/// Bridge between the cache and the gossip layer's registry of recently
/// seen hashes. The cache registers every block it accepts and
/// unregisters every block it drops so the hash can be gossiped again.
/// Both calls are fire-and-forget.
pub trait IgnoreRegistry: Send + Sync {
	/// The cache accepted a block under this hash.
	fn add(&self, hash: &IndepHash);

	/// The cache dropped the block with this hash.
	fn remove(&self, hash: &IndepHash);
}

/// An ignore registry that dispatches nowhere, for tests and tools.
pub struct NoopRegistry;

impl IgnoreRegistry for NoopRegistry {
	fn add(&self, _hash: &IndepHash) {}
	fn remove(&self, _hash: &IndepHash) {}
}
