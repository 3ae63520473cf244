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

//! Values that should be shared across all modules, without necessarily
//! having to pass them all over the place, but aren't consensus values.
//! should be used sparingly.

use std::sync::RwLock;

use crate::consensus::MAINNET_FORK_2_6_HEIGHT;

/// Fork 2.6 height used by the user-testing chain, low enough that tests
/// can build chains straddling the fork.
pub const USER_TESTING_FORK_2_6_HEIGHT: u64 = 10;

/// Types of chain a node can run on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ChainTypes {
	/// For CI testing. The 2.6 fork is active from genesis.
	AutomatedTesting,

	/// For User testing. The 2.6 fork activates at a low height so both
	/// sides of it are reachable.
	UserTesting,

	/// Production, use the values in consensus.rs.
	Mainnet,
}

lazy_static! {
	/// The chain type on which this node is running
	pub static ref CHAIN_TYPE: RwLock<ChainTypes> = RwLock::new(ChainTypes::Mainnet);
}

/// Set the chain type on a per-chain basis
pub fn set_chain_type(chain_type: ChainTypes) {
	let mut param_ref = CHAIN_TYPE.write().unwrap();
	*param_ref = chain_type;
}

/// Activation height of the 2.6 hard fork. Blocks at or above this height
/// require nonce-limiter validation.
pub fn fork_2_6_height() -> u64 {
	let param_ref = CHAIN_TYPE.read().unwrap();
	match *param_ref {
		ChainTypes::AutomatedTesting => 0,
		ChainTypes::UserTesting => USER_TESTING_FORK_2_6_HEIGHT,
		ChainTypes::Mainnet => MAINNET_FORK_2_6_HEIGHT,
	}
}

/// Are we in production mode?
pub fn is_mainnet() -> bool {
	let param_ref = CHAIN_TYPE.read().unwrap();
	ChainTypes::Mainnet == *param_ref
}
