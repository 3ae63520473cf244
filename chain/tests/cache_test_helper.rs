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

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rand::prelude::*;

use weave_chain::{BlockCache, IgnoreRegistry, NoopRegistry};
use weave_core::core::hash::{Hash, IndepHash};
use weave_core::core::{Block, CumulativeDiff};

pub fn init_test_logger() {
	let _ = env_logger::try_init();
}

pub fn random_indep_hash() -> IndepHash {
	let mut bytes = [0u8; 48];
	thread_rng().fill(&mut bytes[..]);
	IndepHash(bytes)
}

pub fn random_hash() -> Hash {
	let mut bytes = [0u8; 32];
	thread_rng().fill(&mut bytes[..]);
	Hash(bytes)
}

/// A block with random identity at height zero; `on_top` fixes the
/// linkage, height and previous difficulty up.
pub fn random_block(cdiff: u64) -> Block {
	Block {
		indep_hash: random_indep_hash(),
		previous_block: random_indep_hash(),
		hash: random_hash(),
		height: 0,
		cumulative_diff: CumulativeDiff::from_num(cdiff),
		previous_cumulative_diff: CumulativeDiff::zero(),
		timestamp: 0,
		txs: vec![random_hash(), random_hash()],
	}
}

/// Rebases the block on the given parent.
pub fn on_top(mut block: Block, prev: &Block) -> Block {
	block.previous_block = prev.indep_hash;
	block.height = prev.height + 1;
	block.previous_cumulative_diff = prev.cumulative_diff.clone();
	block
}

pub fn new_cache(genesis: Block) -> BlockCache {
	BlockCache::new(genesis, Arc::new(NoopRegistry))
}

/// An ignore registry remembering which hashes it currently holds, to
/// observe the cache's notifications.
pub struct RecordingRegistry {
	known: Mutex<HashSet<IndepHash>>,
}

impl RecordingRegistry {
	pub fn new() -> Arc<RecordingRegistry> {
		Arc::new(RecordingRegistry {
			known: Mutex::new(HashSet::new()),
		})
	}

	pub fn contains(&self, hash: &IndepHash) -> bool {
		self.known.lock().unwrap().contains(hash)
	}
}

impl IgnoreRegistry for RecordingRegistry {
	fn add(&self, hash: &IndepHash) {
		self.known.lock().unwrap().insert(*hash);
	}

	fn remove(&self, hash: &IndepHash) {
		self.known.lock().unwrap().remove(hash);
	}
}
