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

// Runs on the user-testing chain where the 2.6 fork activates at a low
// height, so it lives in its own binary: the chain type is process-wide.

mod cache_test_helper;

use self::cache_test_helper::{init_test_logger, new_cache, on_top, random_block};
use weave_chain::{BlockStatus, NotValidatedStatus};
use weave_core::global::{self, ChainTypes, USER_TESTING_FORK_2_6_HEIGHT};

#[test]
fn initial_status_follows_the_fork_height() {
	init_test_logger();
	global::set_chain_type(ChainTypes::UserTesting);
	assert_eq!(global::fork_2_6_height(), USER_TESTING_FORK_2_6_HEIGHT);

	let genesis = random_block(0);
	let cache = new_cache(genesis.clone());

	let mut prev = genesis;
	for n in 1..=USER_TESTING_FORK_2_6_HEIGHT {
		let b = on_top(random_block(n), &prev);
		cache.add(b.clone()).unwrap();

		let (_, status) = cache.get_block_and_status(&b.indep_hash).unwrap();
		if b.height < USER_TESTING_FORK_2_6_HEIGHT {
			// pre-fork blocks skip the nonce limiter entirely
			assert_eq!(
				status,
				BlockStatus::NotValidated(NotValidatedStatus::AwaitingValidation)
			);
		} else {
			assert_eq!(
				status,
				BlockStatus::NotValidated(NotValidatedStatus::AwaitingNonceLimiterValidation)
			);
		}
		prev = b;
	}
}

#[test]
fn pre_fork_blocks_are_not_skipped_from_the_summary() {
	init_test_logger();
	global::set_chain_type(ChainTypes::UserTesting);

	let genesis = random_block(0);
	let cache = new_cache(genesis.clone());
	let b2 = on_top(random_block(1), &genesis);
	cache.add(b2.clone()).unwrap();

	// an AwaitingValidation head is old enough to publish
	let (chain, not_on_chain) = cache.get_longest_chain_block_txs_pairs();
	assert_eq!(
		chain,
		vec![
			(b2.indep_hash, b2.txs.clone()),
			(genesis.indep_hash, genesis.txs.clone()),
		]
	);
	assert_eq!(not_on_chain, 1);
}
