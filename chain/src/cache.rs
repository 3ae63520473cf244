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

//! The in-memory DAG of blocks that have passed proof-of-work
//! validation. Tracks a validation status per block, detects competing
//! blocks through their solution hashes, maintains the heaviest-chain
//! pointer and recolors the canonical chain on reorgs.
//!
//! Four indices hang off the block store: a height index for pruning, a
//! solution index for double-signing detection, the max cumulative
//! difficulty pointer and the memoized longest-chain summary. Every
//! public mutation leaves all of them mutually consistent.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

use crate::core::consensus::{
	ALTERNATIVE_BLOCK_EXPIRATION_TIME_SECONDS, STORE_BLOCKS_BEHIND_CURRENT,
};
use crate::core::core::hash::{Hash, IndepHash};
use crate::core::core::{Block, CumulativeDiff};
use crate::core::global;
use crate::error::{Error, ErrorKind};
use crate::types::{BlockStatus, IgnoreRegistry, NotValidatedStatus};

/// A cached block with its validation status, the time it entered the
/// cache and the blocks building on it.
struct BlockEntry {
	block: Block,
	status: BlockStatus,
	// When the block first entered the cache. Never refreshed by re-adds
	// or status transitions; this is the cache's age for the block, used
	// to age out alternatives.
	received: DateTime<Utc>,
	children: HashSet<IndepHash>,
}

/// The block cache. One write lock guards the whole state: a single
/// mutation touches several indices and must publish atomically, so no
/// finer-grained locking is possible. Mutations never block on anything
/// but the lock itself; readers take the shared lock and copy data out.
pub struct BlockCache {
	inner: RwLock<Cache>,
}

struct Cache {
	ignore: Arc<dyn IgnoreRegistry>,

	// Block store, the owner of every cached block.
	blocks: HashMap<IndepHash, BlockEntry>,
	// (height, hash) pairs ordered lexicographically; the min end drives
	// pruning, full scans recompute the heaviest block after removals.
	heights: BTreeSet<(u64, IndepHash)>,
	// Blocks per solution hash. Multiple blocks may share a solution,
	// either through a legitimate same-slot fork or double-signing.
	solutions: HashMap<Hash, HashSet<IndepHash>>,
	// The heaviest cached block; ties keep the earlier observation.
	max_cdiff: (CumulativeDiff, IndepHash),
	// The tip of the canonical chain.
	tip: IndepHash,
	// Memoized longest-chain summary, refreshed after every mutation.
	longest_chain: Vec<(IndepHash, Vec<Hash>)>,
	not_on_chain_count: usize,
}

impl BlockCache {
	/// Builds a cache holding the single given block as the on-chain tip.
	/// The block is announced to the ignore registry.
	pub fn new(block: Block, ignore: Arc<dyn IgnoreRegistry>) -> BlockCache {
		let h = block.indep_hash;
		info!("block cache init: {:?} at {}", h, block.height);

		let mut solutions = HashMap::new();
		let mut members = HashSet::new();
		members.insert(h);
		solutions.insert(block.hash, members);

		let mut heights = BTreeSet::new();
		heights.insert((block.height, h));

		let max_cdiff = (block.cumulative_diff.clone(), h);

		let mut blocks = HashMap::new();
		blocks.insert(
			h,
			BlockEntry {
				block,
				status: BlockStatus::OnChain,
				received: Utc::now(),
				children: HashSet::new(),
			},
		);

		ignore.add(&h);

		let mut cache = Cache {
			ignore,
			blocks,
			heights,
			solutions,
			max_cdiff,
			tip: h,
			longest_chain: vec![],
			not_on_chain_count: 0,
		};
		cache.update_longest_chain();

		BlockCache {
			inner: RwLock::new(cache),
		}
	}

	/// Rebuilds a cache from a chain of blocks, newest first, as loaded
	/// from persistent storage on start. The oldest block seeds the
	/// cache; every later block ends up on chain with the newest as tip.
	/// Fails with `NotFound` on an empty list.
	pub fn init_from_list(
		blocks: &[Block],
		ignore: Arc<dyn IgnoreRegistry>,
	) -> Result<BlockCache, Error> {
		let mut iter = blocks.iter().rev();
		let oldest = iter.next().ok_or(ErrorKind::NotFound)?;
		let cache = BlockCache::new(oldest.clone(), ignore);
		for b in iter {
			cache.add_validated(b.clone())?;
			cache.mark_tip(&b.indep_hash)?;
		}
		Ok(cache)
	}

	/// Accepts a freshly gossiped block into the cache as not validated.
	/// The initial sub-state depends on whether the block's height is
	/// past the 2.6 fork: post-fork blocks await nonce-limiter
	/// validation, earlier blocks await full validation directly.
	///
	/// Re-adding a known unvalidated block replaces its payload and
	/// nothing else. Re-adding an already validated block is ignored with
	/// a warning; the consensus layer has accepted that hash and a
	/// replacement would indicate a bug upstream.
	///
	/// The parent must already be cached, otherwise
	/// `PreviousBlockNotFound` is returned. Heights are trusted: the
	/// caller guarantees `height == parent.height + 1`.
	pub fn add(&self, block: Block) -> Result<(), Error> {
		self.inner.write().unwrap().add(block)
	}

	/// Accepts a block that has passed full validation. New blocks enter
	/// as `Validated`; known blocks are promoted to `Validated` unless
	/// already on chain. Fails with `PreviousBlockNotFound` if the parent
	/// is not cached and `PreviousBlockNotValidated` if it has not been
	/// validated itself.
	pub fn add_validated(&self, block: Block) -> Result<(), Error> {
		self.inner.write().unwrap().add_validated(block)
	}

	/// Records that the nonce-limiter validation of the block has been
	/// scheduled. A no-op unless the block is currently awaiting
	/// nonce-limiter validation; producers may race with removals.
	pub fn mark_nonce_limiter_validation_scheduled(&self, hash: &IndepHash) {
		self.inner
			.write()
			.unwrap()
			.mark_nonce_limiter(hash, false)
	}

	/// Records that the nonce-limiter validation of the block succeeded,
	/// making it eligible for the published chain summary and full
	/// validation. A no-op unless the validation was scheduled.
	pub fn mark_nonce_limiter_validated(&self, hash: &IndepHash) {
		self.inner.write().unwrap().mark_nonce_limiter(hash, true)
	}

	/// Promotes the block to the canonical tip. The block and its
	/// validated ancestors become `OnChain`; the displaced fork below the
	/// junction with the previous chain is recolored `Validated`.
	///
	/// Fails with `NotFound` for an unknown hash and `InvalidTip` when an
	/// ancestor has not been validated; on failure no status changes.
	/// The caller only promotes tips, never ancestors of the current one.
	pub fn mark_tip(&self, hash: &IndepHash) -> Result<(), Error> {
		self.inner.write().unwrap().mark_tip(hash)
	}

	/// Removes the block and all of its descendants. Every removal is
	/// reported to the ignore registry so the hashes can be gossiped
	/// again. Removing an unknown hash is a no-op.
	pub fn remove(&self, hash: &IndepHash) {
		self.inner.write().unwrap().remove(hash)
	}

	/// Drops blocks more than `depth` below the tip, removing stale
	/// sub-forks along the way. The lowest cached block is always on
	/// chain, before and after.
	pub fn prune(&self, depth: u64) {
		self.inner.write().unwrap().prune(depth)
	}

	/// The block with the given hash, if cached.
	pub fn get(&self, hash: &IndepHash) -> Option<Block> {
		let cache = self.inner.read().unwrap();
		cache.blocks.get(hash).map(|e| e.block.clone())
	}

	/// The block and its validation status, if cached.
	pub fn get_block_and_status(&self, hash: &IndepHash) -> Option<(Block, BlockStatus)> {
		let cache = self.inner.read().unwrap();
		cache
			.blocks
			.get(hash)
			.map(|e| (e.block.clone(), e.status))
	}

	/// Whether any cached block carries this solution hash.
	pub fn is_known_solution_hash(&self, solution_hash: &Hash) -> bool {
		let cache = self.inner.read().unwrap();
		cache.solutions.contains_key(solution_hash)
	}

	/// Looks up a block competing with the described one on the same
	/// solution hash, for double-signing detection. `exclude` is the
	/// block being checked itself. Prefers an exact cumulative-difficulty
	/// twin, then a block overlapping the described one (each sits above
	/// the other's parent), then any other holder of the solution.
	pub fn get_by_solution_hash(
		&self,
		solution_hash: &Hash,
		exclude: &IndepHash,
		cdiff: &CumulativeDiff,
		prev_cdiff: &CumulativeDiff,
	) -> Option<Block> {
		let cache = self.inner.read().unwrap();
		cache.get_by_solution_hash(solution_hash, exclude, cdiff, prev_cdiff)
	}

	/// The deepest not-yet-validated block on the heaviest chain,
	/// together with the chain of blocks connecting its parent to the
	/// canonical chain (newest to oldest, ending at the fork junction)
	/// and its status. `None` when the tip already carries the maximum
	/// cumulative difficulty or the heaviest chain is fully validated.
	pub fn get_earliest_not_validated_from_longest_chain(
		&self,
	) -> Option<(Block, Vec<Block>, BlockStatus)> {
		let cache = self.inner.read().unwrap();
		cache.get_earliest_not_validated()
	}

	/// The memoized heaviest-chain summary: up to
	/// `STORE_BLOCKS_BEHIND_CURRENT` blocks of `(hash, tx ids)` pairs,
	/// newest first, plus the number of them not yet on chain.
	pub fn get_longest_chain_block_txs_pairs(&self) -> (Vec<(IndepHash, Vec<Hash>)>, usize) {
		let cache = self.inner.read().unwrap();
		(cache.longest_chain.clone(), cache.not_on_chain_count)
	}

	/// The hash of the canonical tip.
	pub fn tip(&self) -> IndepHash {
		self.inner.read().unwrap().tip
	}

	/// The maximum cumulative difficulty over all cached blocks and its
	/// holder.
	pub fn max_cdiff(&self) -> (CumulativeDiff, IndepHash) {
		self.inner.read().unwrap().max_cdiff.clone()
	}

	/// Number of cached blocks.
	pub fn len(&self) -> usize {
		self.inner.read().unwrap().blocks.len()
	}

	/// Whether the cache is empty. It never is; present for completeness.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Cache {
	fn add(&mut self, block: Block) -> Result<(), Error> {
		let h = block.indep_hash;
		if let Some(entry) = self.blocks.get_mut(&h) {
			if entry.status.is_not_validated() {
				// a re-gossiped payload for a block we have not accepted
				// yet; keep status, age and children
				entry.block = block;
				self.update_longest_chain();
			} else {
				warn!("not re-adding already accepted block {:?}", h);
			}
			return Ok(());
		}
		if !self.blocks.contains_key(&block.previous_block) {
			return Err(ErrorKind::PreviousBlockNotFound.into());
		}

		self.purge_expired_alternatives(&block.hash, Utc::now());

		let status = if block.height >= global::fork_2_6_height() {
			BlockStatus::NotValidated(NotValidatedStatus::AwaitingNonceLimiterValidation)
		} else {
			BlockStatus::NotValidated(NotValidatedStatus::AwaitingValidation)
		};
		self.insert(block, status)
	}

	fn add_validated(&mut self, block: Block) -> Result<(), Error> {
		let h = block.indep_hash;
		match self.blocks.get(&block.previous_block) {
			None => return Err(ErrorKind::PreviousBlockNotFound.into()),
			Some(p) if p.status.is_not_validated() => {
				return Err(ErrorKind::PreviousBlockNotValidated.into());
			}
			Some(_) => {}
		}
		if self.blocks.contains_key(&h) {
			if block.cumulative_diff > self.max_cdiff.0 {
				self.max_cdiff = (block.cumulative_diff.clone(), h);
			}
			if let Some(parent) = self.blocks.get_mut(&block.previous_block) {
				parent.children.insert(h);
			}
			if let Some(entry) = self.blocks.get_mut(&h) {
				// keep the on-chain coloring, promote anything else;
				// age and children always survive a re-add
				if entry.status != BlockStatus::OnChain {
					entry.status = BlockStatus::Validated;
				}
				entry.block = block;
			}
			self.update_longest_chain();
			return Ok(());
		}

		self.purge_expired_alternatives(&block.hash, Utc::now());

		self.insert(block, BlockStatus::Validated)
	}

	// Inserts a new block under the given status. The parent is looked up
	// again: an expired alternative purge may have dropped it between the
	// caller's check and here.
	fn insert(&mut self, block: Block, status: BlockStatus) -> Result<(), Error> {
		let h = block.indep_hash;
		match self.blocks.get_mut(&block.previous_block) {
			None => return Err(ErrorKind::PreviousBlockNotFound.into()),
			Some(parent) => {
				parent.children.insert(h);
			}
		}
		self.solutions
			.entry(block.hash)
			.or_insert_with(HashSet::new)
			.insert(h);
		self.heights.insert((block.height, h));
		if block.cumulative_diff > self.max_cdiff.0 {
			self.max_cdiff = (block.cumulative_diff.clone(), h);
		}
		debug!("caching block {:?} at {} as {:?}", h, block.height, status);
		self.blocks.insert(
			h,
			BlockEntry {
				block,
				status,
				received: Utc::now(),
				children: HashSet::new(),
			},
		);
		self.ignore.add(&h);
		self.update_longest_chain();
		Ok(())
	}

	fn mark_nonce_limiter(&mut self, hash: &IndepHash, validated: bool) {
		let (required, next) = if validated {
			(
				NotValidatedStatus::NonceLimiterValidationScheduled,
				NotValidatedStatus::NonceLimiterValidated,
			)
		} else {
			(
				NotValidatedStatus::AwaitingNonceLimiterValidation,
				NotValidatedStatus::NonceLimiterValidationScheduled,
			)
		};
		let stepped = match self.blocks.get_mut(hash) {
			Some(entry) if entry.status == BlockStatus::NotValidated(required) => {
				entry.status = BlockStatus::NotValidated(next);
				true
			}
			// absent or past this step already; producers may race
			_ => false,
		};
		if stepped {
			// the head-skip rule depends on the nonce-limiter sub-state
			self.update_longest_chain();
		}
	}

	fn mark_tip(&mut self, hash: &IndepHash) -> Result<(), Error> {
		if !self.blocks.contains_key(hash) {
			return Err(ErrorKind::NotFound.into());
		}

		// Plan the full promotion first; nothing is committed until the
		// whole ancestry down to the junction checks out.
		let mut to_promote = vec![*hash];
		let mut junction = None;
		let mut cur = *hash;
		loop {
			let prev = match self.blocks.get(&cur) {
				Some(e) => e.block.previous_block,
				None => break,
			};
			match self.blocks.get(&prev) {
				// walked off the bottom of the cache
				None => break,
				Some(e) => match e.status {
					BlockStatus::NotValidated(_) => return Err(ErrorKind::InvalidTip.into()),
					BlockStatus::OnChain => {
						junction = Some((prev, cur));
						break;
					}
					BlockStatus::Validated => {
						to_promote.push(prev);
						cur = prev;
					}
				},
			}
		}

		for p in &to_promote {
			if let Some(e) = self.blocks.get_mut(p) {
				e.status = BlockStatus::OnChain;
			}
		}
		if let Some((junction, came_from)) = junction {
			// the other children of the junction carry the displaced
			// main fork; recolor their on-chain blocks
			let displaced: Vec<IndepHash> = self
				.blocks
				.get(&junction)
				.map(|e| {
					e.children
						.iter()
						.filter(|c| **c != came_from)
						.cloned()
						.collect()
				})
				.unwrap_or_default();
			for d in displaced {
				self.demote_chain(&d);
			}
		}
		debug!("new tip {:?}", hash);
		self.tip = *hash;
		self.update_longest_chain();
		Ok(())
	}

	// Flips every on-chain block in the subtree back to validated. Only
	// on-chain branches are descended; nothing below a validated or
	// unvalidated block can be on chain.
	fn demote_chain(&mut self, root: &IndepHash) {
		let mut stack = vec![*root];
		while let Some(h) = stack.pop() {
			let flipped = match self.blocks.get_mut(&h) {
				Some(e) if e.status == BlockStatus::OnChain => {
					e.status = BlockStatus::Validated;
					true
				}
				_ => false,
			};
			if flipped {
				if let Some(e) = self.blocks.get(&h) {
					stack.extend(e.children.iter().cloned());
				}
			}
		}
	}

	fn remove(&mut self, hash: &IndepHash) {
		if !self.blocks.contains_key(hash) {
			return;
		}
		self.remove_subtree(hash);
		self.ensure_max_cdiff();
		self.update_longest_chain();
	}

	// Deletes the block and its descendants from every index, reporting
	// each deletion to the ignore registry. Leaves max_cdiff and the
	// longest-chain memo to the caller.
	fn remove_subtree(&mut self, root: &IndepHash) {
		if let Some(parent_hash) = self.blocks.get(root).map(|e| e.block.previous_block) {
			if let Some(parent) = self.blocks.get_mut(&parent_hash) {
				parent.children.remove(root);
			}
		}
		let mut stack = vec![*root];
		while let Some(h) = stack.pop() {
			if let Some(entry) = self.blocks.remove(&h) {
				stack.extend(entry.children.iter().cloned());
				self.heights.remove(&(entry.block.height, h));
				self.unindex_solution(&entry.block.hash, &h);
				self.ignore.remove(&h);
				debug!("removed block {:?} at {}", h, entry.block.height);
			}
		}
	}

	fn unindex_solution(&mut self, solution_hash: &Hash, hash: &IndepHash) {
		let emptied = match self.solutions.get_mut(solution_hash) {
			Some(set) => {
				set.remove(hash);
				set.is_empty()
			}
			None => false,
		};
		if emptied {
			self.solutions.remove(solution_hash);
		}
	}

	fn prune(&mut self, depth: u64) {
		let tip_height = match self.blocks.get(&self.tip) {
			Some(e) => e.block.height,
			None => return,
		};
		let threshold = tip_height.saturating_sub(depth);
		loop {
			let (height, hash) = match self.heights.iter().next() {
				Some(&lowest) => lowest,
				None => break,
			};
			if height >= threshold {
				break;
			}
			// stale forks hanging off the block about to fall behind the
			// horizon go first
			let children: Vec<IndepHash> = self
				.blocks
				.get(&hash)
				.map(|e| e.children.iter().cloned().collect())
				.unwrap_or_default();
			for c in children {
				let on_chain = self
					.blocks
					.get(&c)
					.map(|e| e.status == BlockStatus::OnChain)
					.unwrap_or(false);
				if !on_chain {
					self.remove_subtree(&c);
				}
			}
			// then the block itself; its on-chain child becomes the new
			// lowest cached block
			self.heights.remove(&(height, hash));
			if let Some(entry) = self.blocks.remove(&hash) {
				self.unindex_solution(&entry.block.hash, &hash);
				self.ignore.remove(&hash);
				debug!("pruned block {:?} at {}", hash, height);
			}
		}
		self.ensure_max_cdiff();
		self.update_longest_chain();
	}

	// Ages out expired competitors for a solution hash before the set is
	// touched again. A block's lifetime scales with the length of the
	// fork it roots, so deep forks outlive shallow ones. On-chain blocks
	// never expire.
	fn purge_expired_alternatives(&mut self, solution_hash: &Hash, now: DateTime<Utc>) {
		let members: Vec<IndepHash> = match self.solutions.get(solution_hash) {
			Some(set) => set.iter().cloned().collect(),
			None => return,
		};
		let mut removed = false;
		for h in members {
			let expired = match self.blocks.get(&h) {
				Some(e) if e.status != BlockStatus::OnChain => {
					let lifetime = Duration::seconds(
						ALTERNATIVE_BLOCK_EXPIRATION_TIME_SECONDS * self.fork_length(&h) as i64,
					);
					now.signed_duration_since(e.received) > lifetime
				}
				_ => false,
			};
			if expired {
				debug!("aging out alternative block {:?}", h);
				self.remove_subtree(&h);
				removed = true;
			}
		}
		if removed {
			self.ensure_max_cdiff();
			self.update_longest_chain();
		}
	}

	// 1 + the longest chain of descendants below the block.
	fn fork_length(&self, hash: &IndepHash) -> u64 {
		match self.blocks.get(hash) {
			Some(e) => {
				1 + e
					.children
					.iter()
					.map(|c| self.fork_length(c))
					.max()
					.unwrap_or(0)
			}
			None => 0,
		}
	}

	fn ensure_max_cdiff(&mut self) {
		if !self.blocks.contains_key(&self.max_cdiff.1) {
			self.recompute_max_cdiff();
		}
	}

	// Full rescan through the height index, ascending, keeping the first
	// block seen for a given difficulty so ties stay deterministic.
	fn recompute_max_cdiff(&mut self) {
		let mut max: Option<(CumulativeDiff, IndepHash)> = None;
		for &(_, h) in &self.heights {
			if let Some(e) = self.blocks.get(&h) {
				let heavier = match &max {
					None => true,
					Some((cd, _)) => e.block.cumulative_diff > *cd,
				};
				if heavier {
					max = Some((e.block.cumulative_diff.clone(), h));
				}
			}
		}
		if let Some(m) = max {
			self.max_cdiff = m;
		}
	}

	// Rebuilds the memoized longest-chain summary: up to
	// STORE_BLOCKS_BEHIND_CURRENT (hash, tx ids) pairs walking back from
	// the heaviest block, and how many of them are not on chain yet.
	fn update_longest_chain(&mut self) {
		// Blocks still in the early nonce-limiter states are too young to
		// publish; start below them.
		let mut start = self.max_cdiff.1;
		while let Some(e) = self.blocks.get(&start) {
			match e.status {
				BlockStatus::NotValidated(NotValidatedStatus::AwaitingNonceLimiterValidation)
				| BlockStatus::NotValidated(NotValidatedStatus::NonceLimiterValidationScheduled) => {
					start = e.block.previous_block;
				}
				_ => break,
			}
		}

		let mut pairs = Vec::new();
		let mut not_on_chain = 0;
		let mut seen_on_chain = false;
		let mut cur = start;
		while (pairs.len() as u64) < STORE_BLOCKS_BEHIND_CURRENT {
			match self.blocks.get(&cur) {
				// fell off the pruned bottom, keep what we collected
				None => break,
				Some(e) => {
					if e.status == BlockStatus::OnChain {
						seen_on_chain = true;
					} else {
						// walking backward, on-chain blocks only ever
						// appear below the fork point; the single writer
						// rules out a reorg mid-walk
						debug_assert!(
							!seen_on_chain,
							"non-on-chain block above an on-chain ancestor"
						);
						not_on_chain += 1;
					}
					pairs.push((cur, e.block.txs.clone()));
					cur = e.block.previous_block;
				}
			}
		}
		self.longest_chain = pairs;
		self.not_on_chain_count = not_on_chain;
	}

	fn get_earliest_not_validated(&self) -> Option<(Block, Vec<Block>, BlockStatus)> {
		let tip_cdiff = self
			.blocks
			.get(&self.tip)
			.map(|e| e.block.cumulative_diff.clone())?;
		if tip_cdiff >= self.max_cdiff.0 {
			// the tip already is the heaviest chain
			return None;
		}
		let mut cur = self.max_cdiff.1;
		let mut earliest = None;
		while let Some(e) = self.blocks.get(&cur) {
			if !e.status.is_not_validated() {
				break;
			}
			earliest = Some(cur);
			cur = e.block.previous_block;
		}
		let entry = self.blocks.get(&earliest?)?;

		// The validation context: everything from the parent down to the
		// junction with the canonical chain, newest to oldest.
		let mut prev_blocks = Vec::new();
		let mut cur = entry.block.previous_block;
		while let Some(e) = self.blocks.get(&cur) {
			prev_blocks.push(e.block.clone());
			if e.status == BlockStatus::OnChain {
				break;
			}
			cur = e.block.previous_block;
		}
		Some((entry.block.clone(), prev_blocks, entry.status))
	}

	fn get_by_solution_hash(
		&self,
		solution_hash: &Hash,
		exclude: &IndepHash,
		cdiff: &CumulativeDiff,
		prev_cdiff: &CumulativeDiff,
	) -> Option<Block> {
		let set = self.solutions.get(solution_hash)?;
		let mut overlapping: Option<&Block> = None;
		let mut any: Option<&Block> = None;
		for h in set {
			if h == exclude {
				continue;
			}
			let entry = match self.blocks.get(h) {
				Some(e) => e,
				None => {
					// the solution index never outlives the block store
					// under the single writer
					debug_assert!(false, "solution index member not cached");
					continue;
				}
			};
			let b = &entry.block;
			if b.cumulative_diff == *cdiff {
				// an exact twin settles it
				return Some(b.clone());
			}
			if b.cumulative_diff > *prev_cdiff && *cdiff > b.previous_cumulative_diff {
				// the two blocks each build above the other's parent:
				// double-signing at overlapping heights
				overlapping.get_or_insert(b);
			} else {
				any.get_or_insert(b);
			}
		}
		overlapping.or(any).cloned()
	}
}
