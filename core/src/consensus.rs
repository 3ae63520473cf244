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

//! All the consensus parameters fixed by the protocol. Changing any of
//! these is a hard fork.

/// How many blocks behind the current tip the node keeps fully cached.
/// Bounds the depth of the longest-chain summary and the pruning horizon.
pub const STORE_BLOCKS_BEHIND_CURRENT: u64 = 50;

/// Base lifetime, in seconds, of an alternative block: a cached block that
/// shares a solution hash with another cached block without being on
/// chain. The effective lifetime is this constant multiplied by the fork
/// length (1 + the deepest chain of descendants), so deeper forks survive
/// longer before they are aged out.
pub const ALTERNATIVE_BLOCK_EXPIRATION_TIME_SECONDS: i64 = 5;

/// Mainnet activation height of the 2.6 hard fork, which introduced the
/// nonce limiter (VDF). Blocks at or above this height must go through
/// nonce-limiter validation before full validation.
pub const MAINNET_FORK_2_6_HEIGHT: u64 = 1_132_210;
