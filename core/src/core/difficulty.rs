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

//! Cumulative difficulty, the monotonic weight of a chain used for fork
//! choice. An arbitrary-precision unsigned integer; heavier is better.

use std::fmt;
use std::ops::Add;

use num_bigint::BigUint;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The cumulative difficulty of a chain up to and including a block.
/// Grows without bound over the life of the chain, hence the bignum.
#[derive(Debug, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Default)]
pub struct CumulativeDiff {
	num: BigUint,
}

impl CumulativeDiff {
	/// Difficulty of zero, the weight of an empty chain.
	pub fn zero() -> CumulativeDiff {
		CumulativeDiff {
			num: BigUint::new(vec![]),
		}
	}

	/// Convert a `u64` into a `CumulativeDiff`
	pub fn from_num(num: u64) -> CumulativeDiff {
		CumulativeDiff {
			num: BigUint::from(num),
		}
	}

	/// Convert a `BigUint` into a `CumulativeDiff`
	pub fn from_biguint(num: BigUint) -> CumulativeDiff {
		CumulativeDiff { num }
	}

	/// Converts the difficulty into a bignum
	pub fn into_biguint(self) -> BigUint {
		self.num
	}
}

impl fmt::Display for CumulativeDiff {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.num)
	}
}

impl Add<CumulativeDiff> for CumulativeDiff {
	type Output = CumulativeDiff;
	fn add(self, other: CumulativeDiff) -> CumulativeDiff {
		CumulativeDiff {
			num: self.num + other.num,
		}
	}
}

// Serialized as a decimal string, the wire format quotes bignums to keep
// them safe from 53-bit JSON consumers.
impl Serialize for CumulativeDiff {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.num.to_str_radix(10).as_str())
	}
}

impl<'de> Deserialize<'de> for CumulativeDiff {
	fn deserialize<D>(deserializer: D) -> Result<CumulativeDiff, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(DiffVisitor)
	}
}

struct DiffVisitor;

impl<'de> de::Visitor<'de> for DiffVisitor {
	type Value = CumulativeDiff;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(formatter, "a decimal string")
	}

	fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		let num = BigUint::parse_bytes(s.as_bytes(), 10)
			.ok_or_else(|| de::Error::custom(format!("invalid difficulty: {}", s)))?;
		Ok(CumulativeDiff { num })
	}
}
