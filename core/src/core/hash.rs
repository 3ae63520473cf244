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

//! Hash types used to identify blockchain constructs.
//!
//! A block is identified by its 48-byte independent hash. The 32-byte
//! `Hash` type is used everywhere else: solution hashes, transaction ids.
//! Note a solution hash does not uniquely identify a block — two distinct
//! blocks may carry the same proof-of-work solution.

use std::fmt;

use serde::de;

/// A 32-byte hash. Used for proof-of-work solution hashes and
/// transaction ids.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Hash(pub [u8; 32]);

/// The hash of nothing, all zeroes.
pub const ZERO_HASH: Hash = Hash([0; 32]);

/// A 48-byte independent block hash, the unique block identifier. Unlike
/// the solution hash it commits to the full block content.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct IndepHash(pub [u8; 48]);

/// The independent hash of nothing, all zeroes.
pub const ZERO_INDEP_HASH: IndepHash = IndepHash([0; 48]);

fn to_hex(bytes: &[u8]) -> String {
	let mut s = String::with_capacity(bytes.len() * 2);
	for b in bytes {
		s.push_str(&format!("{:02x}", b));
	}
	s
}

fn from_hex(hex: &str, out: &mut [u8]) -> Result<(), String> {
	if hex.len() != out.len() * 2 {
		return Err(format!("invalid hash length {}", hex.len()));
	}
	for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
		let s = ::std::str::from_utf8(chunk).map_err(|e| e.to_string())?;
		out[i] = u8::from_str_radix(s, 16).map_err(|e| e.to_string())?;
	}
	Ok(())
}

impl Hash {
	/// Creates a hash from a byte vector. Panics if the vector is shorter
	/// than 32 bytes.
	pub fn from_vec(v: &[u8]) -> Hash {
		let mut a = [0; 32];
		a.copy_from_slice(&v[..32]);
		Hash(a)
	}

	/// Converts the hash to a byte vector
	pub fn to_vec(&self) -> Vec<u8> {
		self.0.to_vec()
	}

	/// Converts the hash to a byte slice
	pub fn to_slice(&self) -> &[u8] {
		&self.0
	}

	/// Hex representation of the hash
	pub fn to_hex(&self) -> String {
		to_hex(&self.0)
	}

	/// Parses a hash from its hex representation
	pub fn from_hex(hex: &str) -> Result<Hash, String> {
		let mut a = [0; 32];
		from_hex(hex, &mut a)?;
		Ok(Hash(a))
	}
}

impl IndepHash {
	/// Creates an independent hash from a byte vector. Panics if the
	/// vector is shorter than 48 bytes.
	pub fn from_vec(v: &[u8]) -> IndepHash {
		let mut a = [0; 48];
		a.copy_from_slice(&v[..48]);
		IndepHash(a)
	}

	/// Converts the hash to a byte vector
	pub fn to_vec(&self) -> Vec<u8> {
		self.0.to_vec()
	}

	/// Converts the hash to a byte slice
	pub fn to_slice(&self) -> &[u8] {
		&self.0
	}

	/// Hex representation of the hash
	pub fn to_hex(&self) -> String {
		to_hex(&self.0)
	}

	/// Parses an independent hash from its hex representation
	pub fn from_hex(hex: &str) -> Result<IndepHash, String> {
		let mut a = [0; 48];
		from_hex(hex, &mut a)?;
		Ok(IndepHash(a))
	}
}

impl fmt::Display for Hash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

impl fmt::Display for IndepHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

// Abbreviated hex in debug output, the full 96 characters drown logs.
impl fmt::Debug for Hash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", &self.to_hex()[..12])
	}
}

impl fmt::Debug for IndepHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", &self.to_hex()[..12])
	}
}

impl serde::Serialize for Hash {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.to_hex())
	}
}

impl<'de> serde::Deserialize<'de> for Hash {
	fn deserialize<D>(deserializer: D) -> Result<Hash, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		deserializer.deserialize_str(HashVisitor)
	}
}

impl serde::Serialize for IndepHash {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.to_hex())
	}
}

impl<'de> serde::Deserialize<'de> for IndepHash {
	fn deserialize<D>(deserializer: D) -> Result<IndepHash, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		deserializer.deserialize_str(IndepHashVisitor)
	}
}

struct HashVisitor;

impl<'de> de::Visitor<'de> for HashVisitor {
	type Value = Hash;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(formatter, "a 64 character hex string")
	}

	fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		Hash::from_hex(s).map_err(de::Error::custom)
	}
}

struct IndepHashVisitor;

impl<'de> de::Visitor<'de> for IndepHashVisitor {
	type Value = IndepHash;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(formatter, "a 96 character hex string")
	}

	fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
	where
		E: de::Error,
	{
		IndepHash::from_hex(s).map_err(de::Error::custom)
	}
}
