//! Parameter sets folded into the signature base string.

// std
use std::slice::Iter;
// self
use crate::{_prelude::*, oauth::encode};

/// Name/value mapping of OAuth and request parameters.
///
/// Insertion order is irrelevant to signing: [`normalized`](Self::normalized) sorts the
/// encoded pairs by key, then by value. Insertion order is kept only for building query
/// strings, where it is cosmetic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet(Vec<(String, String)>);
impl ParameterSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`, replacing any previous value for the same key.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();

		match self.0.iter_mut().find(|(existing, _)| *existing == key) {
			Some(slot) => slot.1 = value,
			None => self.0.push((key, value)),
		}
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(key, value);

		self
	}

	/// Returns the value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(existing, _)| existing == key).map(|(_, value)| value.as_str())
	}

	/// Returns true if `key` is present.
	pub fn contains(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no parameters are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over raw (unencoded) pairs in insertion order.
	pub fn iter(&self) -> Iter<'_, (String, String)> {
		self.0.iter()
	}

	/// Copies every pair from `other`, replacing values of shared keys.
	pub fn merge(&mut self, other: &ParameterSet) {
		for (key, value) in other.iter() {
			self.insert(key.as_str(), value.as_str());
		}
	}

	/// Encoded pairs sorted by encoded key, then encoded value.
	pub fn encoded_sorted(&self) -> Vec<(String, String)> {
		let mut pairs: Vec<(String, String)> =
			self.0.iter().map(|(key, value)| (encode(key), encode(value))).collect();

		pairs.sort();

		pairs
	}

	/// Normalized parameter string: sorted `key=value` pairs joined with `&`.
	pub fn normalized(&self) -> String {
		self.encoded_sorted()
			.into_iter()
			.map(|(key, value)| format!("{key}={value}"))
			.collect::<Vec<_>>()
			.join("&")
	}

	/// Encoded query string in insertion order, or `None` when the set is empty.
	pub fn to_query(&self) -> Option<String> {
		if self.is_empty() {
			return None;
		}

		Some(
			self.0
				.iter()
				.map(|(key, value)| format!("{}={}", encode(key), encode(value)))
				.collect::<Vec<_>>()
				.join("&"),
		)
	}
}
impl<K, V> FromIterator<(K, V)> for ParameterSet
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut set = Self::new();

		for (key, value) in iter {
			set.insert(key, value);
		}

		set
	}
}
impl<'a> IntoIterator for &'a ParameterSet {
	type IntoIter = Iter<'a, (String, String)>;
	type Item = &'a (String, String);

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
