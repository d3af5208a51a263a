//! Mapping from media types to the renderer commands tried for them.
//!
//! A [`RendererTable`] is built once per invocation from the embedded
//! defaults and the user's overrides, and is read-only afterwards. Overrides
//! replace a key's list wholesale; there is no element-wise merge.

mod defaults;
mod overrides;

use std::collections::BTreeMap;
use std::fmt;

use crate::media::MediaType;
use crate::resolver::CommandSpec;

pub use overrides::{RendererOverrides, bootstrap_config, load_overrides};

/// Position of a candidate within the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
	Specific,
	Parent,
	Fallback,
}

impl fmt::Display for Tier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Specific => f.write_str("specific"),
			Self::Parent => f.write_str("parent"),
			Self::Fallback => f.write_str("fallback"),
		}
	}
}

/// One entry of a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
	pub tier: Tier,
	pub media_type: &'a MediaType,
	pub spec: &'a CommandSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererTable {
	entries: BTreeMap<MediaType, Vec<CommandSpec>>,
}

impl RendererTable {
	/// The embedded default table.
	pub fn defaults() -> Self {
		let entries = defaults::DEFAULT_RENDERERS
			.iter()
			.flat_map(|(keys, commands)| {
				keys.iter().map(move |key| {
					let specs = commands.iter().copied().map(CommandSpec::from).collect();
					(MediaType::new(key), specs)
				})
			})
			.collect();
		Self { entries }
	}

	/// A table holding exactly `entries`, without any defaults.
	pub fn from_entries<K, I, C>(entries: I) -> Self
	where
		K: Into<MediaType>,
		C: Into<CommandSpec>,
		I: IntoIterator<Item = (K, Vec<C>)>,
	{
		let entries = entries
			.into_iter()
			.map(|(key, commands)| {
				(
					key.into(),
					commands.into_iter().map(Into::into).collect::<Vec<_>>(),
				)
			})
			.collect();
		Self { entries }
	}

	/// Replace every key present in `overrides` with the override's list.
	pub fn merged(mut self, overrides: RendererOverrides) -> Self {
		for (media_type, commands) in overrides.into_entries() {
			self.entries.insert(media_type, commands);
		}
		self
	}

	/// Commands registered for exactly `media_type`.
	pub fn get(&self, media_type: &MediaType) -> &[CommandSpec] {
		self.entries
			.get(media_type)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Concatenate the lists for `specific`, `parent` and the universal
	/// fallback, in that order. A tier whose key repeats an earlier tier's
	/// key contributes nothing, and `application/octet-stream` only ever
	/// appears as the fallback tier.
	pub fn chain<'a>(
		&'a self,
		specific: &'a MediaType,
		parent: &'a MediaType,
	) -> Vec<Candidate<'a>> {
		let fallback = self
			.entries
			.get_key_value(&MediaType::octet_stream())
			.map(|(key, _)| key);

		let mut tiers: Vec<(Tier, &'a MediaType)> = Vec::with_capacity(3);
		for (tier, key) in [
			(Tier::Specific, Some(specific)),
			(Tier::Parent, Some(parent)),
			(Tier::Fallback, fallback),
		] {
			let Some(key) = key else { continue };
			if key.is_octet_stream() && tier != Tier::Fallback {
				continue;
			}
			if tiers.iter().any(|(_, seen)| *seen == key) {
				continue;
			}
			tiers.push((tier, key));
		}

		tiers
			.into_iter()
			.flat_map(|(tier, key)| self.tier(tier, key))
			.collect()
	}

	fn tier<'a>(
		&'a self,
		tier: Tier,
		key: &'a MediaType,
	) -> impl Iterator<Item = Candidate<'a>> + 'a {
		self.get(key).iter().map(move |spec| Candidate {
			tier,
			media_type: key,
			spec,
		})
	}
}

/// Build the effective table: defaults with `overrides` merged on top.
pub fn build_table(overrides: RendererOverrides) -> RendererTable {
	RendererTable::defaults().merged(overrides)
}
