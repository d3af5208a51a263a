//! The dispatch engine.
//!
//! A preview is a walk through a small state machine:
//!
//! ```text
//! Start -> Classified -> CacheChecked -> ReplayHit ----------------> Done
//!                                     \-> TryCandidate(0..n) -+---> Done
//!                                                             \---> Exhausted
//! ```
//!
//! [`Dispatcher::step`] performs exactly one transition so the ordering and
//! fallback rules can be observed in isolation; [`Dispatcher::dispatch`]
//! drives the machine to a terminal state.

mod executor;

use std::borrow::Cow;
use std::fs;
use std::io::Write;

use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheStore};
use crate::classify::{Classification, classify};
use crate::context::RenderContext;
use crate::error::{PreviewError, Result};
use crate::media::MediaType;
use crate::renderers::{RendererTable, Tier};
use crate::resolver::{CommandSpec, Resolution, Resolver};

pub use executor::{Executor, ShellExecutor};

/// A fallback chain entry, detached from the table it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCandidate {
	pub tier: Tier,
	pub media_type: MediaType,
	pub spec: CommandSpec,
}

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
	/// The program is not on the search path.
	Unavailable,
	/// Already tried earlier in the same chain.
	Repeated,
	/// The process could not be started or exited non-zero.
	Failed(String),
	Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
	pub candidate: PlannedCandidate,
	pub outcome: AttemptOutcome,
}

/// Everything the engine knows once the content has been read.
#[derive(Debug, Clone)]
pub struct Plan {
	pub key: CacheKey,
	pub classification: Classification,
	pub chain: Vec<PlannedCandidate>,
	pub attempts: Vec<Attempt>,
}

impl Plan {
	fn already_attempted(&self, spec: &CommandSpec) -> bool {
		self.attempts
			.iter()
			.any(|attempt| &attempt.candidate.spec == spec)
	}

	fn record(&mut self, candidate: PlannedCandidate, outcome: AttemptOutcome) {
		self.attempts.push(Attempt { candidate, outcome });
	}
}

/// Where the preview bytes came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource {
	Cache,
	Renderer(PlannedCandidate),
}

/// Summary of a finished dispatch.
#[derive(Debug, Clone)]
pub struct DispatchReport {
	pub key: CacheKey,
	pub classification: Classification,
	pub source: PreviewSource,
	pub attempts: Vec<Attempt>,
}

impl DispatchReport {
	pub fn was_cache_hit(&self) -> bool {
		self.source == PreviewSource::Cache
	}

	/// Number of delegate processes that were started.
	pub fn executions(&self) -> usize {
		self.attempts
			.iter()
			.filter(|attempt| {
				matches!(
					attempt.outcome,
					AttemptOutcome::Succeeded | AttemptOutcome::Failed(_)
				)
			})
			.count()
	}
}

#[derive(Debug, Clone)]
pub enum DispatchState {
	Start,
	Classified {
		key: CacheKey,
		classification: Classification,
	},
	CacheChecked {
		plan: Plan,
		hit: bool,
	},
	ReplayHit {
		plan: Plan,
	},
	TryCandidate {
		plan: Plan,
		index: usize,
	},
	Done(DispatchReport),
	Exhausted {
		media_type: MediaType,
		attempts: Vec<Attempt>,
	},
}

impl DispatchState {
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Done(_) | Self::Exhausted { .. })
	}
}

/// Ties the renderer table, resolver, cache and executor together.
#[derive(Debug)]
pub struct Dispatcher<E = ShellExecutor> {
	table: RendererTable,
	resolver: Resolver,
	cache: CacheStore,
	executor: E,
}

impl Dispatcher<ShellExecutor> {
	pub fn new(table: RendererTable, resolver: Resolver, cache: CacheStore) -> Self {
		Self::with_executor(table, resolver, cache, ShellExecutor::default())
	}
}

impl<E: Executor> Dispatcher<E> {
	pub fn with_executor(
		table: RendererTable,
		resolver: Resolver,
		cache: CacheStore,
		executor: E,
	) -> Self {
		Self {
			table,
			resolver,
			cache,
			executor,
		}
	}

	/// Preview `ctx` into `out`, from the cache when possible.
	pub fn dispatch(&self, ctx: &RenderContext, out: &mut dyn Write) -> Result<DispatchReport> {
		let mut state = DispatchState::Start;
		loop {
			state = match self.step(state, ctx, out)? {
				DispatchState::Done(report) => return Ok(report),
				DispatchState::Exhausted { media_type, .. } => {
					return Err(PreviewError::Exhausted { media_type });
				}
				next => next,
			};
		}
	}

	/// Perform a single transition. Terminal states are returned unchanged.
	pub fn step(
		&self,
		state: DispatchState,
		ctx: &RenderContext,
		out: &mut dyn Write,
	) -> Result<DispatchState> {
		match state {
			DispatchState::Start => {
				let content = read_content(ctx)?;
				let key = CacheKey::compute(&content, &ctx.geometry());
				let classification = classify(&content);
				debug!(
					media_type = %classification.media_type,
					parent = %classification.parent,
					key = %key.hex(),
					"classified target"
				);
				Ok(DispatchState::Classified {
					key,
					classification,
				})
			}
			DispatchState::Classified {
				key,
				classification,
			} => {
				let chain = self.plan_chain(&classification);
				let hit = self.cache.lookup(&key);
				Ok(DispatchState::CacheChecked {
					plan: Plan {
						key,
						classification,
						chain,
						attempts: Vec::new(),
					},
					hit,
				})
			}
			DispatchState::CacheChecked { plan, hit: true } => {
				Ok(DispatchState::ReplayHit { plan })
			}
			DispatchState::CacheChecked { plan, hit: false } => {
				Ok(DispatchState::TryCandidate { plan, index: 0 })
			}
			DispatchState::ReplayHit { plan } => {
				debug!(key = %plan.key.hex(), "replaying cached preview");
				self.cache.replay(&plan.key, out)?;
				Ok(DispatchState::Done(DispatchReport {
					key: plan.key,
					classification: plan.classification,
					source: PreviewSource::Cache,
					attempts: plan.attempts,
				}))
			}
			DispatchState::TryCandidate { plan, index } => self.try_candidate(plan, index, ctx, out),
			terminal => Ok(terminal),
		}
	}

	fn plan_chain(&self, classification: &Classification) -> Vec<PlannedCandidate> {
		self.table
			.chain(&classification.media_type, &classification.parent)
			.into_iter()
			.map(|candidate| PlannedCandidate {
				tier: candidate.tier,
				media_type: candidate.media_type.clone(),
				spec: candidate.spec.clone(),
			})
			.collect()
	}

	fn try_candidate(
		&self,
		mut plan: Plan,
		index: usize,
		ctx: &RenderContext,
		out: &mut dyn Write,
	) -> Result<DispatchState> {
		let Some(candidate) = plan.chain.get(index).cloned() else {
			debug!(attempts = plan.attempts.len(), "fallback chain exhausted");
			return Ok(DispatchState::Exhausted {
				media_type: plan.classification.media_type,
				attempts: plan.attempts,
			});
		};
		let next = index + 1;

		if plan.already_attempted(&candidate.spec) {
			debug!(command = %candidate.spec, "skipping candidate tried earlier in the chain");
			plan.record(candidate, AttemptOutcome::Repeated);
			return Ok(DispatchState::TryCandidate { plan, index: next });
		}

		let invocation = match self.resolver.resolve(&candidate.spec, ctx)? {
			Resolution::Available(invocation) => invocation,
			Resolution::Unavailable { program } => {
				warn!("{program}: cannot locate program");
				plan.record(candidate, AttemptOutcome::Unavailable);
				return Ok(DispatchState::TryCandidate { plan, index: next });
			}
		};

		let mut writer = self.cache.open_for_write(&plan.key)?;
		debug!(
			tier = %candidate.tier,
			media_type = %candidate.media_type,
			script = %invocation.script,
			"running renderer"
		);

		let failure = match self.executor.execute(&invocation, ctx, &mut writer) {
			Ok(status) if status.success() => None,
			Ok(status) => Some(format!("exited with {status}")),
			Err(err) => Some(format!("failed to start: {err}")),
		};

		if let Some(reason) = failure {
			warn!("{}: {reason}", candidate.spec);
			plan.record(candidate, AttemptOutcome::Failed(reason));
			return Ok(DispatchState::TryCandidate { plan, index: next });
		}

		writer.commit()?.replay(out)?;
		plan.record(candidate.clone(), AttemptOutcome::Succeeded);
		Ok(DispatchState::Done(DispatchReport {
			key: plan.key,
			classification: plan.classification,
			source: PreviewSource::Renderer(candidate),
			attempts: plan.attempts,
		}))
	}
}

fn read_content(ctx: &RenderContext) -> Result<Cow<'_, [u8]>> {
	match ctx.content() {
		Some(content) => Ok(Cow::Borrowed(content)),
		None => fs::read(ctx.path())
			.map(Cow::Owned)
			.map_err(|source| PreviewError::Read {
				path: ctx.path().to_path_buf(),
				source,
			}),
	}
}
