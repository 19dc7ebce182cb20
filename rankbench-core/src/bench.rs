//! Benchmark Descriptors and Registry
//!
//! A descriptor binds a name, a body, a timing policy, and a barrier
//! policy. Configuration happens on a by-value builder whose methods all
//! return `Self`; the descriptor is frozen when it enters a [`Registry`],
//! so a run can never observe a half-configured benchmark.

use crate::state::State;
use crate::timer::TimingPolicy;

/// A benchmark body: iterates its [`State`] to completion exactly once and
/// may set the bytes-processed figure to enable throughput reporting.
pub type BenchmarkFn = Box<dyn Fn(&mut State<'_>) + Send + Sync>;

/// A frozen benchmark descriptor.
pub struct Benchmark {
    name: String,
    policy: TimingPolicy,
    iter_barrier: bool,
    body: BenchmarkFn,
}

impl Benchmark {
    /// The benchmark's name as reported on the console.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The timing policy to materialize a timer from at run time.
    pub fn timing_policy(&self) -> TimingPolicy {
        self.policy
    }

    /// Whether ranks barrier between iterations.
    pub fn iter_barrier(&self) -> bool {
        self.iter_barrier
    }

    /// Invoke the body against a fresh [`State`].
    pub fn run(&self, state: &mut State<'_>) {
        (self.body)(state);
    }
}

/// Fluent configuration for a benchmark before registration.
///
/// Defaults match the registration contract: no instrumentation and the
/// inter-iteration barrier enabled.
pub struct BenchmarkBuilder {
    inner: Benchmark,
}

impl BenchmarkBuilder {
    /// Start configuring a benchmark with the given name and body.
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&mut State<'_>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Benchmark {
                name: name.into(),
                policy: TimingPolicy::default(),
                iter_barrier: true,
                body: Box::new(body),
            },
        }
    }

    /// Record wall time on the root rank only; all other ranks read 0.
    pub fn timing_root_rank(mut self) -> Self {
        self.inner.policy = TimingPolicy::RootOnly;
        self
    }

    /// Record wall time on every rank and take the maximum across ranks at
    /// finalize, so every rank reports the slowest participant's time.
    pub fn timing_max_rank(mut self) -> Self {
        self.inner.policy = TimingPolicy::MaxAcrossRanks;
        self
    }

    /// Record local wall time on every rank with no aggregation.
    pub fn timing_wall(mut self) -> Self {
        self.inner.policy = TimingPolicy::Wall;
        self
    }

    /// Let ranks iterate independently instead of barriering between
    /// iterations.
    pub fn no_iter_barrier(mut self) -> Self {
        self.inner.iter_barrier = false;
        self
    }

    fn freeze(self) -> Benchmark {
        self.inner
    }
}

/// Append-only, insertion-ordered collection of benchmarks for one run.
///
/// Owned by the caller rather than process-global, so tests can build
/// isolated registries.
#[derive(Default)]
pub struct Registry {
    benchmarks: Vec<Benchmark>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze a configured benchmark and append it.
    ///
    /// Duplicate names are accepted — both entries run and report
    /// independently — but flagged, since nothing downstream can tell the
    /// report lines apart.
    pub fn register(&mut self, benchmark: BenchmarkBuilder) {
        let benchmark = benchmark.freeze();
        if self.benchmarks.iter().any(|b| b.name == benchmark.name) {
            tracing::warn!(name = %benchmark.name, "duplicate benchmark name registered");
        }
        self.benchmarks.push(benchmark);
    }

    /// The registered benchmarks in registration order.
    pub fn benchmarks(&self) -> &[Benchmark] {
        &self.benchmarks
    }

    /// Number of registered benchmarks.
    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let mut registry = Registry::new();
        registry.register(BenchmarkBuilder::new("noop", |_state| {}));
        let bench = &registry.benchmarks()[0];
        assert_eq!(bench.name(), "noop");
        assert_eq!(bench.timing_policy(), TimingPolicy::NoOp);
        assert!(bench.iter_barrier());
    }

    #[test]
    fn test_builder_chains() {
        let mut registry = Registry::new();
        registry.register(
            BenchmarkBuilder::new("pingpong", |_state| {})
                .timing_root_rank()
                .no_iter_barrier(),
        );
        let bench = &registry.benchmarks()[0];
        assert_eq!(bench.timing_policy(), TimingPolicy::RootOnly);
        assert!(!bench.iter_barrier());
    }

    #[test]
    fn test_registration_order_preserved() {
        let mut registry = Registry::new();
        for name in ["c", "a", "b"] {
            registry.register(BenchmarkBuilder::new(name, |_state| {}));
        }
        let names: Vec<_> = registry.benchmarks().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_names_accepted() {
        let mut registry = Registry::new();
        registry.register(BenchmarkBuilder::new("twin", |_state| {}));
        registry.register(BenchmarkBuilder::new("twin", |_state| {}).timing_wall());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.benchmarks()[0].timing_policy(), TimingPolicy::NoOp);
        assert_eq!(registry.benchmarks()[1].timing_policy(), TimingPolicy::Wall);
    }
}
