use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use switchboard_core::{ModelDescriptor, Provider, Tier};

use crate::error::LedgerError;
use crate::stats::CostStats;
use crate::store::{JsonFileStore, StatsStore};

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Usage of one completed backend call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedUsage {
    pub tier: Tier,
    pub provider: Provider,
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// USD per million input tokens
    pub input_price_per_mtok: f64,
    /// USD per million output tokens
    pub output_price_per_mtok: f64,
}

impl TrackedUsage {
    /// Usage priced from a catalog model
    pub const fn for_model(model: &ModelDescriptor, input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            tier: model.tier,
            provider: model.provider,
            input_tokens,
            output_tokens,
            input_price_per_mtok: model.input_price_per_mtok,
            output_price_per_mtok: model.output_price_per_mtok,
        }
    }

    /// Cost in USD
    #[allow(clippy::cast_precision_loss)]
    pub fn cost(&self) -> f64 {
        (self.input_tokens as f64 / TOKENS_PER_MILLION) * self.input_price_per_mtok
            + (self.output_tokens as f64 / TOKENS_PER_MILLION) * self.output_price_per_mtok
    }

    fn validate(&self) -> Result<(), LedgerError> {
        for (name, price) in [
            ("input price", self.input_price_per_mtok),
            ("output price", self.output_price_per_mtok),
        ] {
            if !price.is_finite() || price < 0.0 {
                return Err(LedgerError::InvalidUsage(format!(
                    "{name} must be a non-negative number, got {price}"
                )));
            }
        }
        Ok(())
    }
}

/// Cumulative spend, persisted after every change
///
/// Mutations hold the write lock across update and save, so readers never
/// see a half-applied request and concurrent writers never interleave.
pub struct CostLedger {
    store: Box<dyn StatsStore>,
    stats: RwLock<CostStats>,
}

impl CostLedger {
    /// Open a ledger over the given store
    ///
    /// A store that cannot be read yields a zeroed ledger.
    pub fn open(store: Box<dyn StatsStore>) -> Self {
        let stats = match store.load() {
            Ok(Some(stats)) => {
                tracing::debug!(
                    total_requests = stats.total_requests,
                    total_cost = stats.total_cost,
                    "loaded cost ledger"
                );
                stats
            }
            Ok(None) => CostStats::zeroed(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load cost ledger, starting from zero");
                CostStats::zeroed()
            }
        };

        Self {
            store,
            stats: RwLock::new(stats),
        }
    }

    /// Open a ledger backed by a JSON file
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(Box::new(JsonFileStore::new(path)))
    }

    /// Account one completed request and return its cost
    pub fn track_request(&self, usage: &TrackedUsage) -> Result<f64, LedgerError> {
        usage.validate()?;
        let cost = usage.cost();

        // Counters saturate so nothing below can panic with a half-applied update
        let mut stats = self.write();
        stats.total_requests = stats.total_requests.saturating_add(1);
        stats.total_cost += cost;
        *stats.cost_by_tier.entry(usage.tier).or_insert(0.0) += cost;
        *stats.cost_by_provider.entry(usage.provider).or_insert(0.0) += cost;
        let tokens = stats.tokens_by_tier.entry(usage.tier).or_default();
        tokens.input = tokens.input.saturating_add(usage.input_tokens);
        tokens.output = tokens.output.saturating_add(usage.output_tokens);

        self.persist(&stats);
        drop(stats);

        tracing::debug!(
            tier = %usage.tier,
            provider = %usage.provider,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            cost,
            "tracked request"
        );

        Ok(cost)
    }

    /// Independent copy of the current aggregate
    pub fn snapshot(&self) -> CostStats {
        self.read().clone()
    }

    /// Zero every counter and persist immediately
    pub fn reset(&self) {
        let mut stats = self.write();
        *stats = CostStats::zeroed();
        self.persist(&stats);
        drop(stats);

        tracing::info!("cost ledger reset");
    }

    /// Human-readable report of the aggregate
    #[allow(clippy::cast_precision_loss)]
    pub fn summarize(&self) -> String {
        let stats = self.read();

        let average = if stats.total_requests > 0 {
            format!("{:.4}", stats.total_cost / stats.total_requests as f64)
        } else {
            "0".to_owned()
        };

        let mut out = String::from("Switchboard cost ledger:\n\n");
        let _ = writeln!(out, "Total Requests: {}", stats.total_requests);
        let _ = writeln!(out, "Total Cost:     ${:.4}", stats.total_cost);
        let _ = writeln!(out, "Total Tokens:   {}", group_thousands(stats.total_tokens()));
        let _ = writeln!(out, "Avg Cost/Req:   ${average}");

        out.push_str("\nBy Tier:\n");
        for (tier, cost) in &stats.cost_by_tier {
            push_breakdown_line(&mut out, &tier.to_string(), *cost, stats.total_cost);
        }

        out.push_str("\nBy Provider:\n");
        for (provider, cost) in &stats.cost_by_provider {
            push_breakdown_line(&mut out, &provider.to_string(), *cost, stats.total_cost);
        }

        out.truncate(out.trim_end().len());
        out
    }

    fn persist(&self, stats: &CostStats) {
        if let Err(e) = self.store.save(stats) {
            tracing::error!(error = %e, "failed to persist cost ledger, keeping in-memory state");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CostStats> {
        self.stats.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CostStats> {
        self.stats.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for CostLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostLedger")
            .field("stats", &*self.read())
            .finish_non_exhaustive()
    }
}

fn push_breakdown_line(out: &mut String, name: &str, cost: f64, total: f64) {
    let pct = if total > 0.0 { cost / total * 100.0 } else { 0.0 };
    let _ = writeln!(out, "   {name:<10} ${cost:.4} ({pct:.1}%)");
}

/// `1234567` -> `1,234,567`
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::*;

    const EPS: f64 = 1e-9;

    /// In-memory store that counts saves
    #[derive(Default)]
    struct MemoryStore {
        saved: Arc<Mutex<Option<CostStats>>>,
        saves: Arc<Mutex<usize>>,
    }

    impl StatsStore for MemoryStore {
        fn load(&self) -> Result<Option<CostStats>, LedgerError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&self, stats: &CostStats) -> Result<(), LedgerError> {
            *self.saved.lock().unwrap() = Some(stats.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct BrokenStore;

    impl StatsStore for BrokenStore {
        fn load(&self) -> Result<Option<CostStats>, LedgerError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn save(&self, _stats: &CostStats) -> Result<(), LedgerError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    fn usage(tier: Tier, provider: Provider, input: u64, output: u64, pin: f64, pout: f64) -> TrackedUsage {
        TrackedUsage {
            tier,
            provider,
            input_tokens: input,
            output_tokens: output,
            input_price_per_mtok: pin,
            output_price_per_mtok: pout,
        }
    }

    fn memory_ledger() -> CostLedger {
        CostLedger::open(Box::new(MemoryStore::default()))
    }

    fn assert_buckets_consistent(stats: &CostStats) {
        let by_tier: f64 = stats.cost_by_tier.values().sum();
        let by_provider: f64 = stats.cost_by_provider.values().sum();
        assert!((by_tier - stats.total_cost).abs() < EPS);
        assert!((by_provider - stats.total_cost).abs() < EPS);
    }

    #[test]
    fn tracks_medium_openai_request() {
        let ledger = memory_ledger();
        let cost = ledger
            .track_request(&usage(Tier::Medium, Provider::Openai, 1_000_000, 500_000, 0.15, 0.60))
            .unwrap();

        assert!((cost - 0.45).abs() < EPS);
        let stats = ledger.snapshot();
        assert_eq!(stats.total_requests, 1);
        assert!((stats.total_cost - 0.45).abs() < EPS);
        assert!((stats.tier_cost(Tier::Medium) - 0.45).abs() < EPS);
        assert!((stats.provider_cost(Provider::Openai) - 0.45).abs() < EPS);
        assert_eq!(stats.tier_tokens(Tier::Medium).input, 1_000_000);
        assert_eq!(stats.tier_tokens(Tier::Medium).output, 500_000);
    }

    #[test]
    fn every_mutation_is_saved() {
        let store = MemoryStore::default();
        let saves = Arc::clone(&store.saves);
        let saved = Arc::clone(&store.saved);
        let ledger = CostLedger::open(Box::new(store));

        ledger
            .track_request(&usage(Tier::Simple, Provider::Groq, 100, 100, 0.59, 0.79))
            .unwrap();
        ledger
            .track_request(&usage(Tier::Simple, Provider::Groq, 100, 100, 0.59, 0.79))
            .unwrap();
        assert_eq!(*saves.lock().unwrap(), 2);
        assert_eq!(saved.lock().unwrap().as_ref(), Some(&ledger.snapshot()));

        ledger.reset();
        assert_eq!(*saves.lock().unwrap(), 3);
        assert_eq!(saved.lock().unwrap().clone(), Some(CostStats::zeroed()));
    }

    #[test]
    fn tracking_is_order_independent() {
        let a = usage(Tier::Complex, Provider::Anthropic, 2_000, 1_000, 3.0, 15.0);
        let b = usage(Tier::Simple, Provider::Google, 50_000, 10_000, 0.075, 0.3);

        let first = memory_ledger();
        first.track_request(&a).unwrap();
        first.track_request(&b).unwrap();

        let second = memory_ledger();
        second.track_request(&b).unwrap();
        second.track_request(&a).unwrap();

        let (x, y) = (first.snapshot(), second.snapshot());
        assert_eq!(x.total_requests, y.total_requests);
        assert!((x.total_cost - y.total_cost).abs() < EPS);
        assert_eq!(x.tokens_by_tier, y.tokens_by_tier);
        for tier in [Tier::Simple, Tier::Medium, Tier::Complex, Tier::Reasoning] {
            assert!((x.tier_cost(tier) - y.tier_cost(tier)).abs() < EPS);
        }
    }

    #[test]
    fn snapshot_is_independent() {
        let ledger = memory_ledger();
        let mut copy = ledger.snapshot();
        copy.total_requests = 42;
        copy.cost_by_tier.insert(Tier::Reasoning, 9.0);

        assert_eq!(ledger.snapshot(), CostStats::zeroed());
    }

    #[test]
    fn reset_matches_fresh_ledger() {
        let ledger = memory_ledger();
        ledger
            .track_request(&usage(Tier::Reasoning, Provider::Openai, 10_000, 10_000, 1.1, 4.4))
            .unwrap();
        ledger.reset();

        assert_eq!(ledger.snapshot(), memory_ledger().snapshot());
    }

    #[test]
    fn rejects_invalid_prices_without_mutating() {
        let ledger = memory_ledger();

        for (pin, pout) in [(-1.0, 1.0), (1.0, f64::NAN), (f64::INFINITY, 0.0)] {
            let err = ledger
                .track_request(&usage(Tier::Simple, Provider::Groq, 10, 10, pin, pout))
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidUsage(_)));
        }
        assert_eq!(ledger.snapshot(), CostStats::zeroed());
    }

    #[test]
    fn zero_tokens_count_as_a_request() {
        let ledger = memory_ledger();
        let cost = ledger
            .track_request(&usage(Tier::Simple, Provider::Google, 0, 0, 0.075, 0.3))
            .unwrap();

        assert!(cost.abs() < EPS);
        assert_eq!(ledger.snapshot().total_requests, 1);
    }

    #[test]
    fn unreadable_store_starts_from_zero_and_keeps_memory_state() {
        let ledger = CostLedger::open(Box::new(BrokenStore));
        assert_eq!(ledger.snapshot(), CostStats::zeroed());

        let cost = ledger
            .track_request(&usage(Tier::Complex, Provider::Openai, 1_000_000, 0, 2.5, 10.0))
            .unwrap();
        assert!((cost - 2.5).abs() < EPS);
        assert_eq!(ledger.snapshot().total_requests, 1);
    }

    #[test]
    fn reopening_a_file_ledger_restores_totals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let ledger = CostLedger::open_file(&path);
        ledger
            .track_request(&usage(Tier::Complex, Provider::Anthropic, 4_000, 2_000, 3.0, 15.0))
            .unwrap();
        let before = ledger.snapshot();
        drop(ledger);

        let reopened = CostLedger::open_file(&path);
        assert_eq!(reopened.snapshot(), before);
    }

    #[test]
    fn corrupt_file_falls_back_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "totalRequests = 7").unwrap();

        let ledger = CostLedger::open_file(&path);
        assert_eq!(ledger.snapshot(), CostStats::zeroed());
    }

    #[test]
    fn concurrent_tracking_loses_nothing() {
        let ledger = Arc::new(memory_ledger());
        let providers = [Provider::Anthropic, Provider::Google, Provider::Groq, Provider::Openai];

        let handles: Vec<_> = providers
            .into_iter()
            .map(|provider| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    for _ in 0..50 {
                        ledger
                            .track_request(&usage(Tier::Medium, provider, 1_000, 500, 1.0, 2.0))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = ledger.snapshot();
        assert_eq!(stats.total_requests, 200);
        assert_eq!(stats.tier_tokens(Tier::Medium).input, 200_000);
        assert_eq!(stats.tier_tokens(Tier::Medium).output, 100_000);
        // each request costs 0.001 + 0.001
        assert!((stats.total_cost - 0.4).abs() < EPS);
        assert_buckets_consistent(&stats);
    }

    #[test]
    fn buckets_sum_to_total() {
        let ledger = memory_ledger();
        ledger
            .track_request(&usage(Tier::Simple, Provider::Google, 12_345, 678, 0.075, 0.3))
            .unwrap();
        ledger
            .track_request(&usage(Tier::Complex, Provider::Anthropic, 9_000, 3_000, 3.0, 15.0))
            .unwrap();
        ledger
            .track_request(&usage(Tier::Reasoning, Provider::Openai, 1_000, 20_000, 1.1, 4.4))
            .unwrap();

        assert_buckets_consistent(&ledger.snapshot());
    }

    #[test]
    fn empty_summary_has_zero_percentages() {
        let summary = memory_ledger().summarize();

        assert!(summary.contains("Total Requests: 0"));
        assert!(summary.contains("Total Cost:     $0.0000"));
        assert!(summary.contains("Avg Cost/Req:   $0\n"));
        assert!(summary.contains("   SIMPLE     $0.0000 (0.0%)"));
        assert!(summary.contains("   openai     $0.0000 (0.0%)"));
    }

    #[test]
    fn summary_reports_breakdown() {
        let ledger = memory_ledger();
        ledger
            .track_request(&usage(Tier::Medium, Provider::Openai, 1_000_000, 500_000, 0.15, 0.60))
            .unwrap();
        ledger
            .track_request(&usage(Tier::Complex, Provider::Anthropic, 1_000_000, 0, 0.45, 0.0))
            .unwrap();

        let summary = ledger.summarize();
        assert!(summary.contains("Total Requests: 2"));
        assert!(summary.contains("Total Cost:     $0.9000"));
        assert!(summary.contains("Total Tokens:   2,500,000"));
        assert!(summary.contains("Avg Cost/Req:   $0.4500"));
        assert!(summary.contains("   MEDIUM     $0.4500 (50.0%)"));
        assert!(summary.contains("   anthropic  $0.4500 (50.0%)"));
        assert!(summary.contains("   REASONING  $0.0000 (0.0%)"));
    }

    #[test]
    fn huge_token_counts_saturate() {
        let store = MemoryStore::default();
        let saved = Arc::clone(&store.saved);
        let ledger = CostLedger::open(Box::new(store));
        let huge = usage(Tier::Complex, Provider::Openai, u64::MAX, 1, 1.0, 1.0);

        ledger.track_request(&huge).unwrap();
        let again = {
            let ledger = &ledger;
            thread::scope(|s| s.spawn(move || ledger.track_request(&huge)).join())
        };
        assert!(again.is_ok_and(|r| r.is_ok()));

        let stats = ledger.snapshot();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.tier_tokens(Tier::Complex).input, u64::MAX);
        assert_eq!(stats.tier_tokens(Tier::Complex).output, 2);
        assert_eq!(stats.total_tokens(), u64::MAX);
        assert_buckets_consistent(&stats);
        // memory and the last save agree
        assert_eq!(saved.lock().unwrap().as_ref(), Some(&stats));

        let summary = ledger.summarize();
        assert!(summary.contains("Total Requests: 2"));
        assert!(summary.contains("Total Tokens:   18,446,744,073,709,551,615"));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
