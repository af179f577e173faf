//! # Riskbench Compute Engine
//!
//! The in-process entry point used by the transaction-processing collaborator.
//! Owns the process-wide worker pool and hands it to every workload at
//! construction, so pool lifetime is the engine's lifetime.

use crate::error::EngineError;
use configuration::Config;
use core_types::{
    DistributedPrimeResult, FraudCheckResult, PortfolioOptimization, PrimeAccountCheck,
    RiskAssessment, RngSource,
};
use executor::{PoolStats, WorkerPool};
use fraud::FraudScorer;
use optimizer::PortfolioOptimizer;
use primes::PrimeSearcher;
use risk::RiskSimulator;
use rust_decimal::Decimal;
use std::sync::Arc;

pub mod error;
pub mod request;

pub use request::{WorkloadOutcome, WorkloadRequest};

/// The central orchestrator for all computational workloads.
pub struct ComputeEngine {
    // --- Shared, Thread-Safe Components ---
    pool: Arc<WorkerPool>,

    // --- Workloads ---
    fraud: FraudScorer,
    risk: RiskSimulator,
    portfolio: PortfolioOptimizer,
    primes: PrimeSearcher,
}

impl ComputeEngine {
    /// Builds the worker pool from `config` and wires every workload to it.
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        config.validate()?;
        let pool = Arc::new(WorkerPool::new(&config.pool)?);
        Ok(Self::with_pool(pool, config.fraud.threshold()))
    }

    /// Wires the workloads to an existing pool.
    pub fn with_pool(pool: Arc<WorkerPool>, fraud_threshold: f64) -> Self {
        Self {
            fraud: FraudScorer::new(Arc::clone(&pool), fraud_threshold),
            risk: RiskSimulator::new(Arc::clone(&pool)),
            portfolio: PortfolioOptimizer::new(Arc::clone(&pool)),
            primes: PrimeSearcher::new(Arc::clone(&pool)),
            pool,
        }
    }

    /// Replaces the random source of the Monte-Carlo risk simulation.
    pub fn with_risk_rng(mut self, rng_source: RngSource) -> Self {
        self.risk = RiskSimulator::new(Arc::clone(&self.pool)).with_rng_source(rng_source);
        self
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn fraud_threshold(&self) -> f64 {
        self.fraud.threshold()
    }

    #[tracing::instrument(name = "check_fraud", skip(self))]
    pub fn check_fraud(
        &self,
        account_id: u64,
        amount: Decimal,
    ) -> Result<FraudCheckResult, EngineError> {
        Ok(self.fraud.check(account_id, amount)?)
    }

    #[tracing::instrument(name = "assess_risk", skip(self))]
    pub fn assess_risk(
        &self,
        account_id: u64,
        balance: Decimal,
    ) -> Result<RiskAssessment, EngineError> {
        Ok(self.risk.assess(account_id, balance)?)
    }

    #[tracing::instrument(name = "optimize_portfolio", skip(self))]
    pub fn optimize_portfolio(
        &self,
        account_id: u64,
        balance: Decimal,
    ) -> Result<PortfolioOptimization, EngineError> {
        Ok(self.portfolio.optimize(account_id, balance)?)
    }

    #[tracing::instrument(name = "search_primes", skip(self))]
    pub fn search_primes(
        &self,
        account_id: u64,
        range_size: usize,
    ) -> Result<DistributedPrimeResult, EngineError> {
        Ok(self.primes.search(account_id, range_size)?)
    }

    #[tracing::instrument(name = "check_prime_account", skip(self))]
    pub fn check_prime_account(&self, account_id: u64) -> Result<PrimeAccountCheck, EngineError> {
        Ok(self.primes.check_prime_account(account_id)?)
    }

    /// Routes a request to the matching workload.
    pub fn execute(&self, request: WorkloadRequest) -> Result<WorkloadOutcome, EngineError> {
        let kind = request.kind();
        tracing::debug!(%kind, sub_tasks = kind.fan_out(), "Dispatching workload.");

        let outcome = match request {
            WorkloadRequest::Fraud { account_id, amount } => {
                WorkloadOutcome::Fraud(self.check_fraud(account_id, amount)?)
            }
            WorkloadRequest::Risk { account_id, balance } => {
                WorkloadOutcome::Risk(self.assess_risk(account_id, balance)?)
            }
            WorkloadRequest::Portfolio { account_id, balance } => {
                WorkloadOutcome::Portfolio(self.optimize_portfolio(account_id, balance)?)
            }
            WorkloadRequest::Primes {
                account_id,
                range_size,
            } => WorkloadOutcome::Primes(self.search_primes(account_id, range_size)?),
            WorkloadRequest::PrimeAccount { account_id } => {
                WorkloadOutcome::PrimeAccount(self.check_prime_account(account_id)?)
            }
        };
        Ok(outcome)
    }
}
