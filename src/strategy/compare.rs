//! Runs the requested strategy models and recommends one

use super::{flip, rental, vacation, Recommendation, StrategyAssumptions, StrategyKind, StrategyResults};
use crate::assumptions::Assumptions;
use crate::error::{EngineError, EngineResult};
use crate::finance::carrying::aggregate;
use crate::property::{AcquisitionInput, FinancingTerms, OperatingExpenseAssumptions};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub strategies: StrategyResults,
    pub recommendation: Recommendation,
}

pub struct StrategyComparator<'a> {
    assumptions: &'a Assumptions,
}

impl<'a> StrategyComparator<'a> {
    pub fn new(assumptions: &'a Assumptions) -> Self {
        Self { assumptions }
    }

    /// Check that every requested strategy carries a valid assumptions block
    pub fn validate(kinds: &[StrategyKind], strategy_assumptions: &StrategyAssumptions) -> EngineResult<()> {
        if kinds.is_empty() {
            return Err(EngineError::validation("strategies", "at least one strategy is required"));
        }

        for kind in kinds {
            let missing = || {
                warn!("Strategy {} requested without assumptions", kind);
                EngineError::validation(
                    format!("assumptions.{}", kind.as_str()),
                    format!("required when the {} strategy is requested", kind.as_str()),
                )
            };
            match kind {
                StrategyKind::Flip => strategy_assumptions.flip.as_ref().ok_or_else(missing)?.validate()?,
                StrategyKind::Rental => strategy_assumptions.rental.as_ref().ok_or_else(missing)?.validate()?,
                StrategyKind::VacationRental => strategy_assumptions
                    .vacation_rental
                    .as_ref()
                    .ok_or_else(missing)?
                    .validate()?,
            }
        }
        Ok(())
    }

    /// Evaluate each requested strategy once and pick the best
    pub fn compare(
        &self,
        acquisition: &AcquisitionInput,
        financing: &FinancingTerms,
        expenses: &OperatingExpenseAssumptions,
        kinds: &[StrategyKind],
        strategy_assumptions: &StrategyAssumptions,
    ) -> EngineResult<StrategyComparison> {
        Self::validate(kinds, strategy_assumptions)?;

        let carrying_costs = aggregate(self.assumptions, acquisition, financing, expenses);
        let requested: BTreeSet<StrategyKind> = kinds.iter().copied().collect();
        let mut results = StrategyResults::default();

        for kind in requested {
            match kind {
                StrategyKind::Flip => {
                    if let Some(assumptions) = &strategy_assumptions.flip {
                        results.flip = Some(flip::evaluate(financing, &carrying_costs, assumptions));
                    }
                }
                StrategyKind::Rental => {
                    if let Some(assumptions) = &strategy_assumptions.rental {
                        results.rental = Some(rental::evaluate(
                            self.assumptions,
                            acquisition,
                            financing,
                            expenses,
                            &carrying_costs,
                            assumptions,
                        )?);
                    }
                }
                StrategyKind::VacationRental => {
                    if let Some(assumptions) = &strategy_assumptions.vacation_rental {
                        results.vacation_rental = Some(vacation::evaluate(
                            self.assumptions,
                            acquisition,
                            financing,
                            &carrying_costs,
                            assumptions,
                        )?);
                    }
                }
            }
        }

        let recommendation = Recommendation::select(&results)
            .ok_or_else(|| EngineError::validation("strategies", "no strategy could be evaluated"))?;
        debug!(
            "Recommended {} among {} strategies",
            recommendation.best_strategy,
            results.returns().len()
        );

        Ok(StrategyComparison {
            strategies: results,
            recommendation,
        })
    }
}
