use log::trace;

use crate::basic_types::EmptyDomain;
use crate::basic_types::Interval;
use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::basic_types::Trail;
use crate::basic_types::Value;
use crate::containers::KeyedVec;
use crate::engine::predicates::Predicate;
use crate::engine::variables::Domain;
use crate::engine::variables::DomainSpec;
use crate::engine::variables::IntegerDomain;
use crate::engine::variables::RealDomain;
use crate::engine::variables::VarId;
use crate::engine::variables::VariableKind;
use crate::gourd_assert_simple;

/// Slack used when rounding a real-valued bound onto the integers, so that `2.9999999999` counts
/// as `3`.
pub(crate) const INTEGRALITY_TOLERANCE: f64 = 1e-9;

/// Propagators may only shrink a real domain by at least this fraction of its width. Smaller
/// updates are dropped so that chains of real constraints reach a fixpoint quickly.
const REAL_PROPAGATION_RATIO: f64 = 0.01;

#[derive(Clone, Debug)]
enum VariableDomain {
    Integer(IntegerDomain),
    Real(RealDomain),
}

/// Who created a variable. Search branches on model variables before reification variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VariableOrigin {
    Model,
    Reification,
}

#[derive(Clone, Copy, Debug)]
enum DomainChange {
    IntegerBounds { lower_bound: i32, upper_bound: i32 },
    Hole(i32),
    RealBounds { lower_bound: f64, upper_bound: f64 },
}

/// The previous state of a domain, recorded before it is changed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TrailEntry {
    variable: VarId,
    change: DomainChange,
}

/// Owns every variable and its current domain.
///
/// All changes go through the trail, so the store can be brought back to any earlier checkpoint.
/// Changed variables are collected until the propagation engine drains them.
#[derive(Clone, Debug, Default)]
pub(crate) struct VariableStore {
    trail: Trail<TrailEntry>,
    domains: KeyedVec<VarId, VariableDomain>,
    origins: KeyedVec<VarId, VariableOrigin>,
    initial_bounds: KeyedVec<VarId, Interval>,
    modified: Vec<VarId>,
}

impl VariableStore {
    pub(crate) fn grow_integer(
        &mut self,
        domain_spec: &DomainSpec,
        origin: VariableOrigin,
    ) -> Result<VarId, ModelError> {
        let domain = match domain_spec {
            DomainSpec::Interval { lower, upper } => {
                if lower > upper {
                    return Err(ModelError::InvalidBounds {
                        lower: *lower as f64,
                        upper: *upper as f64,
                    });
                }
                IntegerDomain::new(*lower, *upper)
            }
            DomainSpec::Values(values) => {
                if values.is_empty() {
                    return Err(ModelError::EmptyDomain);
                }
                let mut values = values.clone();
                values.sort_unstable();
                values.dedup();
                IntegerDomain::from_sorted_values(&values)
            }
        };

        let bounds = Interval::new(domain.lower_bound() as f64, domain.upper_bound() as f64);
        Ok(self.push_domain(VariableDomain::Integer(domain), origin, bounds))
    }

    pub(crate) fn grow_real(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        epsilon: f64,
    ) -> Result<VarId, ModelError> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(ModelError::InvalidPrecision(epsilon));
        }
        if !(lower_bound.is_finite() && upper_bound.is_finite() && lower_bound <= upper_bound) {
            return Err(ModelError::InvalidBounds {
                lower: lower_bound,
                upper: upper_bound,
            });
        }

        let domain = RealDomain::new(lower_bound, upper_bound, epsilon);
        Ok(self.push_domain(
            VariableDomain::Real(domain),
            VariableOrigin::Model,
            Interval::new(lower_bound, upper_bound),
        ))
    }

    /// Creates the 0/1 truth variable of a constraint.
    pub(crate) fn grow_truth_variable(&mut self) -> VarId {
        self.push_domain(
            VariableDomain::Integer(IntegerDomain::new(0, 1)),
            VariableOrigin::Reification,
            Interval::new(0.0, 1.0),
        )
    }

    fn push_domain(
        &mut self,
        domain: VariableDomain,
        origin: VariableOrigin,
        bounds: Interval,
    ) -> VarId {
        let variable = self.domains.push(domain);
        let _ = self.origins.push(origin);
        let _ = self.initial_bounds.push(bounds);
        variable
    }

    pub(crate) fn num_variables(&self) -> usize {
        self.domains.len()
    }

    pub(crate) fn variables(&self) -> impl Iterator<Item = VarId> + '_ {
        self.domains.keys()
    }

    pub(crate) fn is_known(&self, variable: VarId) -> bool {
        self.domains.get(variable).is_some()
    }

    pub(crate) fn origin(&self, variable: VarId) -> VariableOrigin {
        self.origins[variable]
    }

    pub(crate) fn kind(&self, variable: VarId) -> VariableKind {
        match &self.domains[variable] {
            VariableDomain::Integer(_) => VariableKind::Integer,
            VariableDomain::Real(domain) => VariableKind::Real {
                epsilon: domain.epsilon(),
            },
        }
    }

    pub(crate) fn is_integer(&self, variable: VarId) -> bool {
        matches!(self.domains[variable], VariableDomain::Integer(_))
    }

    /// The precision of a real variable; zero for integer variables.
    pub(crate) fn epsilon(&self, variable: VarId) -> f64 {
        match &self.domains[variable] {
            VariableDomain::Integer(_) => 0.0,
            VariableDomain::Real(domain) => domain.epsilon(),
        }
    }

    pub(crate) fn bounds(&self, variable: VarId) -> Interval {
        match &self.domains[variable] {
            VariableDomain::Integer(domain) => Interval::new(
                domain.lower_bound() as f64,
                domain.upper_bound() as f64,
            ),
            VariableDomain::Real(domain) => domain.bounds(),
        }
    }

    /// The bounds the variable was created with.
    pub(crate) fn initial_bounds(&self, variable: VarId) -> Interval {
        self.initial_bounds[variable]
    }

    pub(crate) fn integer_domain(&self, variable: VarId) -> Option<&IntegerDomain> {
        match &self.domains[variable] {
            VariableDomain::Integer(domain) => Some(domain),
            VariableDomain::Real(_) => None,
        }
    }

    pub(crate) fn is_instantiated(&self, variable: VarId) -> bool {
        match &self.domains[variable] {
            VariableDomain::Integer(domain) => domain.is_fixed(),
            VariableDomain::Real(domain) => domain.is_instantiated(),
        }
    }

    pub(crate) fn all_instantiated(&self) -> bool {
        self.variables().all(|variable| self.is_instantiated(variable))
    }

    /// The number of values left in an integer domain, or the number of `epsilon`-wide slices of
    /// a real domain.
    pub(crate) fn domain_size(&self, variable: VarId) -> u64 {
        match &self.domains[variable] {
            VariableDomain::Integer(domain) => domain.size(),
            VariableDomain::Real(domain) => {
                ((domain.bounds().width() / domain.epsilon()).ceil() as u64).max(1)
            }
        }
    }

    pub(crate) fn domain(&self, variable: VarId) -> Domain {
        match &self.domains[variable] {
            VariableDomain::Integer(domain) => Domain::Integer {
                lower_bound: domain.lower_bound(),
                upper_bound: domain.upper_bound(),
                holes: domain.holes_within_bounds(),
            },
            VariableDomain::Real(domain) => Domain::Real {
                lower_bound: domain.lower_bound(),
                upper_bound: domain.upper_bound(),
                epsilon: domain.epsilon(),
            },
        }
    }

    pub(crate) fn value(&self, variable: VarId) -> Option<Value> {
        match &self.domains[variable] {
            VariableDomain::Integer(domain) => domain
                .is_fixed()
                .then(|| Value::Integer(domain.lower_bound())),
            VariableDomain::Real(domain) => domain.is_instantiated().then(|| Value::Real {
                lower: domain.lower_bound(),
                upper: domain.upper_bound(),
            }),
        }
    }

    /// Snapshots the current assignment; `None` if some variable is not instantiated.
    pub(crate) fn solution(&self) -> Option<Solution> {
        self.variables()
            .map(|variable| self.value(variable))
            .collect::<Option<KeyedVec<VarId, Value>>>()
            .map(Solution::new)
    }

    /// The truth value of a 0/1 integer variable, if it is fixed.
    pub(crate) fn boolean_value(&self, variable: VarId) -> Option<bool> {
        let domain = self.integer_domain(variable)?;
        if domain.lower_bound() >= 1 {
            Some(true)
        } else if domain.upper_bound() <= 0 {
            Some(false)
        } else {
            None
        }
    }

    pub(crate) fn fix_boolean(&mut self, variable: VarId, value: bool) -> Result<bool, EmptyDomain> {
        let value = if value { 1.0 } else { 0.0 };
        let lower_changed = self.tighten_lower_bound(variable, value)?;
        let upper_changed = self.tighten_upper_bound(variable, value)?;
        Ok(lower_changed || upper_changed)
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    #[cfg(test)]
    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    /// Undoes every change made after `checkpoint` was opened.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) {
        for entry in self.trail.synchronise(checkpoint) {
            match (&mut self.domains[entry.variable], entry.change) {
                (
                    VariableDomain::Integer(domain),
                    DomainChange::IntegerBounds {
                        lower_bound,
                        upper_bound,
                    },
                ) => domain.set_bounds(lower_bound, upper_bound),
                (VariableDomain::Integer(domain), DomainChange::Hole(value)) => {
                    domain.remove_hole(value)
                }
                (
                    VariableDomain::Real(domain),
                    DomainChange::RealBounds {
                        lower_bound,
                        upper_bound,
                    },
                ) => domain.set_bounds(lower_bound, upper_bound),
                (_, change) => {
                    gourd_assert_simple!(
                        false,
                        "trail entry {change:?} does not match the kind of {}",
                        entry.variable
                    );
                }
            }
        }
        self.modified.clear();
    }

    /// Takes the variables which changed since the last call.
    pub(crate) fn drain_modified(&mut self) -> std::vec::Drain<'_, VarId> {
        self.modified.drain(..)
    }

    pub(crate) fn clear_modified(&mut self) {
        self.modified.clear();
    }

    /// Intersects the domain with `interval`, as a propagator would. Integer domains are rounded
    /// inwards; real domains ignore updates which are small relative to their width.
    ///
    /// Returns whether the domain changed.
    pub(crate) fn tighten(&mut self, variable: VarId, interval: Interval) -> Result<bool, EmptyDomain> {
        let threshold = match &self.domains[variable] {
            VariableDomain::Integer(_) => 0.0,
            VariableDomain::Real(domain) => domain
                .resolution()
                .max(domain.bounds().width() * REAL_PROPAGATION_RATIO),
        };

        let lower_changed = self.tighten_lower_bound_with(variable, interval.lower, threshold)?;
        let upper_changed = self.tighten_upper_bound_with(variable, interval.upper, threshold)?;
        Ok(lower_changed || upper_changed)
    }

    pub(crate) fn tighten_lower_bound(&mut self, variable: VarId, bound: f64) -> Result<bool, EmptyDomain> {
        self.tighten_lower_bound_with(variable, bound, 0.0)
    }

    pub(crate) fn tighten_upper_bound(&mut self, variable: VarId, bound: f64) -> Result<bool, EmptyDomain> {
        self.tighten_upper_bound_with(variable, bound, 0.0)
    }

    fn tighten_lower_bound_with(
        &mut self,
        variable: VarId,
        bound: f64,
        threshold: f64,
    ) -> Result<bool, EmptyDomain> {
        if bound.is_nan() {
            return Ok(false);
        }

        match &mut self.domains[variable] {
            VariableDomain::Integer(domain) => {
                let bound = (bound - INTEGRALITY_TOLERANCE).ceil();
                if bound <= domain.lower_bound() as f64 {
                    return Ok(false);
                }
                if bound > domain.upper_bound() as f64 {
                    return Err(EmptyDomain(variable));
                }
                let new_lower_bound = domain
                    .first_value_from(bound as i32)
                    .ok_or(EmptyDomain(variable))?;

                self.trail.push(TrailEntry {
                    variable,
                    change: DomainChange::IntegerBounds {
                        lower_bound: domain.lower_bound(),
                        upper_bound: domain.upper_bound(),
                    },
                });
                domain.set_bounds(new_lower_bound, domain.upper_bound());
            }
            VariableDomain::Real(domain) => {
                let resolution = domain.resolution();
                if bound <= domain.lower_bound() + resolution.max(threshold) {
                    return Ok(false);
                }
                if bound > domain.upper_bound() + resolution {
                    return Err(EmptyDomain(variable));
                }

                self.trail.push(TrailEntry {
                    variable,
                    change: DomainChange::RealBounds {
                        lower_bound: domain.lower_bound(),
                        upper_bound: domain.upper_bound(),
                    },
                });
                domain.set_bounds(bound.min(domain.upper_bound()), domain.upper_bound());
            }
        }

        trace!("{variable} >= {bound}");
        self.modified.push(variable);
        Ok(true)
    }

    fn tighten_upper_bound_with(
        &mut self,
        variable: VarId,
        bound: f64,
        threshold: f64,
    ) -> Result<bool, EmptyDomain> {
        if bound.is_nan() {
            return Ok(false);
        }

        match &mut self.domains[variable] {
            VariableDomain::Integer(domain) => {
                let bound = (bound + INTEGRALITY_TOLERANCE).floor();
                if bound >= domain.upper_bound() as f64 {
                    return Ok(false);
                }
                if bound < domain.lower_bound() as f64 {
                    return Err(EmptyDomain(variable));
                }
                let new_upper_bound = domain
                    .last_value_up_to(bound as i32)
                    .ok_or(EmptyDomain(variable))?;

                self.trail.push(TrailEntry {
                    variable,
                    change: DomainChange::IntegerBounds {
                        lower_bound: domain.lower_bound(),
                        upper_bound: domain.upper_bound(),
                    },
                });
                domain.set_bounds(domain.lower_bound(), new_upper_bound);
            }
            VariableDomain::Real(domain) => {
                let resolution = domain.resolution();
                if bound >= domain.upper_bound() - resolution.max(threshold) {
                    return Ok(false);
                }
                if bound < domain.lower_bound() - resolution {
                    return Err(EmptyDomain(variable));
                }

                self.trail.push(TrailEntry {
                    variable,
                    change: DomainChange::RealBounds {
                        lower_bound: domain.lower_bound(),
                        upper_bound: domain.upper_bound(),
                    },
                });
                domain.set_bounds(domain.lower_bound(), bound.max(domain.lower_bound()));
            }
        }

        trace!("{variable} <= {bound}");
        self.modified.push(variable);
        Ok(true)
    }

    /// Removes `value` from an integer domain. Removing a bound moves the bound past any holes.
    pub(crate) fn remove_value(&mut self, variable: VarId, value: i32) -> Result<bool, EmptyDomain> {
        let Some(domain) = self.integer_domain(variable) else {
            return Ok(false);
        };
        if !domain.contains(value) {
            return Ok(false);
        }
        if domain.is_fixed() {
            return Err(EmptyDomain(variable));
        }
        let (lower_bound, upper_bound) = (domain.lower_bound(), domain.upper_bound());

        if value == lower_bound {
            return self.tighten_lower_bound(variable, value as f64 + 1.0);
        }
        if value == upper_bound {
            return self.tighten_upper_bound(variable, value as f64 - 1.0);
        }

        if let VariableDomain::Integer(domain) = &mut self.domains[variable] {
            domain.insert_hole(value);
        }
        self.trail.push(TrailEntry {
            variable,
            change: DomainChange::Hole(value),
        });
        trace!("{variable} != {value}");
        self.modified.push(variable);
        Ok(true)
    }

    /// Makes `predicate` true. Returns whether any domain changed.
    pub(crate) fn post(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        let variable = predicate.variable();
        let is_integer = self.is_integer(variable);

        match predicate {
            Predicate::LowerBound { lower_bound, .. } => {
                self.tighten_lower_bound(variable, lower_bound)
            }
            Predicate::StrictLowerBound { lower_bound, .. } => {
                let bound = if is_integer {
                    lower_bound.floor() + 1.0
                } else {
                    lower_bound
                };
                self.tighten_lower_bound(variable, bound)
            }
            Predicate::UpperBound { upper_bound, .. } => {
                self.tighten_upper_bound(variable, upper_bound)
            }
            Predicate::StrictUpperBound { upper_bound, .. } => {
                let bound = if is_integer {
                    upper_bound.ceil() - 1.0
                } else {
                    upper_bound
                };
                self.tighten_upper_bound(variable, bound)
            }
            Predicate::Equal {
                equality_constant, ..
            } => {
                if is_integer && equality_constant.fract() != 0.0 {
                    return Err(EmptyDomain(variable));
                }
                let lower_changed = self.tighten_lower_bound(variable, equality_constant)?;
                let upper_changed = self.tighten_upper_bound(variable, equality_constant)?;
                Ok(lower_changed || upper_changed)
            }
            Predicate::NotEqual {
                not_equal_constant, ..
            } => {
                if is_integer {
                    if not_equal_constant.fract() != 0.0 {
                        return Ok(false);
                    }
                    self.remove_value(variable, not_equal_constant as i32)
                } else if self.evaluate_predicate(predicate) == Some(false) {
                    // A real domain cannot have holes; it only fails once it has collapsed onto
                    // the excluded value.
                    Err(EmptyDomain(variable))
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Whether `predicate` is entailed (`Some(true)`), disentailed (`Some(false)`) or undecided by
    /// the current domains.
    pub(crate) fn evaluate_predicate(&self, predicate: Predicate) -> Option<bool> {
        let variable = predicate.variable();
        match &self.domains[variable] {
            VariableDomain::Integer(domain) => evaluate_integer_predicate(domain, predicate),
            VariableDomain::Real(domain) => evaluate_real_predicate(domain, predicate),
        }
    }
}

fn evaluate_integer_predicate(domain: &IntegerDomain, predicate: Predicate) -> Option<bool> {
    let lower_bound = domain.lower_bound() as f64;
    let upper_bound = domain.upper_bound() as f64;

    let at_least = |bound: f64| {
        if lower_bound >= bound {
            Some(true)
        } else if upper_bound < bound {
            Some(false)
        } else {
            None
        }
    };
    let at_most = |bound: f64| {
        if upper_bound <= bound {
            Some(true)
        } else if lower_bound > bound {
            Some(false)
        } else {
            None
        }
    };
    let equal = |value: f64| {
        if value.fract() != 0.0 || !domain.contains(value as i32) {
            Some(false)
        } else if domain.is_fixed() {
            Some(true)
        } else {
            None
        }
    };

    match predicate {
        Predicate::LowerBound { lower_bound, .. } => {
            at_least((lower_bound - INTEGRALITY_TOLERANCE).ceil())
        }
        Predicate::StrictLowerBound { lower_bound, .. } => at_least(lower_bound.floor() + 1.0),
        Predicate::UpperBound { upper_bound, .. } => {
            at_most((upper_bound + INTEGRALITY_TOLERANCE).floor())
        }
        Predicate::StrictUpperBound { upper_bound, .. } => at_most(upper_bound.ceil() - 1.0),
        Predicate::Equal {
            equality_constant, ..
        } => equal(equality_constant),
        Predicate::NotEqual {
            not_equal_constant, ..
        } => equal(not_equal_constant).map(|truth| !truth),
    }
}

fn evaluate_real_predicate(domain: &RealDomain, predicate: Predicate) -> Option<bool> {
    let resolution = domain.resolution();
    let at_least = |bound: f64| {
        if domain.lower_bound() >= bound - resolution {
            Some(true)
        } else if domain.upper_bound() < bound - resolution {
            Some(false)
        } else {
            None
        }
    };
    let at_most = |bound: f64| {
        if domain.upper_bound() <= bound + resolution {
            Some(true)
        } else if domain.lower_bound() > bound + resolution {
            Some(false)
        } else {
            None
        }
    };
    let equal = |value: f64| {
        if domain
            .bounds()
            .is_disjoint_from(Interval::point(value), resolution)
        {
            Some(false)
        } else if domain.is_instantiated() {
            Some(true)
        } else {
            None
        }
    };

    match predicate {
        Predicate::LowerBound { lower_bound, .. }
        | Predicate::StrictLowerBound { lower_bound, .. } => at_least(lower_bound),
        Predicate::UpperBound { upper_bound, .. }
        | Predicate::StrictUpperBound { upper_bound, .. } => at_most(upper_bound),
        Predicate::Equal {
            equality_constant, ..
        } => equal(equality_constant),
        Predicate::NotEqual {
            not_equal_constant, ..
        } => equal(not_equal_constant).map(|truth| !truth),
    }
}
