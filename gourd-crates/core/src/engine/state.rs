use log::debug;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Contradiction;
use crate::basic_types::ModelError;
use crate::constraints::Constraint;
use crate::engine::predicates::Predicate;
use crate::engine::solver_statistics::SolverStatistics;
use crate::engine::variables::DomainSpec;
use crate::engine::variables::VarId;
use crate::engine::ConstraintId;
use crate::engine::ConstraintNode;
use crate::engine::ConstraintSet;
use crate::engine::PropagationEngine;
use crate::engine::VariableNames;
use crate::engine::VariableOrigin;
use crate::engine::VariableStore;
use crate::gourd_assert_simple;
use crate::propagators::Comparison;

/// The [`State`] is the container of variables and constraints.
///
/// [`State`] implements [`Clone`], and cloning the [`State`] will create a fresh copy of the
/// [`State`]. Explanations are computed on such a copy.
#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    /// Every variable with its current domain, and the trail to restore earlier domains.
    pub(crate) variables: VariableStore,
    /// The flattened constraints with their watch lists.
    pub(crate) constraints: ConstraintSet,
    /// The names of the variables in the solver.
    pub(crate) names: VariableNames,
    pub(crate) statistics: SolverStatistics,
    propagation: PropagationEngine,
    /// Constraints which have not yet reached a fixed point at the root. Their effects above the
    /// root are undone by backtracking without any of their variables changing, so they are
    /// scheduled again after every restore.
    awaiting_root_propagation: Vec<ConstraintId>,
    /// Set once propagation fails at the root; the model has no solutions from then on.
    root_contradiction: Option<Contradiction>,
}

/// Operations to create variables and constraints.
impl State {
    pub(crate) fn new_integer(
        &mut self,
        domain_spec: &DomainSpec,
        name: Option<String>,
    ) -> Result<VarId, ModelError> {
        self.check_unused_name(name.as_deref())?;
        let variable = self
            .variables
            .grow_integer(domain_spec, VariableOrigin::Model)?;
        self.name_variable(variable, name)?;
        Ok(variable)
    }

    pub(crate) fn new_real(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        epsilon: f64,
        name: Option<String>,
    ) -> Result<VarId, ModelError> {
        self.check_unused_name(name.as_deref())?;
        let variable = self.variables.grow_real(lower_bound, upper_bound, epsilon)?;
        self.name_variable(variable, name)?;
        Ok(variable)
    }

    fn check_unused_name(&self, name: Option<&str>) -> Result<(), ModelError> {
        match name {
            Some(name) if self.names.get_variable_by_name(name).is_some() => {
                Err(ModelError::DuplicateName(name.to_owned()))
            }
            _ => Ok(()),
        }
    }

    fn name_variable(&mut self, variable: VarId, name: Option<String>) -> Result<(), ModelError> {
        match name {
            Some(name) => self.names.add(variable, name),
            None => Ok(()),
        }
    }

    pub(crate) fn variable_by_name(&self, name: &str) -> Result<VarId, ModelError> {
        self.names
            .get_variable_by_name(name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_owned()))
    }

    pub(crate) fn check_known(&self, variable: VarId) -> Result<(), ModelError> {
        if self.variables.is_known(variable) {
            Ok(())
        } else {
            Err(ModelError::UnknownVariable(variable.to_string()))
        }
    }

    /// Flattens `constraint` into nodes, each with its own truth variable. The returned constraint
    /// is the root of the tree; it is scheduled for propagation but not yet posted.
    ///
    /// Nothing is added when the constraint is malformed.
    pub(crate) fn add_constraint(
        &mut self,
        constraint: Constraint,
    ) -> Result<(ConstraintId, VarId), ModelError> {
        self.validate(&constraint)?;
        Ok(self.flatten(constraint))
    }

    fn validate(&self, constraint: &Constraint) -> Result<(), ModelError> {
        match constraint {
            Constraint::Compare { lhs, rhs, .. } => {
                for variable in lhs.variables().into_iter().chain(rhs.variables()) {
                    self.check_known(variable)?;
                }
                let initial_bounds = |variable: VarId| self.variables.initial_bounds(variable);
                if lhs.has_divisor_spanning_zero(&initial_bounds)
                    || rhs.has_divisor_spanning_zero(&initial_bounds)
                {
                    return Err(ModelError::DivisorSpansZero);
                }
                Ok(())
            }
            Constraint::And(operands) | Constraint::Or(operands) => operands
                .iter()
                .try_for_each(|operand| self.validate(operand)),
            Constraint::Not(operand) => self.validate(operand),
            Constraint::Implies(lhs, rhs) | Constraint::Iff(lhs, rhs) => {
                self.validate(lhs)?;
                self.validate(rhs)
            }
            Constraint::Literal(variable) => {
                self.check_known(*variable)?;
                let bounds = self.variables.initial_bounds(*variable);
                if !self.variables.is_integer(*variable) || bounds.lower < 0.0 || bounds.upper > 1.0
                {
                    return Err(ModelError::NotBoolean(*variable));
                }
                Ok(())
            }
        }
    }

    fn flatten(&mut self, constraint: Constraint) -> (ConstraintId, VarId) {
        let truth = match &constraint {
            Constraint::Literal(variable) => *variable,
            _ => self.variables.grow_truth_variable(),
        };

        let node = match constraint {
            Constraint::Compare { relation, lhs, rhs } => ConstraintNode::Compare {
                comparison: Comparison::new(relation, lhs, rhs, &self.variables),
                truth,
            },
            Constraint::And(operands) => ConstraintNode::And {
                operands: self.flatten_operands(operands),
                truth,
            },
            Constraint::Or(operands) => ConstraintNode::Or {
                operands: self.flatten_operands(operands),
                truth,
            },
            Constraint::Not(operand) => ConstraintNode::Not {
                operand: self.flatten_operand(*operand),
                truth,
            },
            Constraint::Implies(antecedent, consequent) => ConstraintNode::Implies {
                antecedent: self.flatten_operand(*antecedent),
                consequent: self.flatten_operand(*consequent),
                truth,
            },
            Constraint::Iff(left, right) => ConstraintNode::Iff {
                left: self.flatten_operand(*left),
                right: self.flatten_operand(*right),
                truth,
            },
            Constraint::Literal(_) => ConstraintNode::Literal { truth },
        };

        (self.add_node(node), truth)
    }

    /// Operands which are literals are used directly, without a node of their own.
    fn flatten_operand(&mut self, constraint: Constraint) -> VarId {
        match constraint {
            Constraint::Literal(variable) => variable,
            other => self.flatten(other).1,
        }
    }

    fn flatten_operands(&mut self, constraints: Vec<Constraint>) -> Vec<VarId> {
        constraints
            .into_iter()
            .map(|constraint| self.flatten_operand(constraint))
            .collect()
    }

    fn add_node(&mut self, node: ConstraintNode) -> ConstraintId {
        let id = self.constraints.add(node);
        self.schedule(id);
        id
    }

    fn schedule(&mut self, id: ConstraintId) {
        self.propagation.enqueue_constraint(id);
        if !self.awaiting_root_propagation.contains(&id) {
            self.awaiting_root_propagation.push(id);
        }
    }

    /// Requires the constraint to hold from now on. Posting cannot be undone.
    pub(crate) fn post_constraint(&mut self, id: ConstraintId) -> Result<(), ConstraintOperationError> {
        self.constraints.mark_posted(id);
        self.schedule(id);

        let truth = self.constraints[id].node.truth();
        if let Some(truth) = truth {
            if self.variables.boolean_value(truth) == Some(false) {
                if self.decision_level() == 0 {
                    self.root_contradiction = Some(Contradiction {
                        constraint: Some(id),
                        variable: Some(truth),
                    });
                }
                return Err(ConstraintOperationError::InfeasibleConstraint(id));
            }
        }
        Ok(())
    }

    /// Adds the learned clause `!(predicates[0] /\ predicates[1] /\ ...)`.
    pub(crate) fn add_nogood(&mut self, predicates: Vec<Predicate>) -> ConstraintId {
        debug!("learned nogood over {} predicates", predicates.len());
        let id = self.add_node(ConstraintNode::Nogood { predicates });
        self.constraints.mark_posted(id);
        id
    }
}

/// Operations on the trail and propagation.
impl State {
    pub(crate) fn decision_level(&self) -> usize {
        self.variables.get_checkpoint()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.variables.new_checkpoint();
    }

    /// Restores every domain to the moment `checkpoint` was opened. Restoring to the current
    /// level changes nothing.
    pub(crate) fn restore_to(&mut self, checkpoint: usize) {
        gourd_assert_simple!(checkpoint <= self.decision_level());
        if checkpoint == self.decision_level() {
            return;
        }

        self.variables.synchronise(checkpoint);
        self.propagation.clear_variable_queue();
        for &id in &self.awaiting_root_propagation {
            self.propagation.enqueue_constraint(id);
        }
    }

    /// Makes `predicate` true at the current decision level.
    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<(), Contradiction> {
        match self.variables.post(predicate) {
            Ok(_) => Ok(()),
            Err(empty_domain) => {
                let contradiction = Contradiction::from(empty_domain);
                if self.decision_level() == 0 {
                    self.root_contradiction = Some(contradiction);
                }
                Err(contradiction)
            }
        }
    }

    /// Propagates every constraint until no domain changes.
    ///
    /// A contradiction at the root is permanent and reported by every later call at the root.
    pub(crate) fn propagate_to_fixed_point(&mut self) -> Result<(), Contradiction> {
        let at_root = self.decision_level() == 0;
        if at_root {
            if let Some(contradiction) = self.root_contradiction {
                return Err(contradiction);
            }
        }

        let result = self.propagation.propagate(
            &mut self.variables,
            &self.constraints,
            &mut self.statistics.engine_statistics,
        );

        match result {
            Ok(()) if at_root => self.awaiting_root_propagation.clear(),
            Err(contradiction) if at_root => {
                debug!("the model is inconsistent at the root");
                self.root_contradiction = Some(contradiction);
            }
            _ => {}
        }
        result
    }

    #[cfg(test)]
    pub(crate) fn is_infeasible_at_root(&self) -> bool {
        self.root_contradiction.is_some()
    }
}
