use crate::basic_types::ModelError;
use crate::containers::HashMap;
use crate::engine::variables::VarId;

/// Client-given names of variables, for lookup and display.
#[derive(Debug, Default, Clone)]
pub(crate) struct VariableNames {
    names: HashMap<VarId, String>,
    variable_by_name: HashMap<String, VarId>,
}

impl VariableNames {
    /// Get the name associated with a variable.
    pub(crate) fn get_name(&self, variable: VarId) -> Option<&str> {
        self.names.get(&variable).map(|s| s.as_str())
    }

    /// Get the [`VarId`] associated with the given name.
    pub(crate) fn get_variable_by_name(&self, name: &str) -> Option<VarId> {
        self.variable_by_name.get(name).copied()
    }

    /// Names the variable. Every name can only be used once.
    pub(crate) fn add(&mut self, variable: VarId, name: String) -> Result<(), ModelError> {
        if self.variable_by_name.contains_key(&name) {
            return Err(ModelError::DuplicateName(name));
        }
        let _ = self.names.insert(variable, name.clone());
        let _ = self.variable_by_name.insert(name, variable);
        Ok(())
    }
}
