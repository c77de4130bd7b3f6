use crate::value::{error::RuntimeErrorKind, Number, VariableType};
use compact_str::CompactString;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub kind: VariableType,
    pub value: Option<Number>,
}

/// Variables of a single program run, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    values: BTreeMap<CompactString, Variable>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` without a value. A redeclaration resets the variable.
    pub fn declare(&mut self, name: &str, kind: VariableType) {
        self.values
            .insert(name.into(), Variable { kind, value: None });
    }

    pub fn get(&self, name: &str) -> Result<Number, RuntimeErrorKind> {
        let variable = self
            .values
            .get(name)
            .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(name.into()))?;
        variable
            .value
            .ok_or_else(|| RuntimeErrorKind::UninitializedVariable(name.into()))
    }

    /// Stores `value` converted to the declared type of `name`.
    pub fn assign(&mut self, name: &str, value: Number) -> Result<(), RuntimeErrorKind> {
        let variable = self
            .values
            .get_mut(name)
            .ok_or_else(|| RuntimeErrorKind::UndefinedVariable(name.into()))?;
        let coerced = variable
            .kind
            .coerce(value)
            .ok_or_else(|| RuntimeErrorKind::TypeMismatch {
                name: name.into(),
                expected: variable.kind,
                value,
            })?;
        variable.value = Some(coerced);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, &Variable)> {
        self.values.iter()
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (name, variable)) in self.values.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            match variable.value {
                Some(value) => write!(f, "{name} = {value}")?,
                None => write!(f, "{name} = <uninitialized>")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use crate::value::{error::RuntimeErrorKind, Number, VariableType};

    #[test]
    fn assignment_widens_integers() {
        let mut environment = Environment::new();
        environment.declare("y", VariableType::Real);
        environment
            .assign("y", Number::Integer(2))
            .expect("y is declared");
        assert_eq!(environment.get("y"), Ok(Number::Real(2.0)));
    }

    #[test]
    fn reals_do_not_narrow() {
        let mut environment = Environment::new();
        environment.declare("x", VariableType::Integer);
        assert!(matches!(
            environment.assign("x", Number::Real(1.5)),
            Err(RuntimeErrorKind::TypeMismatch { .. })
        ));
        assert_eq!(
            environment.get("x"),
            Err(RuntimeErrorKind::UninitializedVariable("x".into()))
        );
    }

    #[test]
    fn display_is_sorted_by_name() {
        let mut environment = Environment::new();
        environment.declare("b", VariableType::Integer);
        environment.declare("a", VariableType::Real);
        environment
            .assign("b", Number::Integer(1))
            .expect("b is declared");
        assert_eq!(environment.to_string(), "a = <uninitialized>\nb = 1");
    }
}
