pub mod error;
pub mod formatter;

use error::RuntimeErrorKind;

/// The declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    Integer,
    Real,
}

impl std::fmt::Display for VariableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer => write!(f, "INTEGER"),
            Self::Real => write!(f, "REAL"),
        }
    }
}

impl VariableType {
    /// The common type of an additive or multiplicative operation.
    pub fn promote(self, other: VariableType) -> VariableType {
        match (self, other) {
            (VariableType::Integer, VariableType::Integer) => VariableType::Integer,
            _ => VariableType::Real,
        }
    }

    /// Whether a value of type `source` may be stored in a variable of this type.
    /// Integers widen into reals; reals never narrow into integers.
    pub fn accepts(self, source: VariableType) -> bool {
        matches!(
            (self, source),
            (VariableType::Integer, VariableType::Integer)
                | (VariableType::Real, VariableType::Integer)
                | (VariableType::Real, VariableType::Real)
        )
    }

    /// Converts `value` into this type, or returns `None` if it is not assignable.
    pub fn coerce(self, value: Number) -> Option<Number> {
        match (self, value) {
            (VariableType::Integer, Number::Integer(_)) => Some(value),
            (VariableType::Integer, Number::Real(_)) => None,
            (VariableType::Real, v) => Some(Number::Real(v.to_real())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:?}"),
        }
    }
}

impl Number {
    pub fn get_type(&self) -> VariableType {
        match self {
            Number::Integer(_) => VariableType::Integer,
            Number::Real(_) => VariableType::Real,
        }
    }

    pub fn to_real(&self) -> f64 {
        match *self {
            Number::Integer(v) => v as f64,
            Number::Real(v) => v,
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Number::Integer(v) => v == 0,
            Number::Real(v) => v == 0.0,
        }
    }
}

// Unary operators
impl Number {
    pub fn numeric_negate(&self) -> Result<Number, RuntimeErrorKind> {
        match *self {
            Number::Integer(v) => v
                .checked_neg()
                .map(Number::Integer)
                .ok_or(RuntimeErrorKind::Overflow),
            Number::Real(v) => Ok(Number::Real(-v)),
        }
    }
}

// Binary operators
impl Number {
    pub fn add(&self, other: &Number) -> Result<Number, RuntimeErrorKind> {
        match (*self, *other) {
            (Number::Integer(lhs), Number::Integer(rhs)) => lhs
                .checked_add(rhs)
                .map(Number::Integer)
                .ok_or(RuntimeErrorKind::Overflow),
            (lhs, rhs) => Ok(Number::Real(lhs.to_real() + rhs.to_real())),
        }
    }

    pub fn subtract(&self, other: &Number) -> Result<Number, RuntimeErrorKind> {
        match (*self, *other) {
            (Number::Integer(lhs), Number::Integer(rhs)) => lhs
                .checked_sub(rhs)
                .map(Number::Integer)
                .ok_or(RuntimeErrorKind::Overflow),
            (lhs, rhs) => Ok(Number::Real(lhs.to_real() - rhs.to_real())),
        }
    }

    pub fn multiply(&self, other: &Number) -> Result<Number, RuntimeErrorKind> {
        match (*self, *other) {
            (Number::Integer(lhs), Number::Integer(rhs)) => lhs
                .checked_mul(rhs)
                .map(Number::Integer)
                .ok_or(RuntimeErrorKind::Overflow),
            (lhs, rhs) => Ok(Number::Real(lhs.to_real() * rhs.to_real())),
        }
    }

    /// Real division. Always produces a real, following IEEE semantics for a zero divisor.
    pub fn float_divide(&self, other: &Number) -> Number {
        Number::Real(self.to_real() / other.to_real())
    }

    /// Integer division truncating toward zero. Real operands divide in floating point and
    /// the quotient is truncated.
    pub fn integer_divide(&self, other: &Number) -> Result<Number, RuntimeErrorKind> {
        if other.is_zero() {
            return Err(RuntimeErrorKind::DivisionByZero);
        }
        match (*self, *other) {
            (Number::Integer(lhs), Number::Integer(rhs)) => lhs
                .checked_div(rhs)
                .map(Number::Integer)
                .ok_or(RuntimeErrorKind::Overflow),
            (lhs, rhs) => {
                let quotient = (lhs.to_real() / rhs.to_real()).trunc();
                if quotient.is_finite() && quotient >= i64::MIN as f64 && quotient < i64::MAX as f64
                {
                    Ok(Number::Integer(quotient as i64))
                } else {
                    Err(RuntimeErrorKind::Overflow)
                }
            }
        }
    }
}
