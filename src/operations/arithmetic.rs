//! The standard binary operations.

use super::error::OperationError;

pub fn add(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a + b)
}

pub fn subtract(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a - b)
}

pub fn multiply(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a * b)
}

pub fn divide(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok(a / b)
}

pub fn power(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a.powf(b))
}

/// The `b`-th root of `a`. Odd roots of negative numbers stay real.
pub fn root(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::ZeroRootDegree);
    }
    if a < 0.0 && b % 2.0 == 0.0 {
        return Err(OperationError::EvenRootOfNegative);
    }
    if a < 0.0 {
        Ok(-a.abs().powf(1.0 / b))
    } else {
        Ok(a.powf(1.0 / b))
    }
}

/// Remainder whose sign follows the divisor.
pub fn modulus(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::ModulusByZero);
    }
    let remainder = a % b;
    if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

/// Quotient rounded towards negative infinity.
pub fn int_divide(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::IntegerDivisionByZero);
    }
    Ok((a / b).floor())
}

/// `a` as a percentage of `b`.
pub fn percent(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::PercentageOfZero);
    }
    Ok((a / b) * 100.0)
}

pub fn abs_diff(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok((a - b).abs())
}
