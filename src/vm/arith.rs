use super::error::VmError;
use crate::token::OpKind;

/// Applies a binary operator to the two topmost values. `top` is the value
/// popped first (the rightmost operand of the written expression), `second`
/// the one popped next.
///
/// `**` is the odd one out: the top of the stack is the base and the value
/// beneath it the exponent, so `2 3 **` evaluates to 9.
///
/// The division guard rejects a zero in either operand, not just the
/// divisor: `0 5 /` is an error rather than 0.
pub fn evaluate(kind: OpKind, top: f64, second: f64) -> Result<f64, VmError> {
    match kind {
        OpKind::Add => Ok(second + top),
        OpKind::Sub => Ok(second - top),
        OpKind::Mul => Ok(second * top),
        OpKind::Pow => Ok(top.powf(second)),
        OpKind::Mod => Ok(second % top),
        OpKind::Div => {
            if top == 0.0 || second == 0.0 {
                return Err(VmError::division_by_zero());
            }
            Ok(second / top)
        }
    }
}
