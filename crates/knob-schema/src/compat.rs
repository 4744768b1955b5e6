//! Pairwise compatibility of restrictions
//!
//! Two restrictions are compatible when some value can satisfy both. The
//! decision is made from the restriction kinds and parameters alone; the only
//! evaluated case is `default`, whose parameter is itself a candidate value.
//!
//! | pair | compatible when |
//! |---|---|
//! | same kind | never |
//! | `default` vs X | the default value satisfies X |
//! | `greater(a)` vs `less(b)` / `lessEqual(b)` | `a < b` |
//! | `greaterEqual(a)` vs `less(b)` | `a < b` |
//! | `greaterEqual(a)` vs `lessEqual(b)` | `a <= b` |
//! | `greater` vs `greaterEqual`, `less` vs `lessEqual` | never |
//! | range or length kind vs `oneOf` | never |
//! | `minLen(a)` vs `maxLen(b)` | `a <= b` |
//! | length kind vs range kind | always |

use crate::restriction::{Restriction, RestrictionKind};
use knob_core::Result;
use tracing::trace;

/// Decide whether two restrictions can hold for the same value.
///
/// The relation is symmetric. Parameters that cannot be compared surface as
/// `TypeMismatch`, wrapped with both restrictions as context.
pub fn compatible(a: &Restriction, b: &Restriction) -> Result<bool> {
    use RestrictionKind::*;

    let verdict = match (a.kind(), b.kind()) {
        (x, y) if x == y => Ok(false),

        (Default, _) => b.is_satisfied_by(a.param()),
        (_, Default) => a.is_satisfied_by(b.param()),

        (Greater | GreaterEqual, Less | LessEqual) => lower_below_upper(a, b),
        (Less | LessEqual, Greater | GreaterEqual) => lower_below_upper(b, a),
        (Greater, GreaterEqual) | (GreaterEqual, Greater) => Ok(false),
        (Less, LessEqual) | (LessEqual, Less) => Ok(false),

        // a finite set cannot be proven to lie inside a bound without
        // enumerating it, and length kinds never share an element with oneOf
        (OneOf, _) | (_, OneOf) => Ok(false),

        (MinLen, MaxLen) => length_within(a, b),
        (MaxLen, MinLen) => length_within(b, a),

        // length and ordering constrain independent properties
        _ => Ok(true),
    };

    let verdict = verdict.map_err(|e| e.context(format!("comparing {} with {}", a, b)))?;
    trace!(first = %a, second = %b, compatible = verdict, "compatibility");
    Ok(verdict)
}

/// A lower bound and an upper bound leave a non-empty interval. Only two
/// inclusive bounds may meet at the same point.
fn lower_below_upper(lower: &Restriction, upper: &Restriction) -> Result<bool> {
    let lo = lower.scalar_param()?;
    let hi = upper.scalar_param()?;

    if lower.kind() == RestrictionKind::GreaterEqual && upper.kind() == RestrictionKind::LessEqual
    {
        lo.less_equal(hi)
    } else {
        lo.less(hi)
    }
}

fn length_within(min: &Restriction, max: &Restriction) -> Result<bool> {
    min.scalar_param()?.less_equal(max.scalar_param()?)
}
