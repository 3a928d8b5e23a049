//! Kani proofs for constant product invariants
//!
//! - **A1: Invariant Non-Decreasing** - k never drops beyond truncation slack (Floor), never drops at all (Ceil)
//! - **A2: Reserves Stay Positive** - a successful trade never drains a side
//! - **A3: Quote/Apply Agree** - the advisory quote equals the applied output
//! - **A4: Direction Symmetry** - swapping direction and reserves gives the same result
//! - **A5: Monotonic Output** - more input never pays less
//! - **A6: Rejections Are Total** - negative input is always InvalidAmount

use amm_model::{apply_with, quote_with, AmmError, Reserves, Rounding, SwapParams};

const BOUND: i128 = 1_000_000_000;

fn any_reserves() -> Reserves {
    let x: i128 = kani::any();
    let y: i128 = kani::any();
    kani::assume(x > 0 && x < BOUND);
    kani::assume(y > 0 && y < BOUND);
    Reserves::new(x, y)
}

fn any_params() -> SwapParams {
    let fee_bps: i128 = kani::any();
    let ceil: bool = kani::any();
    kani::assume(fee_bps >= 0 && fee_bps < 10_000);
    SwapParams::new(fee_bps, if ceil { Rounding::Ceil } else { Rounding::Floor })
}

/// A1: k_after + new_reserve_in > k_before under Floor, k_after >= k_before under Ceil
#[kani::proof]
#[kani::unwind(4)]
fn a1_invariant_non_decreasing() {
    let r = any_reserves();
    let p = any_params();
    let is_in_x: bool = kani::any();
    let amount: i128 = kani::any();
    kani::assume(amount >= 0 && amount < BOUND);

    if let Ok(result) = apply_with(&p, r, is_in_x, amount) {
        let k0 = r.x * r.y;
        let k1 = result.new_reserves.x * result.new_reserves.y;
        let (new_in, _) = result.new_reserves.oriented(is_in_x);

        match p.rounding {
            Rounding::Ceil => assert!(k1 >= k0, "A1: Ceil rounding must not lose k"),
            Rounding::Floor => assert!(k1 + new_in > k0, "A1: Floor loss must stay below one input unit"),
        }
    }
}

/// A2: Both reserves stay positive and the output never reaches the opposite reserve
#[kani::proof]
#[kani::unwind(4)]
fn a2_reserves_stay_positive() {
    let r = any_reserves();
    let p = any_params();
    let is_in_x: bool = kani::any();
    let amount: i128 = kani::any();
    kani::assume(amount >= 0 && amount < BOUND);

    if let Ok(result) = apply_with(&p, r, is_in_x, amount) {
        let (_, reserve_out) = r.oriented(is_in_x);
        assert!(result.new_reserves.x > 0, "A2: X reserve must remain positive");
        assert!(result.new_reserves.y > 0, "A2: Y reserve must remain positive");
        assert!(result.amount_out >= 0 && result.amount_out < reserve_out);
    }
}

/// A3: quote and apply compute the same output
#[kani::proof]
#[kani::unwind(4)]
fn a3_quote_matches_apply() {
    let r = any_reserves();
    let p = any_params();
    let is_in_x: bool = kani::any();
    let amount: i128 = kani::any();
    kani::assume(amount >= 0 && amount < BOUND);

    let quoted = quote_with(&p, r, is_in_x, amount);
    let applied = apply_with(&p, r, is_in_x, amount).map(|res| res.amount_out);
    assert!(quoted == applied, "A3: quote must equal applied output");
}

/// A4: quote((x,y), true, a) == quote((y,x), false, a)
#[kani::proof]
#[kani::unwind(4)]
fn a4_direction_symmetry() {
    let r = any_reserves();
    let p = any_params();
    let amount: i128 = kani::any();
    kani::assume(amount >= 0 && amount < BOUND);

    let forward = quote_with(&p, r, true, amount);
    let mirrored = quote_with(&p, r.flipped(), false, amount);
    assert!(forward == mirrored, "A4: direction symmetry");
}

/// A5: a larger input never pays less
#[kani::proof]
#[kani::unwind(4)]
fn a5_monotonic_output() {
    let r = any_reserves();
    let p = any_params();
    let is_in_x: bool = kani::any();
    let a: i128 = kani::any();
    let b: i128 = kani::any();
    kani::assume(a >= 0 && a < b && b < BOUND);

    if let (Ok(small), Ok(large)) = (quote_with(&p, r, is_in_x, a), quote_with(&p, r, is_in_x, b)) {
        assert!(small <= large, "A5: output must be non-decreasing in input");
    }
}

/// A6: negative input is rejected before anything else is computed
#[kani::proof]
#[kani::unwind(4)]
fn a6_negative_input_rejected() {
    let r = any_reserves();
    let is_in_x: bool = kani::any();
    let amount: i128 = kani::any();
    kani::assume(amount < 0);

    let result = apply_with(&SwapParams::CONTRACT, r, is_in_x, amount);
    assert!(result == Err(AmmError::InvalidAmount));
}
