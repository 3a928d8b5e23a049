//! Property suite for the constant product engine
//!
//! Run with: cargo test -p amm_model
//! Increase cases: PROPTEST_CASES=10000 cargo test -p amm_model --test properties

use amm_model::*;
use proptest::prelude::*;

// Up to 1e18 smallest units per side keeps k comfortably inside i128.
const MAX_RESERVE: i128 = 1_000_000_000_000_000_000;

fn reserves() -> impl Strategy<Value = Reserves> {
    (1..=MAX_RESERVE, 1..=MAX_RESERVE).prop_map(|(x, y)| Reserves::new(x, y))
}

fn params() -> impl Strategy<Value = SwapParams> {
    (
        0i128..1_000,
        prop_oneof![Just(Rounding::Floor), Just(Rounding::Ceil)],
    )
        .prop_map(|(fee_bps, rounding)| SwapParams::new(fee_bps, rounding))
}

proptest! {
    #[test]
    fn prop_invariant_within_rounding(
        r in reserves(),
        is_in_x in any::<bool>(),
        amount in 0..=MAX_RESERVE,
        p in params(),
    ) {
        if let Ok(result) = apply_with(&p, r, is_in_x, amount) {
            prop_assert!(result.new_reserves.is_active());
            prop_assert!(invariant_preserved(&p, &r, is_in_x, &result).unwrap());

            if p.rounding == Rounding::Ceil {
                prop_assert!(result.new_reserves.k().unwrap() >= r.k().unwrap());
            }
        }
    }

    #[test]
    fn prop_quote_matches_apply(
        r in reserves(),
        is_in_x in any::<bool>(),
        amount in 0..=MAX_RESERVE,
    ) {
        let quoted = quote(r, is_in_x, amount);
        let applied = apply(r, is_in_x, amount).map(|res| res.amount_out);
        prop_assert_eq!(quoted, applied);
        // Quoting twice changes nothing
        prop_assert_eq!(quote(r, is_in_x, amount), quoted);
    }

    #[test]
    fn prop_zero_amount_quotes_zero(r in reserves(), is_in_x in any::<bool>()) {
        prop_assert_eq!(quote(r, is_in_x, 0), Ok(0));
    }

    #[test]
    fn prop_output_monotonic_in_input(
        r in reserves(),
        is_in_x in any::<bool>(),
        a in 0..=MAX_RESERVE,
        b in 0..=MAX_RESERVE,
        p in params(),
    ) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        if let (Ok(lo), Ok(hi)) = (
            quote_with(&p, r, is_in_x, small),
            quote_with(&p, r, is_in_x, large),
        ) {
            prop_assert!(lo <= hi, "out({}) = {} > out({}) = {}", small, lo, large, hi);
        }
    }

    #[test]
    fn prop_direction_symmetry(
        r in reserves(),
        amount in 0..=MAX_RESERVE,
        p in params(),
    ) {
        prop_assert_eq!(
            quote_with(&p, r, true, amount),
            quote_with(&p, r.flipped(), false, amount)
        );
    }

    #[test]
    fn prop_never_drains(
        r in reserves(),
        is_in_x in any::<bool>(),
        amount in 0..=MAX_RESERVE,
    ) {
        let (_, reserve_out) = r.oriented(is_in_x);
        match quote(r, is_in_x, amount) {
            Ok(out) => prop_assert!(out >= 0 && out < reserve_out),
            Err(e) => prop_assert_eq!(e, AmmError::InsufficientLiquidity),
        }
    }

    #[test]
    fn prop_negative_amount_rejected(
        r in reserves(),
        is_in_x in any::<bool>(),
        amount in i128::MIN..0,
    ) {
        prop_assert_eq!(apply(r, is_in_x, amount), Err(AmmError::InvalidAmount));
    }
}
