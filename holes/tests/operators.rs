use anyhow::Result;
use holes::{
    CallError, Comparison, Composable, EvalError, Lambda, Number, Placeholder, compare,
    underscore,
};
use rstest::rstest;

fn x() -> Placeholder {
    underscore()
}

#[rstest]
#[case::abs_hole(x().abs(), -1, 1)]
#[case::abs_lambda((x() + 1).abs(), -2, 1)]
#[case::pos_hole(x().pos(), -1, -1)]
#[case::pos_lambda((x() + 1).pos(), -2, -1)]
#[case::neg_hole(-x(), -1, 1)]
#[case::neg_lambda(-(x() + 1), -2, 1)]
#[case::invert_hole(!x(), 5, -6)]
#[case::invert_lambda(!(x() - 1), 0, 0)]
#[case::not_zero(x().logical_not(), 0, 1)]
#[case::not_nonzero((x() * 3).logical_not(), 4, 0)]
fn unary(#[case] lambda: Lambda, #[case] arg: i64, #[case] expected: i64) -> Result<()> {
    assert_eq!(lambda.call(&[arg])?, expected);
    Ok(())
}

#[rstest]
#[case::hole_add_hole(x() + x(), 1, 2)]
#[case::hole_add_constant(x() + 1, 1, 2)]
#[case::constant_add_hole(1 + x(), 1, 2)]
#[case::hole_add_lambda(x() + (x() + 1), 1, 3)]
#[case::lambda_add_hole(x() + 1 + x(), 1, 3)]
#[case::lambda_add_constant(x() + 1 + 1, 1, 3)]
#[case::constant_add_lambda(1 + (x() + 1), 1, 3)]
#[case::lambda_add_lambda((x() + 1) + (x() + 1), 1, 4)]
#[case::hole_sub_hole(x() - x(), 1, 0)]
#[case::hole_sub_constant(x() - 1, 1, 0)]
#[case::constant_sub_hole(1 - x(), 1, 0)]
#[case::hole_sub_lambda(x() - (x() - 1), 1, 1)]
#[case::lambda_sub_hole(x() - 1 - x(), 1, -1)]
#[case::lambda_sub_constant(x() - 1 - 1, 1, -1)]
#[case::constant_sub_lambda(1 - (x() - 1), 1, 1)]
#[case::lambda_sub_lambda((x() - 1) - (x() - 1), 1, 0)]
#[case::hole_mul_hole(x() * x(), 2, 4)]
#[case::hole_mul_constant(x() * 2, 2, 4)]
#[case::constant_mul_hole(2 * x(), 2, 4)]
#[case::hole_mul_lambda(x() * (x() * 2), 2, 8)]
#[case::lambda_mul_hole(x() * 2 * x(), 2, 8)]
#[case::lambda_mul_constant(x() * 2 * 2, 2, 8)]
#[case::constant_mul_lambda(2 * (x() * 2), 2, 8)]
#[case::lambda_mul_lambda((x() * 2) * (x() * 2), 2, 16)]
#[case::hole_floordiv_hole(x().floor_div(x()), 2, 1)]
#[case::hole_floordiv_constant(x().floor_div(2), 2, 1)]
#[case::constant_floordiv_hole(x().rfloor_div(2), 2, 1)]
#[case::hole_floordiv_lambda(x().floor_div(x().floor_div(2)), 2, 2)]
#[case::lambda_floordiv_hole(x().floor_div(2).floor_div(x()), 2, 0)]
#[case::lambda_floordiv_constant(x().floor_div(2).floor_div(2), 2, 0)]
#[case::constant_floordiv_lambda(x().floor_div(2).rfloor_div(2), 2, 2)]
#[case::lambda_floordiv_lambda(x().floor_div(2).floor_div(x().floor_div(2)), 2, 1)]
#[case::hole_pow_hole(x().pow(x()), 2, 4)]
#[case::hole_pow_constant(x().pow(2), 2, 4)]
#[case::constant_pow_hole(x().rpow(2), 2, 4)]
#[case::hole_pow_lambda(x().pow(x().pow(2)), 2, 16)]
#[case::lambda_pow_hole(x().pow(2).pow(x()), 2, 16)]
#[case::lambda_pow_constant(x().pow(2).pow(2), 2, 16)]
#[case::constant_pow_lambda(x().pow(2).rpow(2), 2, 16)]
#[case::lambda_pow_lambda(x().pow(2).pow(x().pow(2)), 2, 256)]
#[case::hole_mod_hole(x() % x(), 2, 0)]
#[case::hole_mod_constant(x() % 2, 3, 1)]
#[case::constant_mod_hole(3 % x(), 2, 1)]
#[case::hole_mod_lambda(x() % (x() % 2), 3, 0)]
#[case::lambda_mod_hole(x() % 2 % x(), 3, 1)]
#[case::lambda_mod_constant(x() % 2 % 3, 3, 1)]
#[case::constant_mod_lambda(3 % (x() % 2), 3, 0)]
#[case::lambda_mod_lambda((x() % 2) % (x() % 2), 3, 0)]
fn integer_arithmetic(
    #[case] lambda: Lambda,
    #[case] arg: i64,
    #[case] expected: i64,
) -> Result<()> {
    let result = lambda.call(&[arg])?;
    assert!(!result.is_real());
    assert_eq!(result, expected);
    Ok(())
}

#[rstest]
#[case::hole_truediv_hole(x() / x(), 2, 1.0)]
#[case::hole_truediv_constant(x() / 2, 5, 2.5)]
#[case::constant_truediv_hole(5 / x(), 2, 2.5)]
#[case::hole_truediv_lambda(x() / (x() / 2), 5, 2.0)]
#[case::lambda_truediv_hole(x() / 2 / x(), 2, 0.5)]
#[case::lambda_truediv_constant(x() / 2 / 2, 2, 0.5)]
#[case::constant_truediv_lambda(2 / (x() / 2), 2, 2.0)]
#[case::lambda_truediv_lambda((x() / 2) / (x() / 2), 2, 1.0)]
#[case::negative_power(x().rpow(2), -2, 0.25)]
fn real_arithmetic(
    #[case] lambda: Lambda,
    #[case] arg: i64,
    #[case] expected: f64,
) -> Result<()> {
    let result = lambda.call(&[arg])?;
    assert!(result.is_real());
    assert_eq!(result, expected);
    Ok(())
}

#[rstest]
#[case::add(|h: Placeholder, n: i64| h + n, |n: i64, h: Placeholder| n + h, |a: i64, b: i64| a + b)]
#[case::sub(|h: Placeholder, n: i64| h - n, |n: i64, h: Placeholder| n - h, |a: i64, b: i64| a - b)]
#[case::mul(|h: Placeholder, n: i64| h * n, |n: i64, h: Placeholder| n * h, |a: i64, b: i64| a * b)]
#[case::floor_div(|h: Placeholder, n: i64| h.floor_div(n), |n: i64, h: Placeholder| h.rfloor_div(n), i64::div_euclid)]
#[case::modulo(|h: Placeholder, n: i64| h % n, |n: i64, h: Placeholder| n % h, i64::rem_euclid)]
#[case::pow(|h: Placeholder, n: i64| h.pow(n), |n: i64, h: Placeholder| h.rpow(n), |a: i64, b: i64| a.pow(u32::try_from(b).unwrap()))]
#[case::bit_or(|h: Placeholder, n: i64| h | n, |n: i64, h: Placeholder| n | h, |a: i64, b: i64| a | b)]
#[case::bit_and(|h: Placeholder, n: i64| h & n, |n: i64, h: Placeholder| n & h, |a: i64, b: i64| a & b)]
#[case::bit_xor(|h: Placeholder, n: i64| h ^ n, |n: i64, h: Placeholder| n ^ h, |a: i64, b: i64| a ^ b)]
#[case::shl(|h: Placeholder, n: i64| h << n, |n: i64, h: Placeholder| n << h, |a: i64, b: i64| a << b)]
#[case::shr(|h: Placeholder, n: i64| h >> n, |n: i64, h: Placeholder| n >> h, |a: i64, b: i64| a >> b)]
fn operator_round_trips(
    #[case] forward: fn(Placeholder, i64) -> Lambda,
    #[case] reflected: fn(i64, Placeholder) -> Lambda,
    #[case] law: fn(i64, i64) -> i64,
    #[values(1, 2, 5, 9)] value: i64,
) -> Result<()> {
    const LITERAL: i64 = 3;
    assert_eq!(forward(x(), LITERAL).call(&[value])?, law(value, LITERAL));
    assert_eq!(reflected(LITERAL, x()).call(&[value])?, law(LITERAL, value));
    Ok(())
}

#[rstest]
#[case::lt(Comparison::Lt, |h: Placeholder, n: i64| h.lt(n), |a: &i64, b: &i64| a < b)]
#[case::le(Comparison::Le, |h: Placeholder, n: i64| h.le(n), |a: &i64, b: &i64| a <= b)]
#[case::gt(Comparison::Gt, |h: Placeholder, n: i64| h.gt(n), |a: &i64, b: &i64| a > b)]
#[case::eq(Comparison::Eq, |h: Placeholder, n: i64| h.equals(n), |a: &i64, b: &i64| a == b)]
#[case::ne(Comparison::Ne, |h: Placeholder, n: i64| h.not_equals(n), |a: &i64, b: &i64| a != b)]
fn comparison_round_trips(
    #[case] cmp: Comparison,
    #[case] forward: fn(Placeholder, i64) -> Lambda,
    #[case] law: fn(&i64, &i64) -> bool,
    #[values(-4, 3, 8)] value: i64,
) -> Result<()> {
    const LITERAL: i64 = 3;
    let forward = forward(x(), LITERAL);
    let with_literal_first = compare(cmp, LITERAL, x());
    assert_eq!(forward.call(&[value])?, i64::from(law(&value, &LITERAL)));
    assert_eq!(with_literal_first.call(&[value])?, i64::from(law(&LITERAL, &value)));
    Ok(())
}

#[cfg(not(feature = "legacy-ge"))]
#[test]
fn greater_or_equal_is_genuine() -> Result<()> {
    // `legacy-ge` builds evaluate `>=` with the `<=` law instead.
    let at_least_three = x().ge(3);
    assert_eq!(at_least_three.call(&[4])?, 1);
    assert_eq!(at_least_three.call(&[3])?, 1);
    assert_eq!(at_least_three.call(&[2])?, 0);
    assert_eq!(compare(Comparison::Ge, 3, x()).call(&[4])?, 0);
    Ok(())
}

#[cfg(feature = "legacy-ge")]
#[test]
fn greater_or_equal_uses_legacy_law() -> Result<()> {
    let at_least_three = x().ge(3);
    assert_eq!(at_least_three.call(&[4])?, 0);
    assert_eq!(at_least_three.call(&[3])?, 1);
    assert_eq!(at_least_three.call(&[2])?, 1);
    Ok(())
}

#[test]
fn true_division_is_always_real() -> Result<()> {
    let half = x() / 2;
    assert_eq!(half.call(&[5])?, Number::Real(2.5));
    assert_eq!(half.call(&[4])?, Number::Real(2.0));
    assert!(half.call(&[4])?.is_real());
    Ok(())
}

#[rstest]
#[case(-3, 2, -2)]
#[case(3, -2, -2)]
#[case(-3, -2, 1)]
#[case(7, 2, 3)]
fn floor_division_truncates_down(
    #[case] a: i64,
    #[case] b: i64,
    #[case] expected: i64,
) -> Result<()> {
    assert_eq!(x().floor_div(b).call(&[a])?, expected);
    Ok(())
}

#[rstest]
#[case(-7, 3, 2)]
#[case(7, -3, -2)]
#[case(-7, -3, -1)]
fn modulo_takes_the_sign_of_the_divisor(
    #[case] a: i64,
    #[case] b: i64,
    #[case] expected: i64,
) -> Result<()> {
    assert_eq!((x() % b).call(&[a])?, expected);
    Ok(())
}

#[test]
fn power_is_right_associative() -> Result<()> {
    // 3 ** (3 ** 2) and (3 ** 3) ** 2 differ, so the nesting is observable
    assert_eq!(x().pow(x().pow(2)).call(&[3])?, 19_683);
    assert_eq!(x().pow(x()).pow(2).call(&[3])?, 729);
    assert_eq!(x().pow(2).pow(3).call(&[2])?, 64);
    assert_eq!(x().pow(x().pow(3)).call(&[2])?, 256);
    Ok(())
}

#[test]
fn numeric_errors_surface_through_call() {
    assert!(matches!(
        x().floor_div(0).call(&[1]),
        Err(CallError::Eval(EvalError::DivisionByZero { .. }))
    ));
    assert!(matches!(
        (1i64 / x()).call(&[0]),
        Err(CallError::Eval(EvalError::DivisionByZero { .. }))
    ));
    assert!(matches!(
        (x() * i64::MAX).call(&[2]),
        Err(CallError::Eval(EvalError::Overflow { .. }))
    ));
    assert!(matches!(
        ((x() / 2) & 1).call(&[4]),
        Err(CallError::Eval(EvalError::UnsupportedOperand { .. }))
    ));
    assert_eq!(
        (x() << -1).call(&[1]),
        Err(CallError::Eval(EvalError::NegativeShift))
    );
}

#[test]
fn mixed_comparison_keeps_integer_precision() -> Result<()> {
    let beyond_f64 = 9_007_199_254_740_993;
    assert_eq!((x() / 1).equals(x()).call(&[beyond_f64])?, 0);
    assert_eq!((x() / 1).lt(x()).call(&[beyond_f64])?, 1);
    assert_eq!((x() / 1).equals(x()).call(&[7])?, 1);
    Ok(())
}
