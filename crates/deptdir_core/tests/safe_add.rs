use deptdir_core::{safe_add, ArithmeticRangeError, RangeDirection};

const SAMPLES: [i32; 17] = [
    i32::MIN,
    i32::MIN + 1,
    i32::MIN + 100,
    i32::MIN / 2,
    -1_000_000,
    -2,
    -1,
    0,
    1,
    2,
    1_000_000,
    i32::MAX / 2,
    i32::MAX / 2 + 1,
    i32::MAX - 100,
    i32::MAX - 1,
    i32::MAX,
    123_456_789,
];

fn expected(a: i32, b: i32) -> Result<i32, RangeDirection> {
    let wide = i64::from(a) + i64::from(b);
    if wide > i64::from(i32::MAX) {
        Err(RangeDirection::Overflow)
    } else if wide < i64::from(i32::MIN) {
        Err(RangeDirection::Underflow)
    } else {
        Ok(wide as i32)
    }
}

#[test]
fn matches_wide_arithmetic_over_boundary_samples() {
    for a in SAMPLES {
        for b in SAMPLES {
            let actual = safe_add(a, b).map_err(|err| err.direction);
            assert_eq!(actual, expected(a, b), "safe_add({a}, {b})");
        }
    }
}

#[test]
fn documented_boundaries() {
    assert_eq!(
        safe_add(i32::MAX, 1),
        Err(ArithmeticRangeError::overflow())
    );
    assert_eq!(
        safe_add(i32::MAX, i32::MAX),
        Err(ArithmeticRangeError::overflow())
    );
    assert_eq!(
        safe_add(i32::MIN, -1),
        Err(ArithmeticRangeError::underflow())
    );
    assert_eq!(
        safe_add(i32::MIN, i32::MIN),
        Err(ArithmeticRangeError::underflow())
    );
    assert_eq!(safe_add(i32::MAX, i32::MIN), Ok(-1));
    assert_eq!(safe_add(i32::MAX, 0), Ok(i32::MAX));
    assert_eq!(safe_add(i32::MIN, 0), Ok(i32::MIN));
    assert_eq!(safe_add(i32::MAX - 1, 1), Ok(i32::MAX));
    assert_eq!(safe_add(i32::MIN + 1, -1), Ok(i32::MIN));
    assert_eq!(safe_add(0, 0), Ok(0));
}

#[test]
fn near_boundary_sums_overflow() {
    let err = safe_add(i32::MAX - 100, 200).unwrap_err();
    assert_eq!(err.direction, RangeDirection::Overflow);

    let err = safe_add(i32::MIN + 100, -200).unwrap_err();
    assert_eq!(err.direction, RangeDirection::Underflow);
}

#[test]
fn is_commutative_including_failure_direction() {
    for a in SAMPLES {
        for b in SAMPLES {
            assert_eq!(safe_add(a, b), safe_add(b, a), "operands {a}, {b}");
        }
    }
}

#[test]
fn error_messages_name_the_direction() {
    let overflow = safe_add(i32::MAX, 1).unwrap_err().to_string();
    let underflow = safe_add(i32::MIN, -1).unwrap_err().to_string();
    assert!(overflow.to_lowercase().contains("overflow"));
    assert!(underflow.to_lowercase().contains("underflow"));
}
