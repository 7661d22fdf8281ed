// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use trig_audit_core::{
    Function, FunctionReports, FunctionValue, Range, RangeReport, Scores, Sweep,
    POINTS_IN_ONE_RANGE,
};

fn ulps_from(x: f64, n: i64) -> f64 {
    f64::from_bits(x.to_bits().wrapping_add_signed(n))
}

fn empty_range(start: f64) -> Range {
    let mut values = [[FunctionValue::default(); Function::COUNT]; POINTS_IN_ONE_RANGE];
    let mut x = start;
    for point in &mut values {
        for slot in point.iter_mut() {
            slot.old = x;
            slot.new = x;
        }
        x = x.next_up();
    }
    Range {
        limits: [start, x],
        values,
    }
}

/// Old is `old_ulps` away from accurate, new is `new_ulps` away.
fn changed(accurate: f64, old_ulps: i64, new_ulps: i64) -> FunctionValue {
    FunctionValue {
        old: ulps_from(accurate, old_ulps),
        new: ulps_from(accurate, new_ulps),
        accurate: Some(accurate),
    }
}

#[test]
fn one_improvement_and_one_worsening_share_a_report() {
    let mut range = empty_range(1.0);
    let cos = Function::Cos.index();
    // iscore +5: old 7 ulps away, new 2 ulps away.
    range.values[3][cos] = changed(0.5, 7, 2);
    // iscore -3: old 1 ulp away, new 4 ulps away.
    range.values[9][cos] = changed(0.25, -1, 4);

    let report = RangeReport::build(&range, Function::Cos).expect("range has scored points");
    assert_eq!(report.improvements.count, 1);
    assert_eq!(report.worsenings.count, 1);
    assert_eq!(report.improvements.max, 5);
    assert_eq!(report.worsenings.max, -3);

    let f_improve = 5.0 / 2.0;
    let f_worse = -3.0 / 4.0;
    assert_eq!(report.improvements.max_score, f_improve);
    assert_eq!(report.worsenings.max_score, f_worse);
    assert_eq!(report.improvements.mean_square, f_improve);
    assert_eq!(report.worsenings.mean_square, 0.75);
    assert_eq!(report.mean_relative, (f_improve + f_worse) / 2.0);
    assert_eq!(report.limits, range.limits);
}

#[test]
fn quadratic_mean_is_per_bucket() {
    let mut range = empty_range(1.0);
    let sin = Function::Sin.index();
    range.values[0][sin] = changed(0.5, 4, 1); // fscore 3
    range.values[1][sin] = changed(0.5, 5, 1); // fscore 4

    let report = RangeReport::build(&range, Function::Sin).expect("scored");
    assert_eq!(report.improvements.count, 2);
    assert_eq!(report.improvements.mean_square, (12.5_f64).sqrt());
    assert_eq!(report.mean_relative, 3.5);
    assert_eq!(report.worsenings.count, 0);
    assert!(report.worsenings.mean_square.is_nan());
}

#[test]
fn ranges_without_net_change_are_omitted() {
    let mut range = empty_range(3.0);
    let omc = Function::Omc.index();
    // Changed but equidistant from accurate: iscore 0.
    range.values[5][omc] = changed(0.125, 2, -2);
    assert_eq!(
        Scores::of_value(&range.values[5][omc]).map(|s| s.iscore),
        Some(0)
    );

    let sweep = Sweep::from_ranges(vec![range, empty_range(4.0)]);
    let reports = FunctionReports::aggregate(&sweep);
    for function in Function::ALL {
        assert!(reports.get(function).is_empty(), "{function}");
    }
}

#[test]
fn reports_are_grouped_by_function_in_sweep_order() {
    let mut first = empty_range(1.0);
    let mut second = empty_range(2.0);
    let sin = Function::Sin.index();
    first.values[0][sin] = changed(0.5, 3, 1);
    second.values[0][sin] = changed(0.5, 1, 3);
    second.values[0][Function::Cos.index()] = changed(0.5, 2, 1);

    let reports = FunctionReports::aggregate(&Sweep::from_ranges(vec![first, second]));
    let sin_reports = reports.get(Function::Sin);
    assert_eq!(sin_reports.len(), 2);
    assert_eq!(sin_reports[0].limits[0], 1.0);
    assert_eq!(sin_reports[1].limits[0], 2.0);
    assert_eq!(reports.get(Function::Cos).len(), 1);
    assert!(reports.get(Function::Omc).is_empty());
    assert_eq!(
        reports.iter().map(|(f, r)| (f, r.len())).collect::<Vec<_>>(),
        vec![(Function::Sin, 2), (Function::Cos, 1), (Function::Omc, 0)]
    );
}

#[cfg(feature = "serde")]
#[test]
fn reports_serialize_to_json() {
    let mut range = empty_range(1.0);
    range.values[0][Function::Sin.index()] = changed(0.5, 3, 1);
    let reports = FunctionReports::aggregate(&Sweep::from_ranges(vec![range]));
    let json = serde_json::to_value(&reports).expect("serialize");
    assert_eq!(json["by_function"][0][0]["improvements"]["count"], 1);
}
