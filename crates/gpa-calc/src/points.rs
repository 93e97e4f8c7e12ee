use models::Grade;

/// Grade points on a 4.0 scale.
pub const fn points_of(grade: Grade) -> f64 {
    match grade {
        Grade::APlus => 4.0,
        Grade::A => 4.0,
        Grade::AMinus => 3.667,
        Grade::BPlus => 3.333,
        Grade::B => 3.0,
        Grade::BMinus => 2.667,
        Grade::CPlus => 2.333,
        Grade::C => 2.0,
        Grade::CMinus => 1.667,
        Grade::DPlus => 1.333,
        Grade::D => 1.0,
        Grade::F => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_key_values() {
        assert_eq!(points_of(Grade::APlus), 4.0);
        assert_eq!(points_of(Grade::A), 4.0);
        assert_eq!(points_of(Grade::AMinus), 3.667);
        assert_eq!(points_of(Grade::BPlus), 3.333);
        assert_eq!(points_of(Grade::C), 2.0);
        assert_eq!(points_of(Grade::DPlus), 1.333);
        assert_eq!(points_of(Grade::F), 0.0);
    }

    #[test]
    fn points_never_increase_down_the_scale() {
        for pair in Grade::ALL.windows(2) {
            assert!(points_of(pair[0]) >= points_of(pair[1]), "{pair:?}");
        }
        for grade in Grade::ALL {
            let p = points_of(grade);
            assert!((0.0..=4.0).contains(&p));
        }
    }
}
