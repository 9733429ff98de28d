use std::cmp::Ordering;

/// Totally ordered `f64`, so costs and distances can be used with `min_by_key`.
#[derive(Debug, Clone, Copy)]
pub struct OrdF64(pub f64);

impl PartialEq for OrdF64 {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

pub trait ToOrd {
    fn to_ord(self) -> OrdF64;
}

impl ToOrd for f64 {
    #[inline(always)]
    fn to_ord(self) -> OrdF64 {
        OrdF64(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_like_floats() {
        let mut values = vec![3.0_f64.to_ord(), (-1.0_f64).to_ord(), 2.5_f64.to_ord()];
        values.sort();
        let values: Vec<f64> = values.into_iter().map(|v| v.0).collect();
        assert_eq!(values, vec![-1.0, 2.5, 3.0]);
    }

    #[test]
    fn min_by_key_keeps_first_of_ties() {
        let values = [2.0_f64, 1.0, 1.0, 3.0];
        let (idx, _) = values
            .iter()
            .enumerate()
            .min_by_key(|(_, v)| v.to_ord())
            .unwrap();
        assert_eq!(idx, 1);
    }
}
