//! Summary statistics of parameter sets.
use super::ParamSet;
use crate::record::{Record, RecordValue};

/// Returns the mean and standard deviation of the parameters.
///
/// For each tensor named `k`, the record gets `k_mean` and `k_std` entries.
pub fn param_stats(params: &ParamSet) -> Record {
    let mut record = Record::empty();

    for (k, v) in params.iter() {
        let m = v.mean().unwrap_or(f32::NAN);
        let k_mean = format!("{}_mean", &k);
        record.insert(k_mean, RecordValue::Scalar(m));

        let s = v.std(0.0);
        let k_std = format!("{}_std", &k);
        record.insert(k_std, RecordValue::Scalar(s));
    }

    record
}

#[cfg(test)]
mod tests {
    use super::param_stats;
    use crate::param::{tensor_from_vec, ParamSet};

    #[test]
    fn test_param_stats() {
        let mut params = ParamSet::new();
        params
            .push("w", tensor_from_vec(vec![1.0f32, 2.0, 3.0], &[3]).unwrap())
            .unwrap();

        let record = param_stats(&params);
        assert_eq!(record.get_scalar("w_mean").unwrap(), 2.0);
        let std = record.get_scalar("w_std").unwrap();
        assert!((std - (2.0f32 / 3.0).sqrt()).abs() < 1e-6);
    }
}
