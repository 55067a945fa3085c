//! Soft synchronization of parameter sets.
use super::ParamSet;
use crate::error::KeelError;
use log::trace;

fn check_correspondence(target: &ParamSet, source: &ParamSet) -> Result<(), KeelError> {
    if target.len() != source.len() {
        return Err(KeelError::ShapeMismatch(format!(
            "target has {} tensors, source has {}",
            target.len(),
            source.len()
        )));
    }
    for ((k_t, v_t), (k_s, v_s)) in target.iter().zip(source.iter()) {
        if k_t != k_s {
            return Err(KeelError::ShapeMismatch(format!(
                "names differ: '{}' vs '{}'",
                k_t, k_s
            )));
        }
        if v_t.shape() != v_s.shape() {
            return Err(KeelError::ShapeMismatch(format!(
                "'{}': {:?} vs {:?}",
                k_t,
                v_t.shape(),
                v_s.shape()
            )));
        }
    }
    Ok(())
}

/// Apply soft update on parameters.
///
/// Tensors are matched by position and identified by their names:
///
/// target = (1 - tau) * target + tau * source
///
/// `tau = 0` leaves the target unchanged and `tau = 1` copies the source;
/// a typical value is `0.005`. Values outside `[0, 1]` extrapolate and are
/// not rejected. Target tensors are updated in place, their storage is
/// never replaced.
///
/// The whole correspondence between the sets is validated before any tensor
/// is touched, so a [`KeelError::ShapeMismatch`] leaves the target exactly
/// as it was.
pub fn soft_update(target: &mut ParamSet, source: &ParamSet, tau: f64) -> Result<(), KeelError> {
    check_correspondence(target, source)?;

    let tau = tau as f32;
    for (t, s) in target.values_mut().zip(source.values()) {
        t.zip_mut_with(s, |t, s| *t = *t * (1.0 - tau) + *s * tau);
    }
    trace!("soft update");

    Ok(())
}

/// Copies the source parameters into the target.
///
/// Same correspondence requirements as [`soft_update`]; equivalent to
/// `soft_update(target, source, 1.0)` without the arithmetic.
pub fn copy_from(target: &mut ParamSet, source: &ParamSet) -> Result<(), KeelError> {
    check_correspondence(target, source)?;

    for (t, s) in target.values_mut().zip(source.values()) {
        t.assign(s);
    }
    trace!("copy params");

    Ok(())
}

#[test]
fn test_soft_update_blend() -> Result<(), KeelError> {
    use super::tensor_from_vec;

    let tau = 0.7;
    let mut target = ParamSet::new();
    target.push("var1", tensor_from_vec(vec![4.0f32, 5.0, 6.0], &[3])?)?;
    let mut source = ParamSet::new();
    source.push("var1", tensor_from_vec(vec![1.0f32, 2.0, 3.0], &[3])?)?;

    soft_update(&mut target, &source, tau)?;

    let expected = [1.9f32, 2.9, 3.9];
    for (v, e) in target.get("var1").unwrap().iter().zip(expected.iter()) {
        assert!((v - e).abs() < 1e-6);
    }

    Ok(())
}
