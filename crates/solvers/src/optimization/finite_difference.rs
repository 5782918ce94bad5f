use epifit_core::Vector;

/// Approximates the gradient of `f` at `x` by forward differences.
///
/// Each coordinate is perturbed by `step` in turn and restored before the
/// next, so only one scratch vector is used. `value` must be `f(x)`.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub fn forward_difference<const P: usize, E, F>(
    mut f: F,
    x: &Vector<P>,
    value: f64,
    step: f64,
    out: &mut Vector<P>,
) -> Result<(), E>
where
    F: FnMut(&Vector<P>) -> Result<f64, E>,
{
    let mut probe = *x;
    for i in 0..P {
        probe[i] = x[i] + step;
        out[i] = (f(&probe)? - value) / step;
        probe[i] = x[i];
    }
    Ok(())
}
