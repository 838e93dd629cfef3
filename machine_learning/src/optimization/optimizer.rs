pub trait Optimizer {
    /// Updates `params` in place given their gradient.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]);
}
