/// A type that collects the steps taken by a search.
///
/// [`StepCollector`] is also implemented for the unit type `()`, which discards every step. This
/// is what the searches use when the caller does not ask for the steps.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
