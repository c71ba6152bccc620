/// Uniform randomness consumed by the trial factory and the runner.
///
/// Implemented for `fastrand::Rng`; tests substitute scripted sources.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform float in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;

    fn choose<T: Copy>(&mut self, items: &[T]) -> T
    where
        Self: Sized,
    {
        items[self.index(items.len())]
    }

    /// Fisher-Yates.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl RandomSource for fastrand::Rng {
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.f64() * (high - low)
    }

    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        fastrand::Rng::shuffle(self, items);
    }
}
