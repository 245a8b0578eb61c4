pub trait Mean {
    fn mean(self) -> Option<f64>;
}

impl<I> Mean for I
where
    I: Iterator<Item = f64>,
{
    fn mean(mut self) -> Option<f64> {
        let first = self.next()?;
        let (sum, count) = self.fold((first, 1_usize), |(sum, count), next| {
            (sum + next, count + 1)
        });
        Some(sum / count as f64)
    }
}
