/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn after(self, delay_s: f64) -> Self {
        Time(self.0 + delay_s)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn after_offsets_and_orders() {
        let t = Time(1.5);
        assert_eq!(t.after(0.5), Time(2.0));
        assert!(t < t.after(0.1));
    }
}
