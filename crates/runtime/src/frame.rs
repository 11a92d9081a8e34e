use foundation::time::Time;

/// One animation callback at a fixed rate.
///
/// Globe motion advances per frame, so `time` only feeds wall-clock timers
/// like the guess debouncer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub dt_s: f64,
    pub time: Time,
}

impl Frame {
    /// Frame zero of a clock ticking `fps` times per second (at least once).
    pub fn first(fps: f64) -> Self {
        Self {
            index: 0,
            dt_s: 1.0 / fps.max(1.0),
            time: Time::default(),
        }
    }

    pub fn next(self) -> Self {
        let index = self.index + 1;
        Self {
            index,
            dt_s: self.dt_s,
            time: Time(index as f64 * self.dt_s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn sixty_frames_make_a_second() {
        let mut f = Frame::first(60.0);
        for _ in 0..60 {
            f = f.next();
        }
        assert_eq!(f.index, 60);
        assert!((f.time.seconds() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rate_is_clamped_to_one_hz() {
        let f = Frame::first(0.0).next();
        assert_eq!(f.dt_s, 1.0);
        assert_eq!(f.time, Time(1.0));
    }
}
