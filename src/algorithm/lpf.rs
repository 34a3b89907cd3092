use core::f32::consts::PI;

/// First order low pass filter tolerating a varying sample interval
#[derive(Copy, Clone, Debug)]
pub struct LPF {
    rc: f32,
    value: f32,
}

impl LPF {
    pub fn new(freq: f32) -> Self {
        let rc = if freq > 0.0 { 1.0 / (2.0 * PI * freq) } else { 0.0 };
        Self { rc, value: 0.0 }
    }

    pub fn reset(&mut self, value: f32) {
        self.value = value;
    }

    pub fn filter(&mut self, sample: f32, dt: f32) -> f32 {
        if !(dt > 0.0) {
            return self.value;
        }
        let alpha = dt / (dt + self.rc);
        self.value = (1.0 - alpha) * self.value + alpha * sample;
        self.value
    }
}

mod test {
    #[test]
    fn test_lpf() {
        use super::LPF;

        let mut lpf = LPF::new(1.0);
        lpf.reset(3.335);
        let value0 = lpf.filter(3.295, 0.1);
        let value1 = lpf.filter(3.295, 0.1);
        assert!(3.295 < value1 && value1 < value0);
        let value2 = lpf.filter(3.295, 0.1);
        assert!(3.295 < value2 && value2 < value1);
    }

    #[test]
    fn test_lpf_passthrough() {
        use super::LPF;

        let mut lpf = LPF::new(0.0);
        assert_eq!(lpf.filter(2.0, 0.01), 2.0);
        assert_eq!(lpf.filter(5.0, 0.0), 2.0);
    }
}
