#[derive(Copy, Clone, Eq, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum AxisType {
    Throttle = 0,
    Roll,
    Pitch,
    Yaw,
}

pub type RSSI = u16;

/// Raw receiver axes, throttle spans 0..=u16::MAX with the center at half travel,
/// roll/pitch/yaw span -i16::MAX..=i16::MAX
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub throttle: u16,
    pub roll: i16,
    pub pitch: i16,
    pub yaw: i16,
}

impl Axes {
    pub fn centered() -> Self {
        Self { throttle: u16::MAX / 2 + 1, roll: 0, pitch: 0, yaw: 0 }
    }

    pub fn ratio(&self, axis: AxisType) -> f32 {
        match axis {
            AxisType::Throttle => {
                let throttle = self.throttle as f32 / u16::MAX as f32 * 2.0 - 1.0;
                throttle.clamp(-1.0, 1.0)
            }
            AxisType::Roll => ratio(self.roll),
            AxisType::Pitch => ratio(self.pitch),
            AxisType::Yaw => ratio(self.yaw),
        }
    }
}

fn ratio(axis: i16) -> f32 {
    (axis as f32 / i16::MAX as f32).clamp(-1.0, 1.0)
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub rssi: RSSI,
    pub axes: Axes,
}

mod test {
    #[test]
    fn test_axes_ratio() {
        use super::{AxisType, Axes};

        let axes = Axes { throttle: u16::MAX, roll: i16::MAX, pitch: -i16::MAX, yaw: 0 };
        assert_eq!(axes.ratio(AxisType::Throttle), 1.0);
        assert_eq!(axes.ratio(AxisType::Roll), 1.0);
        assert_eq!(axes.ratio(AxisType::Pitch), -1.0);
        assert_eq!(axes.ratio(AxisType::Yaw), 0.0);

        let axes = Axes { throttle: 0, roll: i16::MIN, ..Default::default() };
        assert_eq!(axes.ratio(AxisType::Throttle), -1.0);
        assert_eq!(axes.ratio(AxisType::Roll), -1.0);

        assert!(Axes::centered().ratio(AxisType::Throttle).abs() < 1e-4);
    }
}
