use super::pathset::{Error, Path, PathSet, Value};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RC {
    /// Frames older than this are ignored
    pub timeout_ms: u16,
    pub expo: f32,
    pub yaw_expo: f32,
    /// deg/s at full yaw stick
    pub max_yaw_rate: f32,
    /// Cutoff of the yaw rate low pass filter, Hz
    pub yaw_cutoff: f32,
}

impl Default for RC {
    fn default() -> Self {
        Self { timeout_ms: 500, expo: 0.0, yaw_expo: 0.0, max_yaw_rate: 150.0, yaw_cutoff: 10.0 }
    }
}

impl PathSet for RC {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        let default = Self::default();
        match path.str()? {
            "timeout-ms" => self.timeout_ms = value.parse_or(default.timeout_ms)?,
            "expo" => self.expo = value.parse_finite_or(default.expo)?.clamp(0.0, 1.0),
            "yaw-expo" => self.yaw_expo = value.parse_finite_or(default.yaw_expo)?.clamp(0.0, 1.0),
            "max-yaw-rate" => self.max_yaw_rate = value.parse_finite_or(default.max_yaw_rate)?,
            "yaw-cutoff" => self.yaw_cutoff = value.parse_finite_or(default.yaw_cutoff)?,
            _ => return Err(Error::UnknownPath),
        }
        Ok(())
    }
}
