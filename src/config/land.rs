use super::pathset::{Error, Path, PathSet, Value};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Land {
    /// Height above ground where the descent starts slowing down, meters
    pub alt1: f32,
    /// Height above ground where the descent reaches landing speed, meters
    pub alt2: f32,
    /// Height below which the descent crawls, needs a distance sensor, meters
    pub alt3: f32,
    /// Descent speed at and below alt2, m/s
    pub speed: f32,
    pub crawl_speed: f32,
    /// System wide maximum descent rate, m/s
    pub z_vel_max_dn: f32,
    /// Maximum horizontal distance from the landing point reachable by RC nudging, meters
    pub radius: f32,
    pub rc_help: bool,
}

impl Default for Land {
    fn default() -> Self {
        Self {
            alt1: 10.0,
            alt2: 5.0,
            alt3: 1.0,
            speed: 0.7,
            crawl_speed: 0.3,
            z_vel_max_dn: 1.5,
            radius: 1000.0,
            rc_help: false,
        }
    }
}

impl PathSet for Land {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        let default = Self::default();
        match path.str()? {
            "alt1" => self.alt1 = value.parse_finite_or(default.alt1)?,
            "alt2" => self.alt2 = value.parse_finite_or(default.alt2)?,
            "alt3" => self.alt3 = value.parse_finite_or(default.alt3)?,
            "speed" => self.speed = value.parse_finite_or(default.speed)?,
            "crawl-speed" => self.crawl_speed = value.parse_finite_or(default.crawl_speed)?,
            "z-vel-max-dn" => self.z_vel_max_dn = value.parse_finite_or(default.z_vel_max_dn)?,
            "radius" => self.radius = value.parse_finite_or(default.radius)?,
            "rc-help" => self.rc_help = value.parse_or(default.rc_help)?,
            _ => return Err(Error::UnknownPath),
        }
        Ok(())
    }
}
