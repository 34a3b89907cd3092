use super::pathset::{Error, Path, PathSet, Value};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Braking {
    pub xy_vel_max: f32,
    pub z_vel_max_up: f32,
    pub z_vel_max_dn: f32,
    pub acc_hor: f32,
    pub acc_up_max: f32,
    pub acc_down_max: f32,
    pub jerk_auto: f32,
    pub jerk_max: f32,
    pub xy_traj_p: f32,
    pub xy_err_max: f32,
    pub acceptance_radius: f32,
}

impl Default for Braking {
    fn default() -> Self {
        Self {
            xy_vel_max: 12.0,
            z_vel_max_up: 3.0,
            z_vel_max_dn: 1.5,
            acc_hor: 3.0,
            acc_up_max: 4.0,
            acc_down_max: 3.0,
            jerk_auto: 4.0,
            jerk_max: 8.0,
            xy_traj_p: 0.5,
            xy_err_max: 2.0,
            acceptance_radius: 0.8,
        }
    }
}

impl PathSet for Braking {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        let d = Self::default();
        let field = match path.str()? {
            "xy-vel-max" => (&mut self.xy_vel_max, d.xy_vel_max),
            "z-vel-max-up" => (&mut self.z_vel_max_up, d.z_vel_max_up),
            "z-vel-max-dn" => (&mut self.z_vel_max_dn, d.z_vel_max_dn),
            "acc-hor" => (&mut self.acc_hor, d.acc_hor),
            "acc-up-max" => (&mut self.acc_up_max, d.acc_up_max),
            "acc-down-max" => (&mut self.acc_down_max, d.acc_down_max),
            "jerk-auto" => (&mut self.jerk_auto, d.jerk_auto),
            "jerk-max" => (&mut self.jerk_max, d.jerk_max),
            "xy-traj-p" => (&mut self.xy_traj_p, d.xy_traj_p),
            "xy-err-max" => (&mut self.xy_err_max, d.xy_err_max),
            "acceptance-radius" => (&mut self.acceptance_radius, d.acceptance_radius),
            _ => return Err(Error::UnknownPath),
        };
        *field.0 = value.parse_finite_or(field.1)?;
        Ok(())
    }
}
