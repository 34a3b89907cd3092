pub mod braking;
pub mod land;
pub mod pathset;
pub mod rc;

pub use braking::Braking;
pub use land::Land;
pub use rc::RC;

use pathset::{Error, Path, PathSet, Value};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub land: Land,
    pub braking: Braking,
    pub rc: RC,
}

impl PathSet for Config {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        match path.str()? {
            "land" => self.land.set(path, value),
            "braking" => self.braking.set(path, value),
            "rc" => self.rc.set(path, value),
            _ => Err(Error::UnknownPath),
        }
    }
}

impl Config {
    /// Applies a `path value` line such as `land.alt1 3.5`, a missing value restores the default
    pub fn set_line(&mut self, line: &str) -> Result<(), Error> {
        let mut split = line.split(' ').filter(|s| !s.is_empty());
        let path = split.next().ok_or(Error::UnknownPath)?;
        self.set(Path::from(path), Value(split.next()))
    }
}

mod test {
    #[test]
    fn test_set_path() {
        use super::pathset::{Error, Path, PathSet, Value};
        use super::Config;

        let mut config = Config::default();
        config.set(Path::from("land.alt1"), Value::of("3.5")).unwrap();
        assert_eq!(config.land.alt1, 3.5);

        config.set_line("land.rc-help true").unwrap();
        assert!(config.land.rc_help);

        config.set_line("braking.jerk-auto 6").unwrap();
        assert_eq!(config.braking.jerk_auto, 6.0);

        config.set_line("land.alt1").unwrap();
        assert_eq!(config.land.alt1, 10.0);

        assert_eq!(config.set_line("land.altitude 1"), Err(Error::UnknownPath));
        assert_eq!(config.set_line("gnss.rate 1"), Err(Error::UnknownPath));
        assert_eq!(config.set_line("land.alt2 high"), Err(Error::InvalidValue));
        assert_eq!(config.set_line("land.alt2 NaN"), Err(Error::InvalidValue));
        assert_eq!(config.set_line("rc.expo 3"), Ok(()));
        assert_eq!(config.rc.expo, 1.0);
    }

    #[test]
    fn test_deserialize() {
        use super::{Braking, Config};

        let json = r#"{"land": {"alt1": 8.0, "crawl-speed": 0.2, "rc-help": true}, "rc": {"timeout-ms": 200}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.land.alt1, 8.0);
        assert_eq!(config.land.crawl_speed, 0.2);
        assert!(config.land.rc_help);
        assert_eq!(config.land.alt2, 5.0);
        assert_eq!(config.rc.timeout_ms, 200);
        assert_eq!(config.braking, Braking::default());
    }

    #[test]
    fn test_error_display() {
        use std::string::ToString;

        use super::pathset::Error;

        assert_eq!(Error::InvalidValue.to_string(), "Value not valid");
    }
}
