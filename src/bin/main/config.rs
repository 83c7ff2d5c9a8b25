use std::{env, fmt, fs, io, path::PathBuf, str::FromStr};

use flick_core::{DisplayMode, EngineConfig, SpeedRange};

pub(super) const SAMPLE_TEXT: &str = "En un lugar de la Mancha, de cuyo nombre no quiero acordarme, \
no ha mucho tiempo que vivía un hidalgo de los de lanza en astillero, adarga antigua, rocín flaco \
y galgo corredor. Una olla de algo más vaca que carnero, salpicón las más noches, duelos y \
quebrantos los sábados, lantejas los viernes, algún palomino de añadidura los domingos, consumían \
las tres partes de su hacienda.";

#[derive(Debug)]
pub(super) enum DemoError {
    InvalidVar { name: &'static str, value: String },
    Io(io::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVar { name, value } => write!(f, "invalid {}={:?}", name, value),
            Self::Io(err) => write!(f, "read failed: {}", err),
        }
    }
}

impl std::error::Error for DemoError {}

#[derive(Debug, Clone, Default)]
pub(super) struct DemoConfig {
    pub engine: EngineConfig,
    /// Text file replayed as the captured screen; the sample when absent.
    pub text_path: Option<PathBuf>,
}

impl DemoConfig {
    pub(super) fn from_env() -> Result<Self, DemoError> {
        let defaults = EngineConfig::default();

        let min = parse_var("FLICK_MIN_WPS")?.unwrap_or(defaults.speed_range.min());
        let max = parse_var("FLICK_MAX_WPS")?.unwrap_or(defaults.speed_range.max());
        let mode = match env::var("FLICK_MODE") {
            Ok(value) => parse_mode(&value).ok_or(DemoError::InvalidVar {
                name: "FLICK_MODE",
                value,
            })?,
            Err(_) => defaults.mode,
        };
        let extent = match parse_var::<f32>("FLICK_EXTENT")? {
            Some(extent) if extent > 0.0 => extent,
            Some(extent) => {
                return Err(DemoError::InvalidVar {
                    name: "FLICK_EXTENT",
                    value: extent.to_string(),
                });
            }
            None => defaults.reference_extent,
        };

        Ok(Self {
            engine: defaults
                .with_speed_range(SpeedRange::new(min, max))
                .with_mode(mode)
                .with_reference_extent(extent),
            text_path: env::args_os().nth(1).map(PathBuf::from),
        })
    }

    pub(super) fn load_text(&self) -> Result<String, DemoError> {
        match &self.text_path {
            Some(path) => fs::read_to_string(path).map_err(DemoError::Io),
            None => Ok(SAMPLE_TEXT.to_string()),
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, DemoError> {
    match env::var(name) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(DemoError::InvalidVar { name, value }),
        },
        Err(_) => Ok(None),
    }
}

fn parse_mode(value: &str) -> Option<DisplayMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "naive" => Some(DisplayMode::Naive),
        "orp" => Some(DisplayMode::Orp),
        _ => None,
    }
}
