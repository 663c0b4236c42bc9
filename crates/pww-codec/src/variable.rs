//! The closed weather variable vocabulary.
//!
//! Every wire code maps to one variant carrying its forward conversion
//! (SI input to the quantizable 0..=254 range) and the exact inverse (raw
//! stored value back to the variable's declared unit). Adding a physical
//! quantity means adding a variant; the compiler then forces the code,
//! name, and both transforms to exist together.

use serde::{Deserialize, Serialize};

/// Reserved sample value meaning missing or out of range.
pub const MISSING_SENTINEL: u8 = 255;

const KELVIN_TO_CELSIUS: f64 = 273.15;
const MPS_TO_MPH: f64 = 2.236_94;
/// Additive offset keeping Fahrenheit temperatures positive across the
/// assumed climate range.
const FAHRENHEIT_OFFSET: f64 = 115.0;
/// Additive offset keeping Celsius temperatures positive.
const CELSIUS_OFFSET: f64 = 100.0;

fn kelvin_to_fahrenheit(k: f64) -> f64 {
    (k - KELVIN_TO_CELSIUS) * 9.0 / 5.0 + 32.0
}

/// One physical quantity storable in a PWW archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherVariable {
    /// 2 m air temperature, stored as °C + 100. SI input: kelvin.
    Temperature2mC,
    /// 2 m air temperature, stored as °F + 115. SI input: kelvin.
    Temperature2mF,
    /// 2 m dew point, stored as °C + 100. SI input: kelvin.
    DewPoint2mC,
    /// 2 m dew point, stored as °F + 115. SI input: kelvin.
    DewPoint2mF,
    /// 10 m wind speed in m/s.
    WindSpeed10mMps,
    /// 10 m wind speed, stored in mph. SI input: m/s.
    WindSpeed10mMph,
    /// 10 m wind direction, stored in 5-degree buckets. SI input: radians
    /// (meteorological convention, atan2(u, v)).
    WindDirection10m,
    /// 100 m wind speed in m/s.
    WindSpeed100mMps,
    /// 100 m wind speed, stored in mph. SI input: m/s.
    WindSpeed100mMph,
    /// 80 m wind speed in m/s.
    WindSpeed80mMps,
    /// 80 m wind speed, stored in mph. SI input: m/s.
    WindSpeed80mMph,
    /// Total cloud cover percentage, 0-100.
    TotalCloudCover,
    /// Global horizontal irradiance, stored as W/m² / 5.
    GlobalIrradiance,
    /// Direct horizontal irradiance, stored as W/m² / 5.
    DirectIrradiance,
    /// Vertically integrated smoke, log-compressed. SI input: mg/m².
    IntegratedSmoke,
    /// Surface wind gust in m/s.
    WindGustMps,
    /// Surface wind gust, stored in mph. SI input: m/s.
    WindGustMph,
    /// Percent of frozen precipitation, rescaled from the -50..100 model
    /// range into 0..100.
    FrozenPrecipPercent,
    /// Surface precipitation rate, stored in mm/h. SI input: mm/s
    /// (equivalently kg/m²/s).
    PrecipRate,
    /// Full-resolution 2 m temperature, stored as °C x 100. SI input: kelvin.
    Temperature2mCFull,
    /// Full-resolution 2 m dew point, stored as °C x 100. SI input: kelvin.
    DewPoint2mCFull,
    /// Full-resolution 10 m wind speed, stored as m/s x 100.
    WindSpeed10mMpsFull,
    /// Full-resolution 100 m wind speed, stored as m/s x 100.
    WindSpeed100mMpsFull,
    /// Global horizontal irradiance in full W/m².
    GlobalIrradianceFull,
    /// Direct horizontal irradiance in full W/m².
    DirectIrradianceFull,
    /// Vertically integrated smoke in full mg/m².
    IntegratedSmokeFull,
}

impl WeatherVariable {
    /// Wire code, the fixed vocabulary shared by writer and reader.
    pub fn code(self) -> u16 {
        match self {
            WeatherVariable::Temperature2mC => 101,
            WeatherVariable::Temperature2mF => 102,
            WeatherVariable::DewPoint2mC => 103,
            WeatherVariable::DewPoint2mF => 104,
            WeatherVariable::WindSpeed10mMps => 105,
            WeatherVariable::WindSpeed10mMph => 106,
            WeatherVariable::WindDirection10m => 107,
            WeatherVariable::WindSpeed100mMps => 109,
            WeatherVariable::WindSpeed100mMph => 110,
            WeatherVariable::WindSpeed80mMps => 111,
            WeatherVariable::WindSpeed80mMph => 112,
            WeatherVariable::TotalCloudCover => 119,
            WeatherVariable::GlobalIrradiance => 120,
            WeatherVariable::DirectIrradiance => 121,
            WeatherVariable::IntegratedSmoke => 122,
            WeatherVariable::WindGustMps => 135,
            WeatherVariable::WindGustMph => 136,
            WeatherVariable::FrozenPrecipPercent => 150,
            WeatherVariable::PrecipRate => 151,
            WeatherVariable::Temperature2mCFull => 1101,
            WeatherVariable::DewPoint2mCFull => 1103,
            WeatherVariable::WindSpeed10mMpsFull => 1105,
            WeatherVariable::WindSpeed100mMpsFull => 1109,
            WeatherVariable::GlobalIrradianceFull => 1120,
            WeatherVariable::DirectIrradianceFull => 1121,
            WeatherVariable::IntegratedSmokeFull => 1122,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            101 => Some(WeatherVariable::Temperature2mC),
            102 => Some(WeatherVariable::Temperature2mF),
            103 => Some(WeatherVariable::DewPoint2mC),
            104 => Some(WeatherVariable::DewPoint2mF),
            105 => Some(WeatherVariable::WindSpeed10mMps),
            106 => Some(WeatherVariable::WindSpeed10mMph),
            107 => Some(WeatherVariable::WindDirection10m),
            109 => Some(WeatherVariable::WindSpeed100mMps),
            110 => Some(WeatherVariable::WindSpeed100mMph),
            111 => Some(WeatherVariable::WindSpeed80mMps),
            112 => Some(WeatherVariable::WindSpeed80mMph),
            119 => Some(WeatherVariable::TotalCloudCover),
            120 => Some(WeatherVariable::GlobalIrradiance),
            121 => Some(WeatherVariable::DirectIrradiance),
            122 => Some(WeatherVariable::IntegratedSmoke),
            135 => Some(WeatherVariable::WindGustMps),
            136 => Some(WeatherVariable::WindGustMph),
            150 => Some(WeatherVariable::FrozenPrecipPercent),
            151 => Some(WeatherVariable::PrecipRate),
            1101 => Some(WeatherVariable::Temperature2mCFull),
            1103 => Some(WeatherVariable::DewPoint2mCFull),
            1105 => Some(WeatherVariable::WindSpeed10mMpsFull),
            1109 => Some(WeatherVariable::WindSpeed100mMpsFull),
            1120 => Some(WeatherVariable::GlobalIrradianceFull),
            1121 => Some(WeatherVariable::DirectIrradianceFull),
            1122 => Some(WeatherVariable::IntegratedSmokeFull),
            _ => None,
        }
    }

    /// Semantic channel name.
    pub fn name(self) -> &'static str {
        match self {
            WeatherVariable::Temperature2mC => "temp_c_2m",
            WeatherVariable::Temperature2mF => "temp_f_2m",
            WeatherVariable::DewPoint2mC => "dewpoint_c_2m",
            WeatherVariable::DewPoint2mF => "dewpoint_f_2m",
            WeatherVariable::WindSpeed10mMps => "wind_speed_10m_mps",
            WeatherVariable::WindSpeed10mMph => "wind_speed_10m_mph",
            WeatherVariable::WindDirection10m => "wind_direction_10m_deg",
            WeatherVariable::WindSpeed100mMps => "wind_speed_100m_mps",
            WeatherVariable::WindSpeed100mMph => "wind_speed_100m_mph",
            WeatherVariable::WindSpeed80mMps => "wind_speed_80m_mps",
            WeatherVariable::WindSpeed80mMph => "wind_speed_80m_mph",
            WeatherVariable::TotalCloudCover => "total_cloud_cover_percent",
            WeatherVariable::GlobalIrradiance => "global_horizontal_irradiance_wm2",
            WeatherVariable::DirectIrradiance => "direct_horizontal_irradiance_wm2",
            WeatherVariable::IntegratedSmoke => "vertically_integrated_smoke_mgm2",
            WeatherVariable::WindGustMps => "wind_gust_surface_mps",
            WeatherVariable::WindGustMph => "wind_gust_surface_mph",
            WeatherVariable::FrozenPrecipPercent => "percent_frozen_precip_surface",
            WeatherVariable::PrecipRate => "precipitation_rate_surface_mmhr",
            WeatherVariable::Temperature2mCFull => "temp_c_2m_mult_100",
            WeatherVariable::DewPoint2mCFull => "dewpoint_c_2m_mult_100",
            WeatherVariable::WindSpeed10mMpsFull => "wind_speed_10m_mps_mult_100",
            WeatherVariable::WindSpeed100mMpsFull => "wind_speed_100m_mps_mult_100",
            WeatherVariable::GlobalIrradianceFull => "global_horizontal_irradiance_wm2_full",
            WeatherVariable::DirectIrradianceFull => "direct_horizontal_irradiance_wm2_full",
            WeatherVariable::IntegratedSmokeFull => "vertically_integrated_smoke_mgm2_full",
        }
    }

    /// Forward conversion from the SI input unit to the quantizable range.
    ///
    /// The result is rounded and sentinel-clipped by the writer; this
    /// function is the pure unit transform.
    pub fn quantize(self, si: f64) -> f64 {
        match self {
            WeatherVariable::Temperature2mC | WeatherVariable::DewPoint2mC => {
                (si - KELVIN_TO_CELSIUS) + CELSIUS_OFFSET
            }
            WeatherVariable::Temperature2mF | WeatherVariable::DewPoint2mF => {
                kelvin_to_fahrenheit(si) + FAHRENHEIT_OFFSET
            }
            WeatherVariable::WindSpeed10mMps
            | WeatherVariable::WindSpeed100mMps
            | WeatherVariable::WindSpeed80mMps
            | WeatherVariable::WindGustMps => si,
            WeatherVariable::WindSpeed10mMph
            | WeatherVariable::WindSpeed100mMph
            | WeatherVariable::WindSpeed80mMph
            | WeatherVariable::WindGustMph => si * MPS_TO_MPH,
            WeatherVariable::WindDirection10m => (si.to_degrees() + 180.0) / 5.0,
            WeatherVariable::TotalCloudCover => si,
            WeatherVariable::GlobalIrradiance | WeatherVariable::DirectIrradiance => si / 5.0,
            WeatherVariable::IntegratedSmoke => 40.0 * si.log10(),
            WeatherVariable::FrozenPrecipPercent => (si + 50.0) / 1.5,
            WeatherVariable::PrecipRate => si * 3600.0,
            WeatherVariable::Temperature2mCFull | WeatherVariable::DewPoint2mCFull => {
                (si - KELVIN_TO_CELSIUS) * 100.0
            }
            WeatherVariable::WindSpeed10mMpsFull | WeatherVariable::WindSpeed100mMpsFull => {
                si * 100.0
            }
            WeatherVariable::GlobalIrradianceFull
            | WeatherVariable::DirectIrradianceFull
            | WeatherVariable::IntegratedSmokeFull => si,
        }
    }

    /// Inverse conversion from the raw stored value to the declared unit.
    ///
    /// Exact inverse of [`quantize`](Self::quantize) up to the unit change
    /// baked into the vocabulary: mph/mm/h variants decode in their stored
    /// unit, not back to SI.
    pub fn dequantize(self, raw: f64) -> f64 {
        match self {
            WeatherVariable::Temperature2mC | WeatherVariable::DewPoint2mC => raw - CELSIUS_OFFSET,
            WeatherVariable::Temperature2mF | WeatherVariable::DewPoint2mF => {
                raw - FAHRENHEIT_OFFSET
            }
            WeatherVariable::WindSpeed10mMps
            | WeatherVariable::WindSpeed100mMps
            | WeatherVariable::WindSpeed80mMps
            | WeatherVariable::WindGustMps
            | WeatherVariable::WindSpeed10mMph
            | WeatherVariable::WindSpeed100mMph
            | WeatherVariable::WindSpeed80mMph
            | WeatherVariable::WindGustMph => raw,
            WeatherVariable::WindDirection10m => raw * 5.0,
            WeatherVariable::TotalCloudCover => raw,
            WeatherVariable::GlobalIrradiance | WeatherVariable::DirectIrradiance => raw * 5.0,
            WeatherVariable::IntegratedSmoke => 10f64.powf(raw / 40.0),
            WeatherVariable::FrozenPrecipPercent => raw * 1.5 - 50.0,
            WeatherVariable::PrecipRate => raw,
            WeatherVariable::Temperature2mCFull | WeatherVariable::DewPoint2mCFull => raw / 100.0,
            WeatherVariable::WindSpeed10mMpsFull | WeatherVariable::WindSpeed100mMpsFull => {
                raw / 100.0
            }
            WeatherVariable::GlobalIrradianceFull
            | WeatherVariable::DirectIrradianceFull
            | WeatherVariable::IntegratedSmokeFull => raw,
        }
    }
}
