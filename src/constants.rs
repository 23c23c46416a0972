//! Physical constants of the broadcast orbit model

/// Earth gravitational constant (m³.s⁻²)
pub(crate) struct GM;

impl GM {
    /// WGS-84 value, as defined by ICD-GPS-200 and shared by QZSS
    pub const GPS: f64 = 3.986005E14;
}

/// Earth rotation rate (rad.s⁻¹)
pub(crate) struct Omega;

impl Omega {
    pub const GPS: f64 = 7.292115E-5;
}

/// Const values used in this crate
pub(crate) struct Constants;

impl Constants {
    /// Seconds in one GPS week
    pub const SECONDS_PER_WEEK: f64 = 604_800.0;

    /// Half a GPS week: beyond that, t_k has crossed a week boundary
    pub const HALF_WEEK: f64 = 302_400.0;

    /// Default broadcast ephemeris validity, on each side of ToE (s)
    pub const FIT_INTERVAL: f64 = 7_200.0;
}
