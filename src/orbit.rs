//! Broadcast orbit propagation (Keplerian model with harmonic corrections)
use log::debug;

use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{GM, Omega},
    error::PropagationError,
    gnss_time::t_k,
    kepler::{solve, ConvergenceWarning, KeplerOptions},
    layout::Field,
    navigation::EphemerisRecord,
    prelude::{Epoch, SV},
};

/// [Kepler] stores all keplerian parameters
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kepler {
    /// semi major axis (m)
    pub a: f64,
    /// Eccentricity (n.a)
    pub e: f64,
    /// Inclination angle at reference time (rad)
    pub i_0: f64,
    /// Longitude of ascending node at weekly epoch (rad)
    pub omega_0: f64,
    /// Mean anomaly at reference time (rad)
    pub m_0: f64,
    /// argument of perigee (rad)
    pub omega: f64,
    /// Time of ephemeris, in seconds of GPS week
    pub toe: f64,
}

/// Orbit [Perturbations]
#[derive(Default, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perturbations {
    /// Mean motion difference from computed value [rad.s-1]
    pub dn: f64,
    /// Inclination rate of change [rad.s-1]
    pub i_dot: f64,
    /// Right ascension rate of change [rad.s^-1]
    pub omega_dot: f64,
    /// Amplitude of sine harmonic correction term of the argument
    /// of latitude [rad]
    pub cus: f64,
    /// Amplitude of cosine harmonic correction term of the argument
    /// of latitude [rad]
    pub cuc: f64,
    /// Amplitude of sine harmonic correction term of the angle of inclination [rad]
    pub cis: f64,
    /// Amplitude of cosine harmonic correction term of the angle of inclination [rad]
    pub cic: f64,
    /// Amplitude of sine harmonic correction term of the orbit radius [m]
    pub crs: f64,
    /// Amplitude of cosine harmonic correction term of the orbit radius [m]
    pub crc: f64,
}

impl EphemerisRecord {
    /// Retrieves Orbit Keplerian parameters.
    /// Fails on the first missing field.
    pub fn kepler(&self) -> Result<Kepler, PropagationError> {
        Ok(Kepler {
            a: self.require(Field::SqrtA)?.powi(2),
            e: self.require(Field::Eccentricity)?,
            i_0: self.require(Field::Io)?,
            omega: self.require(Field::Omega)?,
            omega_0: self.require(Field::Omega0)?,
            m_0: self.require(Field::M0)?,
            toe: self.require(Field::Toe)?,
        })
    }

    /// Creates new [EphemerisRecord] from [Kepler]ian parameters
    pub fn with_kepler(&self, kepler: Kepler) -> Self {
        let mut s = self.clone();
        s.set(Field::SqrtA, kepler.a.sqrt());
        s.set(Field::Eccentricity, kepler.e);
        s.set(Field::Io, kepler.i_0);
        s.set(Field::Omega, kepler.omega);
        s.set(Field::Omega0, kepler.omega_0);
        s.set(Field::M0, kepler.m_0);
        s.set(Field::Toe, kepler.toe);
        s
    }

    /// Retrieves Orbit [Perturbations]
    pub fn perturbations(&self) -> Result<Perturbations, PropagationError> {
        Ok(Perturbations {
            cuc: self.require(Field::Cuc)?,
            cus: self.require(Field::Cus)?,
            cic: self.require(Field::Cic)?,
            cis: self.require(Field::Cis)?,
            crc: self.require(Field::Crc)?,
            crs: self.require(Field::Crs)?,
            dn: self.require(Field::DeltaN)?,
            i_dot: self.require(Field::Idot)?,
            omega_dot: self.require(Field::OmegaDot)?,
        })
    }

    /// Creates new [EphemerisRecord] with desired Orbit [Perturbations]
    pub fn with_perturbations(&self, perturbations: Perturbations) -> Self {
        let mut s = self.clone();
        s.set(Field::Cuc, perturbations.cuc);
        s.set(Field::Cus, perturbations.cus);
        s.set(Field::Cic, perturbations.cic);
        s.set(Field::Cis, perturbations.cis);
        s.set(Field::Crc, perturbations.crc);
        s.set(Field::Crs, perturbations.crs);
        s.set(Field::DeltaN, perturbations.dn);
        s.set(Field::Idot, perturbations.i_dot);
        s.set(Field::OmegaDot, perturbations.omega_dot);
        s
    }

    /// Solves the broadcast orbit equations at `t`, returning all
    /// intermediate quantities in a [Helper].
    pub fn helper(&self, t: Epoch, opts: &KeplerOptions) -> Result<Helper, PropagationError> {
        let kepler = self.kepler()?;
        let perturbations = self.perturbations()?;

        if kepler.e.is_nan() || !(0.0..1.0).contains(&kepler.e) {
            return Err(PropagationError::Domain {
                field: Field::Eccentricity,
                value: kepler.e,
            });
        }

        let sqrt_a = self.require(Field::SqrtA)?;
        if sqrt_a.is_nan() || sqrt_a <= 0.0 {
            return Err(PropagationError::Domain {
                field: Field::SqrtA,
                value: sqrt_a,
            });
        }

        let toe = self
            .toe()
            .ok_or(PropagationError::MissingParameter(Field::Toe))?;
        let t_k = t_k(t, toe);

        let n0 = (GM::GPS / kepler.a.powi(3)).sqrt(); // computed mean motion
        let n = n0 + perturbations.dn; // corrected mean motion
        let m_k = kepler.m_0 + n * t_k; // mean anomaly

        let solution = solve(m_k, kepler.e, opts);
        let e_k = solution.e_k;

        // true anomaly
        let (sin_e_k, cos_e_k) = e_k.sin_cos();
        let v_k = ((1.0 - kepler.e.powi(2)).sqrt() * sin_e_k).atan2(cos_e_k - kepler.e);

        let phi_k = v_k + kepler.omega; // argument of latitude
        let (x2_sin_phi_k, x2_cos_phi_k) = (2.0 * phi_k).sin_cos();

        // argument of latitude correction
        let du_k = perturbations.cus * x2_sin_phi_k + perturbations.cuc * x2_cos_phi_k;
        let u_k = phi_k + du_k;

        // orbit radius correction
        let dr_k = perturbations.crs * x2_sin_phi_k + perturbations.crc * x2_cos_phi_k;
        let r_k = kepler.a * (1.0 - kepler.e * cos_e_k) + dr_k;

        // inclination correction
        let di_k = perturbations.cis * x2_sin_phi_k + perturbations.cic * x2_cos_phi_k;
        let i_k = kepler.i_0 + perturbations.i_dot * t_k + di_k;

        // longitude of ascending node
        let omega_k =
            kepler.omega_0 + (perturbations.omega_dot - Omega::GPS) * t_k - Omega::GPS * kepler.toe;

        Ok(Helper {
            sv: self.sv,
            t_k,
            m_k,
            e_k,
            v_k,
            phi_k,
            u_k,
            r_k,
            i_k,
            omega_k,
            convergence: solution.warning,
        })
    }

    /// Returns ECEF [EcefPosition] at `t`, computed from this record.
    /// Selecting a record that is valid at `t` is the caller's responsibility.
    pub fn position(
        &self,
        t: Epoch,
        opts: &KeplerOptions,
    ) -> Result<EcefPosition, PropagationError> {
        let helper = self.helper(t, opts)?;
        let ecef = helper.ecef();
        debug!("{}({}) - t_k={:.3}s r_k={:.3}m", self.sv, t, helper.t_k, helper.r_k);
        Ok(EcefPosition {
            sv: self.sv,
            toc: self.toc,
            epoch: t,
            x: ecef[0],
            y: ecef[1],
            z: ecef[2],
            convergence: helper.convergence,
        })
    }
}

/// [Helper] gathers the intermediate quantities of one orbit resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helper {
    /// Satellite
    pub sv: SV,
    /// Time from ephemeris reference epoch (s), corrected for week crossing
    pub t_k: f64,
    /// Mean anomaly (rad)
    pub m_k: f64,
    /// Eccentric anomaly (rad)
    pub e_k: f64,
    /// True anomaly (rad)
    pub v_k: f64,
    /// Argument of latitude (rad)
    pub phi_k: f64,
    /// Corrected argument of latitude (rad)
    pub u_k: f64,
    /// Corrected radius (m)
    pub r_k: f64,
    /// Corrected inclination (rad)
    pub i_k: f64,
    /// Corrected longitude of ascending node (rad)
    pub omega_k: f64,
    /// Present when the Kepler solver did not converge
    pub convergence: Option<ConvergenceWarning>,
}

impl Helper {
    /// Returns orbital plane to ECEF [Rotation3] matrix.
    /// Positive angles mean counterclockwise rotation.
    fn orbit_to_ecef_rotation_matrix(&self) -> Rotation3<f64> {
        let rotation_node = Rotation3::from_axis_angle(&Vector3::z_axis(), self.omega_k);
        let rotation_incl = Rotation3::from_axis_angle(&Vector3::x_axis(), self.i_k);
        let rotation_lat = Rotation3::from_axis_angle(&Vector3::z_axis(), self.u_k);
        rotation_node * rotation_incl * rotation_lat
    }

    /// Returns ECEF position [Vector3] in meters
    pub fn ecef(&self) -> Vector3<f64> {
        self.orbit_to_ecef_rotation_matrix() * Vector3::new(self.r_k, 0.0, 0.0)
    }
}

/// [EcefPosition] of a satellite, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EcefPosition {
    /// Satellite
    pub sv: SV,
    /// ToC of the record this was computed from
    pub toc: Epoch,
    /// Epoch of this position
    pub epoch: Epoch,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Present when the Kepler solver did not converge:
    /// this position is the best available estimate
    pub convergence: Option<ConvergenceWarning>,
}

impl EcefPosition {
    /// Returns (x, y, z) in meters
    pub fn xyz(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// Returns distance to Earth center, in meters
    pub fn radius(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }
}
