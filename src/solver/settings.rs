use crate::algebra::*;
use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Error type returned by settings validation
#[derive(Error, Debug)]
pub enum SettingsError {
    /// An error attributable to one specific field
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Solver configuration.
///
/// Settings can be built field by field through [`SolverSettingsBuilder`],
/// which validates values before construction
/// ```no_run
/// use sella::solver::SolverSettingsBuilder;
///
/// let settings = SolverSettingsBuilder::<f64>::default()
///     .tol(1e-8)
///     .max_iter(500)
///     .build()
///     .unwrap();
/// ```

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverSettings<T: FloatT> {
    ///relative tolerance on the KKT residual
    #[builder(default = "(1e-5).as_T()")]
    pub tol: T,

    ///maximum number of operator applications in the Krylov solve
    #[builder(default = "1000")]
    pub max_iter: u32,

    ///number of Arnoldi steps between GMRES restarts
    #[builder(default = "20")]
    pub gmres_restart: u32,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,
}

impl<T> Default for SolverSettings<T>
where
    T: FloatT,
{
    fn default() -> SolverSettings<T> {
        SolverSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> SolverSettings<T>
where
    T: FloatT,
{
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_tol(self.tol)?;
        validate_max_iter(self.max_iter)?;
        validate_gmres_restart(self.gmres_restart)?;
        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SolverSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SolverSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> SolverSettingsBuilder<T>
where
    T: FloatT,
{
    /// check any explicitly assigned fields
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(tol) = self.tol {
            validate_tol(tol)?;
        }
        if let Some(max_iter) = self.max_iter {
            validate_max_iter(max_iter)?;
        }
        if let Some(gmres_restart) = self.gmres_restart {
            validate_gmres_restart(gmres_restart)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_tol<T: FloatT>(tol: T) -> Result<(), SettingsError> {
    if tol > T::zero() && tol.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("tol"))
    }
}

fn validate_max_iter(max_iter: u32) -> Result<(), SettingsError> {
    if max_iter > 0 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("max_iter"))
    }
}

fn validate_gmres_restart(gmres_restart: u32) -> Result<(), SettingsError> {
    if gmres_restart > 0 {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue("gmres_restart"))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    SolverSettingsBuilder::<f64>::default().build().unwrap();

    // fail on a nonpositive or non-finite tolerance
    assert!(SolverSettingsBuilder::<f64>::default()
        .tol(0.0)
        .build()
        .is_err());
    assert!(SolverSettingsBuilder::<f64>::default()
        .tol(f64::NAN)
        .build()
        .is_err());

    // fail on a zero iteration limit
    assert!(SolverSettingsBuilder::<f64>::default()
        .max_iter(0)
        .build()
        .is_err());

    // directly construct bad settings and manually check
    let settings = SolverSettings::<f64> {
        gmres_restart: 0,
        ..SolverSettings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_defaults() {
    let settings = SolverSettings::<f64>::default();
    assert_eq!(settings.tol, 1e-5);
    assert_eq!(settings.max_iter, 1000);
    assert_eq!(settings.gmres_restart, 20);
    assert!(!settings.verbose);
}
