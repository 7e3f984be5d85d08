//! Fracture and reservoir geometry derivation.
//!
//! A fractured reservoir is described by a fracture shape (which fixes the
//! per-fracture area) together with exactly two of {fracture count, fracture
//! separation, reservoir volume}; the third is derived from
//! `volume = count × separation × area`. Supplying all three over-determines
//! the geometry and supplying fewer than two under-determines it; both are
//! configuration errors, never a silent choice.

use thiserror::Error;
use uom::si::{
    f64::{Area, Length, Volume},
    length::meter,
    ratio::ratio,
};

/// Errors from deriving a [`FractureGeometry`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Count, separation, and volume were all supplied.
    #[error(
        "fracture count, separation, and reservoir volume are over-determined; supply exactly two"
    )]
    OverDetermined,

    /// Fewer than two of count, separation, and volume were supplied.
    #[error("supply exactly two of fracture count, separation, and reservoir volume")]
    UnderDetermined,

    /// A drilling or stimulation outcome of zero fractures cannot be simulated.
    #[error("fracture count must be at least 1")]
    ZeroFractures,

    /// A geometric length must be strictly positive.
    #[error("{name} must be strictly positive")]
    NonPositive { name: &'static str },
}

/// Fracture shape, fixing the per-fracture area and flow-path length.
///
/// Water enters at the bottom edge and sweeps along the fracture height, so
/// the height is the advective flow path and the width is the edge the flow
/// is distributed across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractureShape {
    /// Circular fracture of the given diameter.
    Circular { diameter: Length },
    /// Square fracture; height and width both equal `side`.
    Square { side: Length },
    /// Rectangular fracture with independent height (flow path) and width.
    Rectangular { height: Length, width: Length },
}

impl FractureShape {
    /// Per-fracture area.
    #[must_use]
    pub fn area(&self) -> Area {
        match *self {
            Self::Circular { diameter } => {
                0.25 * std::f64::consts::PI * diameter * diameter
            }
            Self::Square { side } => side * side,
            Self::Rectangular { height, width } => height * width,
        }
    }

    /// Advective flow-path length along the fracture.
    #[must_use]
    pub fn height(&self) -> Length {
        match *self {
            Self::Circular { diameter } => diameter,
            Self::Square { side } => side,
            Self::Rectangular { height, .. } => height,
        }
    }

    /// Width the flow is distributed across.
    #[must_use]
    pub fn width(&self) -> Length {
        match *self {
            Self::Circular { diameter } => 0.25 * std::f64::consts::PI * diameter,
            Self::Square { side } => side,
            Self::Rectangular { width, .. } => width,
        }
    }

    fn validate(&self) -> Result<(), GeometryError> {
        let positive = |length: Length, name: &'static str| {
            if length.get::<meter>() > 0.0 {
                Ok(())
            } else {
                Err(GeometryError::NonPositive { name })
            }
        };
        match *self {
            Self::Circular { diameter } => positive(diameter, "fracture diameter"),
            Self::Square { side } => positive(side, "fracture side"),
            Self::Rectangular { height, width } => {
                positive(height, "fracture height")?;
                positive(width, "fracture width")
            }
        }
    }
}

/// User-facing geometry input: shape plus two of three sizing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FractureGeometryInput {
    pub shape: FractureShape,
    pub fracture_count: Option<u32>,
    pub separation: Option<Length>,
    pub volume: Option<Volume>,
}

/// Fully-derived, internally consistent reservoir geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractureGeometry {
    pub count: u32,
    pub separation: Length,
    pub area: Area,
    pub height: Length,
    pub width: Length,
    pub volume: Volume,
}

impl FractureGeometryInput {
    /// Derives the full geometry from the supplied pair of sizing parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] if the inputs are over- or
    /// under-determined, non-positive, or imply zero fractures.
    pub fn derive(&self) -> Result<FractureGeometry, GeometryError> {
        self.shape.validate()?;
        let area = self.shape.area();

        if let Some(0) = self.fracture_count {
            return Err(GeometryError::ZeroFractures);
        }
        if let Some(separation) = self.separation
            && separation.get::<meter>() <= 0.0
        {
            return Err(GeometryError::NonPositive {
                name: "fracture separation",
            });
        }
        if let Some(volume) = self.volume
            && volume.value <= 0.0
        {
            return Err(GeometryError::NonPositive {
                name: "reservoir volume",
            });
        }

        let (count, separation, volume) =
            match (self.fracture_count, self.separation, self.volume) {
                (Some(_), Some(_), Some(_)) => return Err(GeometryError::OverDetermined),
                (Some(count), Some(separation), None) => {
                    let volume = f64::from(count) * separation * area;
                    (count, separation, volume)
                }
                (Some(count), None, Some(volume)) => {
                    let separation = volume / (f64::from(count) * area);
                    (count, separation, volume)
                }
                (None, Some(separation), Some(volume)) => {
                    let count = (volume / (separation * area)).get::<ratio>().round();
                    if count < 1.0 {
                        return Err(GeometryError::ZeroFractures);
                    }
                    (count as u32, separation, volume)
                }
                _ => return Err(GeometryError::UnderDetermined),
            };

        Ok(FractureGeometry {
            count,
            separation,
            area,
            height: self.shape.height(),
            width: self.shape.width(),
            volume,
        })
    }
}
